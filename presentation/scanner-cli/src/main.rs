use std::io::Write;
use std::sync::Arc;

use dotenvy::dotenv;

mod config;
mod line_source;
mod render;

use business::application::history::buffer::load_history;
use business::application::history::flush::FlushHistoryUseCaseImpl;
use business::application::history::record::RecordScanUseCaseImpl;
use business::application::pricing::lookup::LookupPriceUseCaseImpl;
use business::application::scan::session::{ScanOutcome, ScanSession};
use business::domain::history::repository::ScanBatchStore;
use ebay::client::EbayClient;
use ebay::sold_listings::SoldListingsEbay;
use logger::TracingLogger;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use persistence::history::local::JsonFileHistoryRepository;
use persistence::history::remote::ScanBatchStorePostgres;

use config::ScannerConfig;
use line_source::LineScanSource;

/// Terminal scanner: type or wedge-scan a barcode, get a flip recommendation.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the cards on stdout stay readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    dotenv().ok();
    let config = ScannerConfig::from_env()?;
    let logger = Arc::new(TracingLogger::new("scanner-cli"));

    let mut client = EbayClient::new(config.app_id.clone(), config.timeout)?
        .with_global_id(Some(config.global_id.clone()));
    if let Some(base_url) = &config.base_url {
        client = client.with_base_url(base_url.clone());
    }

    let remote: Option<Arc<dyn ScanBatchStore>> = match &config.database_url {
        Some(url) => {
            let pool = create_postgres_pool(&DatabaseConfig::new(url.clone())).await?;
            run_migrations(&pool, &config.migrations_path).await?;
            Some(Arc::new(ScanBatchStorePostgres::new(pool)) as Arc<dyn ScanBatchStore>)
        }
        None => None,
    };

    let repository = Arc::new(JsonFileHistoryRepository::new(&config.history_dir));
    let buffer = load_history(repository.as_ref(), config.history, logger.as_ref()).await?;

    let lookup = Arc::new(LookupPriceUseCaseImpl {
        listings: Arc::new(SoldListingsEbay::new(client)),
        settings: config.lookup,
        logger: logger.clone(),
    });
    let record = Arc::new(RecordScanUseCaseImpl {
        buffer: buffer.clone(),
        repository: repository.clone(),
        logger: logger.clone(),
    });
    let flush = Arc::new(FlushHistoryUseCaseImpl {
        buffer,
        repository,
        remote,
        logger: logger.clone(),
    });

    let mut session = ScanSession::new(
        Arc::new(LineScanSource::stdin()?),
        lookup,
        record,
        flush,
        logger,
    );

    println!("FlipScan: scan or type a barcode, Ctrl-D to quit");
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    run_scanner(
        &mut session,
        shutdown,
        config.lookup.window_months,
        &mut std::io::stdout(),
    )
    .await
}

/// Prints one card per scan until input ends or `shutdown` resolves.
///
/// The session is stopped on every exit path. The stdin reader lives on its
/// own thread, so returning here never waits for a pending line.
async fn run_scanner<F, W>(
    session: &mut ScanSession,
    shutdown: F,
    window_months: u32,
    out: &mut W,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
    W: Write,
{
    tokio::pin!(shutdown);

    let result = loop {
        let outcome = tokio::select! {
            outcome = session.run_once() => outcome,
            _ = &mut shutdown => break Ok(()),
        };

        match outcome {
            Ok(ScanOutcome::Exhausted) => break Ok(()),
            Ok(outcome) => {
                if let Err(e) = writeln!(out, "\n{}\n", render::card(&outcome, window_months)) {
                    break Err(e.into());
                }
            }
            Err(e) => break Err(e.into()),
        }
    };

    session.stop();
    result
}
