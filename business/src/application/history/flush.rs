use std::sync::Arc;

use async_trait::async_trait;

use crate::application::history::buffer::HistoryBuffer;
use crate::domain::history::errors::HistoryError;
use crate::domain::history::model::FlushOutcome;
use crate::domain::history::repository::{HistoryRepository, ScanBatchStore};
use crate::domain::history::use_cases::flush::FlushHistoryUseCase;
use crate::domain::logger::Logger;

pub struct FlushHistoryUseCaseImpl {
    pub buffer: HistoryBuffer,
    pub repository: Arc<dyn HistoryRepository>,
    /// `None` when remote sync is not configured.
    pub remote: Option<Arc<dyn ScanBatchStore>>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl FlushHistoryUseCase for FlushHistoryUseCaseImpl {
    /// All-or-nothing: the buffer is cleared only after the remote batch write succeeds.
    async fn execute(&self) -> Result<FlushOutcome, HistoryError> {
        let Some(remote) = &self.remote else {
            return Ok(FlushOutcome::SyncDisabled);
        };

        let mut log = self.buffer.lock().await;
        if !log.is_flush_due() {
            return Ok(FlushOutcome::BelowThreshold);
        }

        let count = log.len();
        self.logger
            .info(&format!("Flushing {} history entries to remote store", count));

        if let Err(err) = remote.insert_batch(log.entries()).await {
            self.logger.error(&format!(
                "Remote batch write failed, keeping {} entries for retry: {}",
                count, err
            ));
            return Err(err.into());
        }

        log.clear();

        // A stale local file may resend this batch after a restart.
        if let Err(err) = self.repository.replace(&[]).await {
            self.logger.warn(&format!(
                "Flushed {} entries but could not clear the local history file: {}",
                count, err
            ));
        }

        self.logger.info(&format!("Flushed {} history entries", count));
        Ok(FlushOutcome::Flushed(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::history::model::{HistoryLog, HistorySettings, ScanResult};
    use crate::domain::pricing::model::AveragePrice;
    use chrono::Utc;
    use mockall::mock;
    use tokio::sync::Mutex;

    mock! {
        pub HistoryRepo {}

        #[async_trait]
        impl HistoryRepository for HistoryRepo {
            async fn load(&self) -> Result<Vec<ScanResult>, RepositoryError>;
            async fn replace(&self, entries: &[ScanResult]) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub BatchStore {}

        #[async_trait]
        impl ScanBatchStore for BatchStore {
            async fn insert_batch(&self, records: &[ScanResult]) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn buffer_of(len: usize) -> HistoryBuffer {
        let mut log = HistoryLog::new(HistorySettings::new(50, 3).unwrap());
        for i in 0..len {
            log.record(ScanResult::new(
                format!("code-{}", i),
                AveragePrice::from_cents(1000),
                1,
                Utc::now(),
            ));
        }
        Arc::new(Mutex::new(log))
    }

    #[tokio::test]
    async fn should_flush_whole_buffer_and_clear_it() {
        let mut remote = MockBatchStore::new();
        remote
            .expect_insert_batch()
            .withf(|records| records.len() == 3)
            .times(1)
            .returning(|_| Ok(()));
        let mut repo = MockHistoryRepo::new();
        repo.expect_replace()
            .withf(|entries| entries.is_empty())
            .times(1)
            .returning(|_| Ok(()));
        let buffer = buffer_of(3);

        let use_case = FlushHistoryUseCaseImpl {
            buffer: buffer.clone(),
            repository: Arc::new(repo),
            remote: Some(Arc::new(remote)),
            logger: mock_logger(),
        };

        let outcome = use_case.execute().await.unwrap();

        assert_eq!(outcome, FlushOutcome::Flushed(3));
        assert!(buffer.lock().await.is_empty());
    }

    #[tokio::test]
    async fn should_report_flushed_when_only_local_clear_fails() {
        let mut remote = MockBatchStore::new();
        remote.expect_insert_batch().times(1).returning(|_| Ok(()));
        let mut repo = MockHistoryRepo::new();
        repo.expect_replace()
            .times(1)
            .returning(|_| Err(RepositoryError::Persistence));
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        logger
            .expect_warn()
            .withf(|message| message.contains("could not clear"))
            .times(1)
            .returning(|_| ());
        let buffer = buffer_of(3);

        let use_case = FlushHistoryUseCaseImpl {
            buffer: buffer.clone(),
            repository: Arc::new(repo),
            remote: Some(Arc::new(remote)),
            logger: Arc::new(logger),
        };

        let outcome = use_case.execute().await.unwrap();

        assert_eq!(outcome, FlushOutcome::Flushed(3));
        assert!(buffer.lock().await.is_empty());
    }

    #[tokio::test]
    async fn should_not_flush_below_batch_size() {
        let mut remote = MockBatchStore::new();
        remote.expect_insert_batch().times(0);
        let buffer = buffer_of(2);

        let use_case = FlushHistoryUseCaseImpl {
            buffer: buffer.clone(),
            repository: Arc::new(MockHistoryRepo::new()),
            remote: Some(Arc::new(remote)),
            logger: mock_logger(),
        };

        let outcome = use_case.execute().await.unwrap();

        assert_eq!(outcome, FlushOutcome::BelowThreshold);
        assert_eq!(buffer.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn should_retain_buffer_when_remote_write_fails() {
        let mut remote = MockBatchStore::new();
        remote
            .expect_insert_batch()
            .returning(|_| Err(RepositoryError::DatabaseError));
        let mut repo = MockHistoryRepo::new();
        repo.expect_replace().times(0);
        let buffer = buffer_of(4);

        let use_case = FlushHistoryUseCaseImpl {
            buffer: buffer.clone(),
            repository: Arc::new(repo),
            remote: Some(Arc::new(remote)),
            logger: mock_logger(),
        };

        let result = use_case.execute().await;

        assert!(matches!(
            result.unwrap_err(),
            HistoryError::PersistenceFailed(RepositoryError::DatabaseError)
        ));
        let log = buffer.lock().await;
        assert_eq!(log.len(), 4);
        assert_eq!(log.entries()[0].barcode, "code-3");
    }

    #[tokio::test]
    async fn should_report_sync_disabled_without_remote_store() {
        let buffer = buffer_of(5);

        let use_case = FlushHistoryUseCaseImpl {
            buffer: buffer.clone(),
            repository: Arc::new(MockHistoryRepo::new()),
            remote: None,
            logger: mock_logger(),
        };

        let outcome = use_case.execute().await.unwrap();

        assert_eq!(outcome, FlushOutcome::SyncDisabled);
        assert_eq!(buffer.lock().await.len(), 5);
    }
}
