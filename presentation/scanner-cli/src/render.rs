use business::application::scan::session::ScanOutcome;
use business::domain::pricing::model::RecommendationTier;

pub fn tier_label(tier: RecommendationTier) -> &'static str {
    match tier {
        RecommendationTier::Premium => "⭐ PREMIUM GEM!",
        RecommendationTier::Buy => "✅ BUY – Good Flip",
        RecommendationTier::Maybe => "❓ Maybe",
        RecommendationTier::Skip => "❌ Don't Bother",
    }
}

/// Recommendation card printed after each scan.
pub fn card(outcome: &ScanOutcome, window_months: u32) -> String {
    let (headline, barcode) = match outcome {
        ScanOutcome::Priced {
            barcode, summary, ..
        } => (tier_label(summary.tier), barcode),
        ScanOutcome::Failed { barcode, .. } => ("eBay lookup failed", barcode),
        ScanOutcome::Exhausted => return String::new(),
    };

    let mut lines = vec![
        format!("${} AUD", outcome.display_price()),
        format!("{} sold ({} mo)", outcome.display_count(), window_months),
        headline.to_string(),
        format!("Barcode: {}", barcode),
    ];
    if let ScanOutcome::Priced { saved: false, .. } = outcome {
        lines.push("(not saved to history)".to_string());
    }
    lines.join("\n")
}
