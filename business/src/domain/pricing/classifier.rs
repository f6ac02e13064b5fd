use super::model::{AveragePrice, PriceSummary, RawPrice, RecommendationTier};

/// Minimum (sold count, average in cents) per tier, strongest first.
const TIER_THRESHOLDS: [(RecommendationTier, usize, u64); 3] = [
    (RecommendationTier::Premium, 5, 150_00),
    (RecommendationTier::Buy, 3, 50_00),
    (RecommendationTier::Maybe, 1, 20_00),
];

/// Aggregates raw sold prices into an average, a count and a tier.
///
/// Business rules:
/// - Only finite, strictly positive prices are retained
/// - The average is the exact mean of retained prices, rounded half-up to the cent
/// - No retained prices -> 0.00, count 0, Skip
///
/// Total over its input: never fails, never panics.
pub fn summarize(prices: &[RawPrice]) -> PriceSummary {
    let retained: Vec<u128> = prices.iter().filter_map(RawPrice::micros).collect();
    let sold_count = retained.len();
    let total = retained
        .iter()
        .fold(0u128, |total, micros| total.saturating_add(*micros));
    let average = AveragePrice::from_mean_micros(total, sold_count);

    PriceSummary {
        average,
        sold_count,
        tier: classify(sold_count, average),
    }
}

/// Maps a (count, average) pair to a tier. First matching rule wins.
pub fn classify(sold_count: usize, average: AveragePrice) -> RecommendationTier {
    TIER_THRESHOLDS
        .iter()
        .find(|(_, min_count, min_cents)| sold_count >= *min_count && average.cents() >= *min_cents)
        .map(|(tier, _, _)| *tier)
        .unwrap_or(RecommendationTier::Skip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn amounts(values: &[f64]) -> Vec<RawPrice> {
        values.iter().copied().map(RawPrice::from).collect()
    }

    #[test]
    fn should_recommend_buy_when_five_sales_average_below_premium() {
        let summary = summarize(&amounts(&[100.0, 120.0, 140.0, 160.0, 180.0]));

        assert_eq!(summary.sold_count, 5);
        assert_eq!(summary.average.to_string(), "140.00");
        assert_eq!(summary.tier, RecommendationTier::Buy);
    }

    #[test]
    fn should_skip_when_no_prices() {
        let summary = summarize(&[]);

        assert_eq!(summary.sold_count, 0);
        assert_eq!(summary.average.to_string(), "0.00");
        assert_eq!(summary.tier, RecommendationTier::Skip);
    }

    #[test]
    fn should_discard_invalid_and_non_positive_prices() {
        let prices = vec![
            RawPrice::Amount(0.0),
            RawPrice::Amount(-5.0),
            RawPrice::from("bad"),
            RawPrice::Missing,
            RawPrice::Amount(200.0),
        ];

        let summary = summarize(&prices);

        assert_eq!(summary.sold_count, 1);
        assert_eq!(summary.average.to_string(), "200.00");
        assert_eq!(summary.tier, RecommendationTier::Maybe);
    }

    #[test]
    fn should_parse_textual_prices() {
        let summary = summarize(&[RawPrice::from("12.50"), RawPrice::from("27.50")]);

        assert_eq!(summary.sold_count, 2);
        assert_eq!(summary.average.to_string(), "20.00");
        assert_eq!(summary.tier, RecommendationTier::Maybe);
    }

    #[test]
    fn should_apply_tier_thresholds_inclusively() {
        assert_eq!(
            classify(5, AveragePrice::from_cents(150_00)),
            RecommendationTier::Premium
        );
        assert_eq!(
            classify(4, AveragePrice::from_cents(500_00)),
            RecommendationTier::Buy
        );
        assert_eq!(
            classify(3, AveragePrice::from_cents(50_00)),
            RecommendationTier::Buy
        );
        assert_eq!(
            classify(2, AveragePrice::from_cents(50_00)),
            RecommendationTier::Maybe
        );
        assert_eq!(
            classify(1, AveragePrice::from_cents(19_99)),
            RecommendationTier::Skip
        );
        assert_eq!(
            classify(0, AveragePrice::from_cents(1_000_00)),
            RecommendationTier::Skip
        );
    }

    #[test]
    fn should_classify_on_rounded_average() {
        // mean is 19.99609375, which rounds up to 20.00
        let summary = summarize(&amounts(&[19.9921875, 20.0]));

        assert_eq!(summary.average.to_string(), "20.00");
        assert_eq!(summary.tier, RecommendationTier::Maybe);
    }

    #[test]
    fn should_round_exact_half_cent_mean_up() {
        let summary = summarize(&[RawPrice::from("19.99"), RawPrice::from("20.00")]);

        assert_eq!(summary.average.to_string(), "20.00");
        assert_eq!(summary.tier, RecommendationTier::Maybe);
    }

    #[test]
    fn should_round_half_cent_means_of_numeric_prices_up() {
        assert_eq!(summarize(&amounts(&[10.00, 10.01])).average.to_string(), "10.01");
        assert_eq!(summarize(&amounts(&[1.19, 1.20])).average.to_string(), "1.20");
        assert_eq!(summarize(&amounts(&[0.57, 0.58])).average.to_string(), "0.58");
    }

    #[test]
    fn should_saturate_instead_of_zeroing_huge_prices() {
        let summary = summarize(&amounts(&[1e308, 1e308]));

        assert_eq!(summary.sold_count, 2);
        assert_eq!(summary.average.cents(), u64::MAX);
        assert_eq!(summary.tier, RecommendationTier::Maybe);
    }

    fn raw_price() -> impl Strategy<Value = RawPrice> {
        prop_oneof![
            (-1_000.0f64..10_000.0).prop_map(RawPrice::Amount),
            (0.01f64..10_000.0).prop_map(|v| RawPrice::Text(format!("{:.2}", v))),
            "[a-z]{0,6}".prop_map(RawPrice::Text),
            Just(RawPrice::Amount(0.0)),
            Just(RawPrice::Missing),
        ]
    }

    proptest! {
        #[test]
        fn sold_count_matches_positive_entries(prices in prop::collection::vec(raw_price(), 0..40)) {
            let expected = prices.iter().filter(|p| p.micros().is_some()).count();

            prop_assert_eq!(summarize(&prices).sold_count, expected);
        }

        #[test]
        fn average_is_rounded_mean_of_positive_entries(
            values in prop::collection::vec(0.01f64..10_000.0, 1..40)
        ) {
            let mean = values.iter().sum::<f64>() / values.len() as f64;

            let summary = summarize(&amounts(&values));

            let average = summary.average.cents() as f64 / 100.0;
            prop_assert!((average - mean).abs() <= 0.005 + 1e-6);
        }

        #[test]
        fn two_cent_prices_average_half_up(a in 1u64..1_000_000, b in 1u64..1_000_000) {
            let text = |cents: u64| RawPrice::Text(format!("{}.{:02}", cents / 100, cents % 100));
            let expected = (a + b + 1) / 2;

            let from_text = summarize(&[text(a), text(b)]);
            let from_numbers = summarize(&amounts(&[a as f64 / 100.0, b as f64 / 100.0]));

            prop_assert_eq!(from_text.average.cents(), expected);
            prop_assert_eq!(from_numbers.average.cents(), expected);
        }

        #[test]
        fn no_positive_entries_means_skip(values in prop::collection::vec(-1_000.0f64..=0.0, 0..20)) {
            let summary = summarize(&amounts(&values));

            prop_assert_eq!(summary.sold_count, 0);
            prop_assert_eq!(summary.average, AveragePrice::ZERO);
            prop_assert_eq!(summary.tier, RecommendationTier::Skip);
        }

        #[test]
        fn tier_never_drops_when_count_grows(count in 0usize..20, extra in 0usize..20, cents in 0u64..500_00) {
            let average = AveragePrice::from_cents(cents);

            prop_assert!(classify(count + extra, average) >= classify(count, average));
        }

        #[test]
        fn tier_never_drops_when_average_grows(count in 0usize..20, cents in 0u64..500_00, extra in 0u64..500_00) {
            let lower = classify(count, AveragePrice::from_cents(cents));
            let higher = classify(count, AveragePrice::from_cents(cents + extra));

            prop_assert!(higher >= lower);
        }

        #[test]
        fn summarize_is_deterministic(prices in prop::collection::vec(raw_price(), 0..40)) {
            prop_assert_eq!(summarize(&prices), summarize(&prices));
        }
    }
}
