use serde::{Deserialize, Serialize};

/// Shown in place of an average when the lookup itself failed.
pub const UNAVAILABLE_PRICE: &str = "N/A";

/// A sold price as reported by the marketplace, before filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPrice {
    Amount(f64),
    Text(String),
    Missing,
}

const MICROS_PER_UNIT: u128 = 1_000_000;
const MICROS_PER_CENT: u128 = 10_000;
/// Largest single price held exactly. Anything above saturates here.
const MAX_PRICE_MICROS: u128 = u64::MAX as u128 * MICROS_PER_CENT;

impl RawPrice {
    /// The price in millionths of a unit when it is a finite, strictly positive number.
    ///
    /// Decimal text is converted digit by digit, so `"19.99"` is exactly
    /// `19_990_000`. Numbers go through their shortest decimal rendering.
    pub fn micros(&self) -> Option<u128> {
        match self {
            RawPrice::Amount(value) if is_positive(*value) => decimal_micros(&value.to_string()),
            RawPrice::Amount(_) | RawPrice::Missing => None,
            RawPrice::Text(text) => {
                let text = text.trim();
                let value: f64 = text.parse().ok()?;
                if !is_positive(value) {
                    return None;
                }
                if is_plain_decimal(text) {
                    decimal_micros(text)
                } else {
                    decimal_micros(&value.to_string())
                }
            }
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_plain_decimal(text: &str) -> bool {
    let digits = text.strip_prefix('+').unwrap_or(text);
    let (units, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    !(units.is_empty() && fraction.is_empty()) && all_digits(units) && all_digits(fraction)
}

/// Converts a plain decimal to millionths, rounding the seventh decimal half-up.
fn decimal_micros(text: &str) -> Option<u128> {
    let digits = text.strip_prefix('+').unwrap_or(text);
    let (units, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let mut whole: u128 = 0;
    for c in units.chars() {
        whole = whole
            .saturating_mul(10)
            .saturating_add(c.to_digit(10)? as u128);
    }

    let mut part: u128 = 0;
    let mut fraction_digits = fraction.chars();
    for _ in 0..6 {
        let digit = match fraction_digits.next() {
            Some(c) => c.to_digit(10)?,
            None => 0,
        };
        part = part * 10 + digit as u128;
    }
    let round_up = match fraction_digits.next() {
        Some(c) => c.to_digit(10)? >= 5,
        None => false,
    };

    let micros = whole
        .saturating_mul(MICROS_PER_UNIT)
        .saturating_add(part)
        .saturating_add(round_up as u128);
    Some(micros.min(MAX_PRICE_MICROS))
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Amount(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_string())
    }
}

/// Non-negative amount stored as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AveragePrice(u64);

impl AveragePrice {
    pub const ZERO: AveragePrice = AveragePrice(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Mean of `count` prices totalling `total_micros`, rounded to the cent
    /// with halves going up. Integer maths only.
    pub fn from_mean_micros(total_micros: u128, count: usize) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        let divisor = (count as u128).saturating_mul(2 * MICROS_PER_CENT);
        let cents = total_micros
            .saturating_mul(2)
            .saturating_add(divisor / 2)
            / divisor;
        Self(u64::try_from(cents).unwrap_or(u64::MAX))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AveragePrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::str::FromStr for AveragePrice {
    type Err = String;

    /// Accepts plain decimals with at most two fractional digits, e.g. `"140"`, `"19.5"`, `"0.00"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid average price: {}", s);
        let trimmed = s.trim();
        let (units, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if units.is_empty() || !all_digits(units) || fraction.len() > 2 || !all_digits(fraction) {
            return Err(invalid());
        }

        let units: u64 = units.parse().map_err(|_| invalid())?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<u64>().map_err(|_| invalid())?,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(AveragePrice)
            .ok_or_else(invalid)
    }
}

/// Recommendation tiers, ordered from weakest to strongest resale signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Skip,
    Maybe,
    Buy,
    Premium,
}

impl std::fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationTier::Skip => write!(f, "skip"),
            RecommendationTier::Maybe => write!(f, "maybe"),
            RecommendationTier::Buy => write!(f, "buy"),
            RecommendationTier::Premium => write!(f, "premium"),
        }
    }
}

/// Aggregated price signal for one barcode.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub average: AveragePrice,
    pub sold_count: usize,
    pub tier: RecommendationTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_only_positive_finite_prices() {
        assert_eq!(RawPrice::Amount(12.5).micros(), Some(12_500_000));
        assert_eq!(RawPrice::from(" 19.99 ").micros(), Some(19_990_000));
        assert_eq!(RawPrice::from("1e3").micros(), Some(1_000_000_000));
        assert_eq!(RawPrice::Amount(0.0).micros(), None);
        assert_eq!(RawPrice::Amount(-5.0).micros(), None);
        assert_eq!(RawPrice::Amount(f64::NAN).micros(), None);
        assert_eq!(RawPrice::Amount(f64::INFINITY).micros(), None);
        assert_eq!(RawPrice::from("bad").micros(), None);
        assert_eq!(RawPrice::from("inf").micros(), None);
        assert_eq!(RawPrice::from("-0.50").micros(), None);
        assert_eq!(RawPrice::Missing.micros(), None);
    }

    #[test]
    fn should_convert_decimals_exactly() {
        assert_eq!(RawPrice::Amount(19.99).micros(), Some(19_990_000));
        assert_eq!(RawPrice::Amount(0.57).micros(), Some(570_000));
        assert_eq!(RawPrice::from("19.9921875").micros(), Some(19_992_188));
        assert_eq!(RawPrice::from("+3.5").micros(), Some(3_500_000));
    }

    #[test]
    fn should_saturate_huge_prices() {
        let max = u64::MAX as u128 * 10_000;

        assert_eq!(RawPrice::Amount(1e308).micros(), Some(max));
        assert_eq!(RawPrice::from("1e300").micros(), Some(max));
    }

    #[test]
    fn should_format_average_with_two_decimals() {
        assert_eq!(AveragePrice::from_cents(14000).to_string(), "140.00");
        assert_eq!(AveragePrice::from_cents(5).to_string(), "0.05");
        assert_eq!(AveragePrice::ZERO.to_string(), "0.00");
    }

    #[test]
    fn should_round_mean_half_up_to_the_cent() {
        assert_eq!(AveragePrice::from_mean_micros(10_125_000, 1).cents(), 1013);
        assert_eq!(AveragePrice::from_mean_micros(10_124_999, 1).cents(), 1012);
        assert_eq!(AveragePrice::from_mean_micros(20_010_000, 2).cents(), 1001);
        assert_eq!(AveragePrice::from_mean_micros(2_390_000, 2).cents(), 120);
        assert_eq!(AveragePrice::from_mean_micros(0, 0), AveragePrice::ZERO);
    }

    #[test]
    fn should_cap_average_at_largest_cent_value() {
        let max = u64::MAX as u128 * 10_000;

        assert_eq!(AveragePrice::from_mean_micros(2 * max, 2).cents(), u64::MAX);
    }

    #[test]
    fn should_parse_average_price_strings() {
        assert_eq!("140.00".parse::<AveragePrice>(), Ok(AveragePrice::from_cents(14000)));
        assert_eq!("19.5".parse::<AveragePrice>(), Ok(AveragePrice::from_cents(1950)));
        assert_eq!("7".parse::<AveragePrice>(), Ok(AveragePrice::from_cents(700)));
        assert!("N/A".parse::<AveragePrice>().is_err());
        assert!("-1.00".parse::<AveragePrice>().is_err());
        assert!("1.234".parse::<AveragePrice>().is_err());
        assert!(".50".parse::<AveragePrice>().is_err());
    }

    #[test]
    fn should_order_tiers_from_skip_to_premium() {
        assert!(RecommendationTier::Skip < RecommendationTier::Maybe);
        assert!(RecommendationTier::Maybe < RecommendationTier::Buy);
        assert!(RecommendationTier::Buy < RecommendationTier::Premium);
    }
}
