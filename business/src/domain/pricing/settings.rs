use chrono::{Months, NaiveDate};

pub const DEFAULT_WINDOW_MONTHS: u32 = 6;
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// Largest page the Finding API serves.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Lookup parameters injected at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupSettings {
    pub window_months: u32,
    pub page_size: u32,
}

impl LookupSettings {
    /// Builds settings, clamping the page size to `1..=MAX_PAGE_SIZE`
    /// and the window to at least one month.
    pub fn new(window_months: u32, page_size: u32) -> Self {
        Self {
            window_months: window_months.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// First day of the trailing window ending on `today`.
    ///
    /// Month arithmetic clamps to the last valid day, so 31 August minus
    /// six months is the last day of February.
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(self.window_months))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MONTHS, DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_start_window_six_months_back() {
        let settings = LookupSettings::default();

        assert_eq!(settings.window_start(date(2026, 10, 18)), date(2026, 4, 18));
        assert_eq!(settings.window_start(date(2026, 3, 1)), date(2025, 9, 1));
    }

    #[test]
    fn should_clamp_window_start_to_end_of_month() {
        let settings = LookupSettings::default();

        assert_eq!(settings.window_start(date(2026, 8, 31)), date(2026, 2, 28));
        assert_eq!(settings.window_start(date(2028, 8, 31)), date(2028, 2, 29));
    }

    #[test]
    fn should_clamp_page_size_and_window() {
        let settings = LookupSettings::new(0, 500);

        assert_eq!(settings.window_months, 1);
        assert_eq!(settings.page_size, MAX_PAGE_SIZE);
        assert_eq!(LookupSettings::new(6, 0).page_size, 1);
    }
}
