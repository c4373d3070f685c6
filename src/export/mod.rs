//! Export serializers for generated reports
//!
//! Both exporters are pure functions over a [`ReportData`]: deterministic
//! for identical input and never mutating the report.

pub mod csv;
pub mod document;

pub use csv::*;
pub use document::*;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;

use crate::reports::ReportPeriod;

/// Render an amount with exactly two decimals, half-up
pub(crate) fn money(amount: &BigDecimal) -> String {
    amount.with_scale_round(2, RoundingMode::HalfUp).to_string()
}

/// Report-facing date format, e.g. "Jan 5, 2026"
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Period label, e.g. "Jan 5, 2026 - Feb 4, 2026"
pub(crate) fn format_period(period: ReportPeriod) -> String {
    format!(
        "{} - {}",
        format_date(period.start),
        format_date(period.end)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn money_always_shows_two_decimals() {
        assert_eq!(money(&BigDecimal::from(5)), "5.00");
        assert_eq!(money(&BigDecimal::from_str("1250.5").unwrap()), "1250.50");
        assert_eq!(money(&BigDecimal::from_str("0.005").unwrap()), "0.01");
        assert_eq!(money(&BigDecimal::from_str("-430.00").unwrap()), "-430.00");
    }

    #[test]
    fn dates_use_unpadded_day() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2026");
    }
}
