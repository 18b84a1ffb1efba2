//! Age computation for the main counter.
//!
//! The counter is a fractional year count derived from the stored birthday,
//! recomputed on every repaint. The app requests a repaint every
//! [`REFRESH_INTERVAL_MS`] while a birthday is set, so the displayed value
//! ticks at roughly 20 Hz without a dedicated timer thread.

use chrono::{DateTime, NaiveDate, Utc};

/// Repaint cadence of the counter view.
pub const REFRESH_INTERVAL_MS: u64 = 50;

/// Milliseconds in a mean Julian year.
const MS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Elapsed time since `birthday` (taken at midnight UTC) in fractional years.
pub fn age_in_years(birthday: NaiveDate, now: DateTime<Utc>) -> f64 {
    let birth_ms = birthday
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default();
    (now.timestamp_millis() - birth_ms) as f64 / MS_PER_YEAR
}

/// Format the age with a fixed number of fractional digits.
///
/// Digit counts at the top of the supported range exceed what the millisecond
/// clock can actually resolve; the trailing digits are then a formatting
/// artifact, which matches the displayed-precision contract.
pub fn format_age(birthday: NaiveDate, now: DateTime<Utc>, decimal_digits: u8) -> String {
    format!("{:.*}", decimal_digits as usize, age_in_years(birthday, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_exactly_one_julian_year() {
        let birth = date(2000, 1, 1);
        // 365.25 days = 365 days + 6 hours
        let now = Utc.with_ymd_and_hms(2000, 12, 31, 6, 0, 0).unwrap();
        let age = age_in_years(birth, now);
        assert!((age - 1.0).abs() < 1e-9, "age was {age}");
    }

    #[test]
    fn test_age_non_negative_for_past_birthdays() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        for birth in [date(1950, 6, 15), date(2000, 2, 29), date(2026, 8, 25)] {
            assert!(age_in_years(birth, now) >= 0.0);
        }
    }

    #[test]
    fn test_format_digit_count() {
        let birth = date(1990, 3, 14);
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 9, 30, 0).unwrap();
        for digits in 8..=12u8 {
            let s = format_age(birth, now, digits);
            let (_, frac) = s.split_once('.').expect("no decimal point");
            assert_eq!(frac.len(), digits as usize, "wrong digit count in {s}");
        }
    }

    #[test]
    fn test_format_is_fixed_point() {
        let birth = date(2020, 1, 1);
        let now = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_age(birth, now, 8), "0.00000000");
    }
}
