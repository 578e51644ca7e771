use chrono::{Datelike, NaiveDate};

/// Day-of-month (1..=7) of the first Sunday of `month` in `year`, using the
/// proleptic Gregorian calendar.
///
/// Returns `None` only when the date cannot be represented, e.g. month 13.
pub fn first_sunday(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let weekday = first.weekday().num_days_from_sunday();
    Some((7 - weekday) % 7 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_months() {
        assert_eq!(first_sunday(2023, 1), Some(1));
        assert_eq!(first_sunday(2023, 3), Some(5));
        assert_eq!(first_sunday(2024, 2), Some(4));
        assert_eq!(first_sunday(2022, 12), Some(4));
        assert_eq!(first_sunday(2023, 4), Some(2));
    }

    #[test]
    fn cutoff_is_always_within_first_week() {
        for year in 1990..2040 {
            for month in 1..=12 {
                let day = first_sunday(year, month).expect("valid month");
                assert!((1..=7).contains(&day));
                let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid date");
                assert_eq!(date.weekday(), chrono::Weekday::Sun);
            }
        }
    }

    #[test]
    fn invalid_month_has_no_cutoff() {
        assert_eq!(first_sunday(2023, 0), None);
        assert_eq!(first_sunday(2023, 13), None);
    }
}
