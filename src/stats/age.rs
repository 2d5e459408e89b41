use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.25;

/// Whole years between midnight UTC on `dob` and `now`, using 365.25-day years.
///
/// The fixed-length year drifts against the calendar, so the age can tick
/// over a day early or late around a birthday. Future birth dates give a
/// negative age.
pub fn age_on(dob: NaiveDate, now: DateTime<Utc>) -> i64 {
    let born = dob.and_time(NaiveTime::MIN).and_utc();
    let elapsed = (now - born).num_milliseconds() as f64;
    (elapsed / MILLIS_PER_YEAR).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_age_mid_year() {
        assert_eq!(age_on(date(2000, 1, 1), at(2026, 10, 19, 12)), 26);
    }

    #[test]
    fn test_age_day_before_birthday() {
        assert_eq!(age_on(date(2000, 6, 15), at(2026, 6, 14, 12)), 25);
    }

    #[test]
    fn test_age_same_day_is_zero() {
        assert_eq!(age_on(date(2026, 10, 19), at(2026, 10, 19, 23)), 0);
    }

    #[test]
    fn test_age_future_dob_is_negative() {
        assert_eq!(age_on(date(2027, 1, 1), at(2026, 10, 19, 0)), -1);
    }

    #[test]
    fn test_age_lags_on_birthday_after_short_years() {
        // 2001-03-01 to 2002-03-01 is 365 days, short of 365.25.
        assert_eq!(age_on(date(2001, 3, 1), at(2002, 3, 1, 0)), 0);
        assert_eq!(age_on(date(2001, 3, 1), at(2002, 3, 1, 6)), 1);
    }

    #[test]
    fn test_age_exact_over_four_year_cycle() {
        // Four years spanning one leap day is exactly 4 * 365.25 days.
        assert_eq!(age_on(date(2000, 1, 1), at(2004, 1, 1, 0)), 4);
    }
}
