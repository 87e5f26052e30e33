use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Week bucket for an event timestamp, using its UTC calendar date.
pub fn week_bucket(ts: DateTime<Utc>) -> NaiveDate {
    week_start(ts.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sunday_is_its_own_bucket() {
        // 2024-01-07 is a Sunday
        assert_eq!(week_start(date(2024, 1, 7)), date(2024, 1, 7));
    }

    #[test]
    fn test_saturday_rolls_back_six_days() {
        assert_eq!(week_start(date(2024, 1, 13)), date(2024, 1, 7));
    }

    #[test]
    fn test_bucket_crosses_month_and_year() {
        // Monday 2024-01-01 belongs to the week of Sunday 2023-12-31
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        assert_eq!(week_bucket(ts), date(2023, 12, 31));
    }
}
