//! Calendar date ranges at the request boundary.

use crate::error::DoraError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive `[from, to]` range of calendar days, interpreted in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DoraError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.from, raw.to)
    }
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DoraError> {
        if from > to {
            return Err(DoraError::inverted_range(
                &from.format(DATE_FORMAT).to_string(),
                &to.format(DATE_FORMAT).to_string(),
            ));
        }
        Ok(Self { from, to })
    }

    /// Parse `YYYY-MM-DD` bounds.
    pub fn parse(from: &str, to: &str) -> Result<Self, DoraError> {
        let from = parse_date(from)?;
        let to = parse_date(to)?;
        Self::new(from, to)
    }

    /// Midnight at the start of `from`.
    pub fn start(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.from.and_time(NaiveTime::MIN))
    }

    /// Midnight at the start of `to`. Used for period length.
    pub fn to_start(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.to.and_time(NaiveTime::MIN))
    }

    /// Last millisecond of `to` (23:59:59.999).
    pub fn end_of_day(&self) -> DateTime<Utc> {
        self.to_start() + Duration::days(1) - Duration::milliseconds(1)
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start() && ts <= self.end_of_day()
    }

    pub fn is_before_start(&self, ts: DateTime<Utc>) -> bool {
        ts < self.start()
    }

    /// Length of the range in days, never less than 1.
    pub fn period_days(&self) -> f64 {
        let millis = (self.to_start() - self.start()).num_milliseconds() as f64;
        (millis / (1000.0 * 60.0 * 60.0 * 24.0)).max(1.0)
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DoraError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DoraError::invalid_date(value))
}

/// Reporting windows relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    /// Monday through Sunday of the previous week.
    LastWeek,
    /// First through last day of the previous calendar month.
    LastMonth,
}

impl ReportPeriod {
    pub fn range_before(&self, today: NaiveDate) -> DateRange {
        match self {
            ReportPeriod::LastWeek => {
                let last_week = today - Duration::weeks(1);
                let monday =
                    last_week - Duration::days(last_week.weekday().num_days_from_monday() as i64);
                DateRange {
                    from: monday,
                    to: monday + Duration::days(6),
                }
            }
            ReportPeriod::LastMonth => {
                let first_of_this_month = today.with_day(1).unwrap_or(today);
                let last_of_prev = first_of_this_month - Duration::days(1);
                DateRange {
                    from: last_of_prev.with_day(1).unwrap_or(last_of_prev),
                    to: last_of_prev,
                }
            }
        }
    }
}
