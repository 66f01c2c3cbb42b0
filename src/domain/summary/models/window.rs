use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Half-open `[from, to)` interval covering one UTC day: `to` is the next
/// midnight, so records stamped at any sub-second precision belong to
/// exactly one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl ReportWindow {
    pub fn for_day(day: NaiveDate) -> Self {
        let from = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
        Self {
            from,
            to: from + Duration::days(1),
        }
    }

    pub fn today() -> Self {
        Self::for_day(Utc::now().date_naive())
    }

    /// The complete day preceding the one `instant` falls in.
    pub fn day_before(instant: DateTime<Utc>) -> Self {
        Self::for_day(instant.date_naive() - Duration::days(1))
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Exclusive upper bound.
    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }
}
