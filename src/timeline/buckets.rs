use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

/// Every time bucket is placed on this day so that only the time of day differs between them.
pub const REFERENCE_DAY: NaiveDate = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();

/// Calendar date of the timestamp in its own offset, at midnight.
pub fn date_bucket<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDateTime {
    timestamp.naive_local().date().and_time(NaiveTime::MIN)
}

/// Time of day of the timestamp in its own offset, truncated to the second and placed on
/// [REFERENCE_DAY].
pub fn time_bucket<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDateTime {
    let time = timestamp.naive_local().time();
    REFERENCE_DAY.and_time(truncate_to_second(time))
}

fn truncate_to_second(time: NaiveTime) -> NaiveTime {
    // with_nanosecond(0) is always in range
    time.with_nanosecond(0).unwrap_or(time)
}

/// Two parallel sequences: `dates[i]` and `times[i]` always come from the same message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Buckets {
    dates: Vec<NaiveDateTime>,
    times: Vec<NaiveDateTime>,
}

impl Buckets {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dates: Vec::with_capacity(capacity),
            times: Vec::with_capacity(capacity),
        }
    }

    pub fn from_timestamps<'a>(
        timestamps: impl IntoIterator<Item = &'a DateTime<FixedOffset>>,
    ) -> Self {
        let mut buckets = Self::default();
        for timestamp in timestamps {
            buckets.push(timestamp);
        }
        buckets
    }

    pub fn push<Tz: TimeZone>(&mut self, timestamp: &DateTime<Tz>) {
        self.dates.push(date_bucket(timestamp));
        self.times.push(time_bucket(timestamp));
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDateTime] {
        &self.dates
    }

    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    pub fn points(&self) -> impl Iterator<Item = (NaiveDateTime, NaiveDateTime)> + '_ {
        self.dates.iter().copied().zip(self.times.iter().copied())
    }

    /// Earliest and latest date bucket. [None] when there are no messages.
    pub fn date_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.dates.iter().min()?;
        let max = self.dates.iter().max()?;
        Some((*min, *max))
    }
}
