pub mod buckets;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Can't parse timestamp {0:?}")]
    Unparseable(String),

    #[error("Timezone offset of {0} minutes is out of range")]
    OffsetOutOfRange(i32),
}

/// Timezone offset exactly as Discord stores it. The value is in minutes and has the opposite
/// sign of a normal UTC offset: -60 means UTC+1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneSetting(i32);

impl TimezoneSetting {
    pub fn new(stored_minutes: i32) -> Self {
        Self(stored_minutes)
    }

    pub fn offset(&self) -> Result<FixedOffset, TimestampError> {
        self.0
            .checked_neg()
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .ok_or(TimestampError::OffsetOutOfRange(self.0))
    }

    pub fn label(&self) -> String {
        zone_label(self.0)
    }
}

/// Formats a stored Discord offset as `UTC±H` or `UTC±H:MM`.
pub fn zone_label(stored_minutes: i32) -> String {
    let utc_minutes = -(stored_minutes as i64);
    let sign = if utc_minutes < 0 { '-' } else { '+' };
    let hours = utc_minutes.abs() / 60;
    let minutes = utc_minutes.abs() % 60;
    if minutes == 0 {
        format!("UTC{sign}{hours}")
    } else {
        format!("UTC{sign}{hours}:{minutes:02}")
    }
}

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a message timestamp. Discord writes them either with an explicit offset
/// (`2021-03-05 12:34:56.123000+00:00`) or, in newer exports, without one. The latter are UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let text = text.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Ok(value);
    }
    if let Some(value) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Ok(value);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|value| value.and_utc().fixed_offset())
        .ok_or_else(|| TimestampError::Unparseable(text.to_string()))
}

/// Moves a timestamp into the user's offset. The instant stays the same.
pub fn normalize<Tz: chrono::TimeZone>(
    timestamp: DateTime<Tz>,
    offset: FixedOffset,
) -> DateTime<FixedOffset> {
    timestamp.with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};

    use super::{normalize, parse_timestamp, zone_label, TimestampError, TimezoneSetting};

    fn to_utc(timestamp: &DateTime<FixedOffset>) -> DateTime<Utc> {
        timestamp.with_timezone(&Utc)
    }

    #[test]
    fn zone_label_examples() {
        assert_eq!(zone_label(0), "UTC+0");
        assert_eq!(zone_label(-60), "UTC+1");
        assert_eq!(zone_label(330), "UTC-5:30");
        assert_eq!(zone_label(-330), "UTC+5:30");
        assert_eq!(zone_label(300), "UTC-5");
        assert_eq!(zone_label(-345), "UTC+5:45");
        assert_eq!(zone_label(30), "UTC-0:30");
        assert_eq!(zone_label(-5), "UTC+0:05");
    }

    #[test]
    fn zone_label_always_signed() {
        for minutes in (-24 * 60..=24 * 60).step_by(15) {
            let label = zone_label(minutes);
            let sign = label.chars().nth(3).unwrap();
            assert!(sign == '+' || sign == '-', "{label}");
        }
    }

    #[test]
    fn offset_inverts_sign() {
        assert_eq!(
            TimezoneSetting::new(-60).offset(),
            Ok(FixedOffset::east_opt(3600).unwrap())
        );
        assert_eq!(
            TimezoneSetting::new(330).offset(),
            Ok(FixedOffset::west_opt(330 * 60).unwrap())
        );
    }

    #[test]
    fn offset_out_of_range() {
        assert_eq!(
            TimezoneSetting::new(-24 * 60).offset(),
            Err(TimestampError::OffsetOutOfRange(-24 * 60))
        );
        assert_eq!(
            TimezoneSetting::new(i32::MIN).offset(),
            Err(TimestampError::OffsetOutOfRange(i32::MIN))
        );
    }

    #[test]
    fn parses_discord_formats() {
        let expected = Utc.with_ymd_and_hms(2021, 3, 5, 12, 34, 56).unwrap();

        for text in [
            "2021-03-05 12:34:56+00:00",
            "2021-03-05 12:34:56.000000+00:00",
            "2021-03-05 13:34:56.000+0100",
            "2021-03-05T12:34:56Z",
            "2021-03-05T07:34:56-05:00",
            "2021-03-05 12:34:56",
            "2021-03-05T12:34:56.000",
        ] {
            let parsed = parse_timestamp(text).unwrap();
            assert_eq!(to_utc(&parsed), expected, "{text}");
        }
    }

    #[test]
    fn keeps_fraction_of_second() {
        let parsed = parse_timestamp("2021-03-05 12:34:56.750000+00:00").unwrap();
        assert_eq!(parsed.nanosecond(), 750_000_000);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_timestamp("yesterday"),
            Err(TimestampError::Unparseable("yesterday".into()))
        );
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn normalize_round_trip() {
        let offset = TimezoneSetting::new(-120).offset().unwrap();
        let original = parse_timestamp("2020-12-31 23:30:00.5+00:00").unwrap();
        let normalized = normalize(original, offset);

        assert_eq!(normalized.offset(), &offset);
        assert_eq!(
            normalized.naive_local(),
            NaiveDate::from_ymd_opt(2021, 1, 1)
                .unwrap()
                .and_hms_milli_opt(1, 30, 0, 500)
                .unwrap()
        );

        let formatted = normalized.to_rfc3339();
        assert!(formatted.ends_with("+02:00"), "{formatted}");
        let reparsed = DateTime::parse_from_rfc3339(&formatted).unwrap();
        assert_eq!(reparsed, original);
        assert_eq!(to_utc(&reparsed), to_utc(&original));
    }

    #[test]
    fn normalize_uses_profile_offset() {
        let offset = TimezoneSetting::new(330).offset().unwrap();
        let value = normalize(parse_timestamp("2022-07-01 03:00:00+00:00").unwrap(), offset);
        assert_eq!(value.offset().local_minus_utc(), -330 * 60);
        assert_eq!(value.hour(), 21);
        assert_eq!(value.minute(), 30);
    }
}
