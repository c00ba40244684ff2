//! Unix timestamp conversion, a small utility bundled with the CLI.

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::Error;

/// Display format for converted times, e.g. `2009-11-10 23:00:00 +0000 UTC`.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z %Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeTransform {
    #[default]
    UnixStampToTime,
}

impl FromStr for TimeTransform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unixStampToTime" => Ok(TimeTransform::UnixStampToTime),
            other => Err(Error::UnsupportedTimeTransform(other.to_string())),
        }
    }
}

/// Convert seconds since the Unix epoch to a UTC date-time.
pub fn unix_stamp_to_time(secs: i64) -> Result<DateTime<Utc>, Error> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or(Error::InvalidTimestamp(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_epoch() {
        let t = unix_stamp_to_time(0).unwrap();
        assert_eq!(t.format(TIME_FORMAT).to_string(), "1970-01-01 00:00:00 +0000 UTC");
    }

    #[test]
    fn test_known_stamps() {
        let t = unix_stamp_to_time(1_257_894_000).unwrap();
        assert_eq!(t.format(TIME_FORMAT).to_string(), "2009-11-10 23:00:00 +0000 UTC");

        let t = unix_stamp_to_time(-86_400).unwrap();
        assert_eq!(t.format(TIME_FORMAT).to_string(), "1969-12-31 00:00:00 +0000 UTC");
    }

    #[test]
    fn test_out_of_range() {
        let err = unix_stamp_to_time(i64::MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp(i64::MAX)));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_transform_parse() {
        assert_eq!(
            "unixStampToTime".parse::<TimeTransform>().unwrap(),
            TimeTransform::UnixStampToTime
        );
        let err = "timeToUnixStamp".parse::<TimeTransform>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
