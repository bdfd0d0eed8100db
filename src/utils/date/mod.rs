// Civil date-time parsing and zone resolution

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::utils::error::{ConfigurationError, Result};

const CIVIL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A configured target before it has been pinned to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTarget {
    /// Wall-clock time with no offset; meaning depends on the configured zone.
    Civil(NaiveDateTime),
    /// The string carried its own offset, so it already names an instant.
    Absolute(DateTime<FixedOffset>),
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigurationError::InvalidTimezone {
            name: name.to_string(),
        })
}

pub fn parse_target(value: &str) -> Result<ParsedTarget> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigurationError::InvalidTarget {
            value: value.to_string(),
            reason: "empty string".into(),
        });
    }

    for format in CIVIL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ParsedTarget::Civil(naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(ParsedTarget::Civil(midnight));
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(ParsedTarget::Absolute)
        .map_err(|err| ConfigurationError::InvalidTarget {
            value: value.to_string(),
            reason: err.to_string(),
        })
}

/// Pins a civil time to `tz`. A time inside a DST fold resolves to the earlier
/// of the two instants; a time inside a DST gap is rejected.
pub fn resolve_in_zone(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ConfigurationError::NonexistentLocalTime {
            value: naive.to_string(),
            timezone: tz.name().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use test_case::test_case;

    #[test_case("2024-12-10T00:00:00" ; "iso seconds")]
    #[test_case("2024-12-10T00:00:00.250" ; "iso fractional")]
    #[test_case("2024-12-10 00:00:00" ; "space separated")]
    #[test_case("2024-12-10T00:00" ; "iso minutes")]
    #[test_case("2024-12-10" ; "bare date")]
    fn test_parse_civil_forms(input: &str) {
        match parse_target(input).unwrap() {
            ParsedTarget::Civil(naive) => {
                assert_eq!(naive.date(), NaiveDate::from_ymd_opt(2024, 12, 10).unwrap());
                assert_eq!(naive.hour(), 0);
            }
            other => panic!("expected civil time, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_absolute_with_offset() {
        let parsed = parse_target("2024-12-10T00:00:00+05:30").unwrap();
        assert!(matches!(parsed, ParsedTarget::Absolute(_)));
    }

    #[test_case("" ; "empty")]
    #[test_case("tomorrow" ; "word")]
    #[test_case("2024-13-40T00:00:00" ; "out of range")]
    fn test_parse_target_rejects(input: &str) {
        assert!(matches!(
            parse_target(input),
            Err(ConfigurationError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Kolkata").unwrap(), chrono_tz::Asia::Kolkata);
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(ConfigurationError::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn test_resolve_in_zone_applies_offset() {
        let naive = NaiveDate::from_ymd_opt(2024, 12, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let utc = resolve_in_zone(naive, chrono_tz::Asia::Kolkata).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 12, 9, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_resolve_in_zone_rejects_dst_gap() {
        // Clocks in New York jump from 02:00 to 03:00 on 2024-03-10.
        let naive = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        assert!(matches!(
            resolve_in_zone(naive, chrono_tz::America::New_York),
            Err(ConfigurationError::NonexistentLocalTime { .. })
        ));
    }

    #[test]
    fn test_resolve_in_zone_picks_earlier_in_fold() {
        // 01:30 happens twice in New York on 2024-11-03; EDT comes first.
        let naive = NaiveDate::from_ymd_opt(2024, 11, 3)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let utc = resolve_in_zone(naive, chrono_tz::America::New_York).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
    }
}
