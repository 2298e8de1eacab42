//! ISO-8601 timestamps as the API sends and accepts them.
//!
//! Inbound values come in several shapes (`2024-04-28`, `20240428`, `2024-04-28T13:28`,
//! `2024-04-28T13:28:06`, `2024-04-28T13:28:06.440Z`, `…+02:00`). Values without a zone
//! designator are taken as UTC. Outbound values always use millisecond precision with a
//! literal `T` and no designator.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Some(naive) = value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        return parse_naive(naive).map(|naive| naive.and_utc());
    }

    if has_offset(value) {
        return ZONED_FORMATS.iter().find_map(|format| {
            DateTime::<FixedOffset>::parse_from_str(value, format)
                .ok()
                .map(|zoned| zoned.with_timezone(&Utc))
        });
    }

    parse_naive(value).map(|naive| naive.and_utc())
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format(WIRE_FORMAT).to_string()
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    if !value.contains('T') {
        return DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
            .map(|date| date.and_time(NaiveTime::MIN));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// An offset can only follow the time part; the date part has dashes of its own.
fn has_offset(value: &str) -> bool {
    value
        .split_once('T')
        .is_some_and(|(_, time)| time.contains(['+', '-']))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn all_documented_shapes_parse_to_the_same_date() {
        for input in [
            "2024-04-28",
            "20240428",
            "2024-04-28T13:28",
            "2024-04-28T13:28:06",
            "2024-04-28T13:28:06.440",
            "2024-04-28T13:28:06.440Z",
            "2024-04-28T15:28:06.440+02:00",
        ] {
            let parsed = parse_timestamp(input).unwrap_or_else(|| panic!("{input} should parse"));
            assert_eq!(
                parsed.date_naive(),
                NaiveDate::from_ymd_opt(2024, 4, 28).unwrap(),
                "{input}"
            );
        }
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let parsed = parse_timestamp("2015-04-04T14:40:56.656+02:00").unwrap();
        assert_eq!(parsed.hour(), 12);
        assert_eq!(parsed.minute(), 40);
        assert_eq!(parsed.timestamp_subsec_millis(), 656);

        let compact = parse_timestamp("2015-04-04T14:40:56+0200").unwrap();
        assert_eq!(compact.hour(), 12);
    }

    #[test]
    fn date_only_is_midnight_utc() {
        let parsed = parse_timestamp("2024-04-28").unwrap();
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (0, 0, 0));
        assert_eq!(parsed.day(), 28);
    }

    #[test]
    fn malformed_values_are_rejected() {
        for input in [
            "2024-13-40",
            "2024-02-30",
            "28/04/2024",
            "20241340",
            "2024428",
            "2024-04-28T25:00",
            "",
            "yesterday",
        ] {
            assert!(parse_timestamp(input).is_none(), "{input} should not parse");
        }
    }

    #[test]
    fn formats_with_milliseconds_and_no_designator() {
        let parsed = parse_timestamp("2024-04-28T13:28:06.44Z").unwrap();
        assert_eq!(format_timestamp(&parsed), "2024-04-28T13:28:06.440");

        let midnight = parse_timestamp("2024-04-28").unwrap();
        assert_eq!(format_timestamp(&midnight), "2024-04-28T00:00:00.000");
    }
}
