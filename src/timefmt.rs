//! Wire formats for dates and times: `YYYY-MM-DD` and `HH:MM`
//! (`HH:MM:SS` accepted on input, since TIME columns round-trip that way).

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Time};

const HHMM: &[FormatItem<'static>] = format_description!("[hour]:[minute]");
const HHMMSS: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const YMD: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_time(s: &str) -> Option<Time> {
    Time::parse(s, HHMM).or_else(|_| Time::parse(s, HHMMSS)).ok()
}

pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s, YMD).ok()
}

pub fn format_time(t: Time) -> String {
    // Infallible for these items; fall back to Debug just in case.
    t.format(HHMM).unwrap_or_else(|_| format!("{t:?}"))
}

pub fn format_date(d: Date) -> String {
    d.format(YMD).unwrap_or_else(|_| format!("{d:?}"))
}

/// `#[serde(with = "timefmt::hhmm")]` for `Time` fields.
pub mod hhmm {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Time;

    pub fn serialize<S: Serializer>(t: &Time, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_time(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Time, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time: {raw}")))
    }
}

/// `#[serde(with = "timefmt::ymd")]` for `Date` fields.
pub mod ymd {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(d: &Date, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_date(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(de)?;
        super::parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn parses_hhmm_and_hhmmss() {
        assert_eq!(parse_time("09:00"), Some(time!(09:00)));
        assert_eq!(parse_time("16:30:00"), Some(time!(16:30)));
        assert_eq!(parse_time("9am"), None);
        assert_eq!(parse_time("25:00"), None);
    }

    #[test]
    fn formats_hhmm() {
        assert_eq!(format_time(time!(08:05)), "08:05");
        assert_eq!(format_time(time!(16:00)), "16:00");
    }

    #[test]
    fn parses_and_formats_dates() {
        assert_eq!(parse_date("2025-03-17"), Some(date!(2025 - 03 - 17)));
        assert_eq!(parse_date("17/03/2025"), None);
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(format_date(date!(2025 - 03 - 17)), "2025-03-17");
    }
}
