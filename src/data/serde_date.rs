//! Serde adapters for dates in config files: written as `YYYY-MM-DDTHH:MM:SS`,
//! read from either that form or a bare `YYYY-MM-DD`.

use crate::calc::date_math::{parse_date, CalendarDate};
use serde::{de::Error, Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn serialize<S: Serializer>(date: &CalendarDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format(FORMAT))
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<CalendarDate, D::Error> {
    let raw = String::deserialize(d)?;
    parse_date(&raw).map_err(D::Error::custom)
}

pub mod opt {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<CalendarDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::serialize(date, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<CalendarDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) => parse_date(&raw).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
