use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};

/// The canonical weekday keys workout assignments are slotted into. The set is
/// closed; the database stores the lowercase key string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub const fn key(&self) -> &'static str {
        use Weekday::*;
        match self {
            Monday => "monday",
            Tuesday => "tuesday",
            Wednesday => "wednesday",
            Thursday => "thursday",
            Friday => "friday",
            Saturday => "saturday",
            Sunday => "sunday",
        }
    }

    /// Display label for UIs; the data layer only ever sees `key`
    pub const fn label(&self) -> &'static str {
        use Weekday::*;
        match self {
            Monday => "Monday",
            Tuesday => "Tuesday",
            Wednesday => "Wednesday",
            Thursday => "Thursday",
            Friday => "Friday",
            Saturday => "Saturday",
            Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Error)]
#[error("{0:?} is not a weekday key")]
pub struct ParseWeekdayError(String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .iter()
            .find(|d| d.key() == s)
            .copied()
            .ok_or_else(|| ParseWeekdayError(s.to_owned()))
    }
}

#[cfg(feature = "backend")]
impl ToSql for Weekday {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.key()))
    }
}

#[cfg(feature = "backend")]
impl FromSql for Weekday {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: ParseWeekdayError| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(feature = "backend")]
impl From<Weekday> for sea_query::Value {
    fn from(value: Weekday) -> Self {
        value.key().into()
    }
}

#[cfg(feature = "backend")]
impl From<&Weekday> for sea_query::Value {
    fn from(value: &Weekday) -> Self {
        value.key().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(day.key().parse::<Weekday>().unwrap(), day);
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!("Monday".parse::<Weekday>().is_err());
        assert!("mon".parse::<Weekday>().is_err());
        assert!("".parse::<Weekday>().is_err());
    }
}
