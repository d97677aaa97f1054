use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};

/// A set-valued column persisted as a comma-delimited string. The stored order
/// is not significant; reading a column back always yields the same set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet<T: Ord>(BTreeSet<T>);

impl<T: Ord> TagSet<T> {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Ord> Default for TagSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for TagSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Ord + fmt::Display> fmt::Display for TagSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            tag.fmt(f)?;
        }
        Ok(())
    }
}

impl<T: Ord + FromStr> FromStr for TagSet<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(T::from_str)
            .collect()
    }
}

#[cfg(feature = "backend")]
impl<T: Ord + fmt::Display> ToSql for TagSet<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(self.to_string().into()))
    }
}

#[cfg(feature = "backend")]
impl<T: Ord + FromStr> FromSql for TagSet<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: T::Err| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(feature = "backend")]
impl<T: Ord + fmt::Display> From<&TagSet<T>> for sea_query::Value {
    fn from(value: &TagSet<T>) -> Self {
        value.to_string().into()
    }
}

#[cfg(feature = "backend")]
impl<T: Ord + fmt::Display> From<TagSet<T>> for sea_query::Value {
    fn from(value: TagSet<T>) -> Self {
        value.to_string().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_independent_of_order() {
        let a: TagSet<String> = "cardio,strength".parse().unwrap();
        let b: TagSet<String> = "strength,cardio".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn empty_string_is_empty_set() {
        let set: TagSet<String> = "".parse().unwrap();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "");
    }

    #[test]
    fn trims_whitespace_and_drops_empty_segments() {
        let set: TagSet<String> = " a, b ,,c".parse().unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "a,b,c");
    }
}
