use std::fmt;

use indexmap::IndexMap;

/// An ordered mapping from statistic names to values.
///
/// Records are the common currency for reporting results: any result type can be turned into a
/// record, and records can be concatenated to report several statistics for the same input.
///
/// When displayed, a record is printed as tab-separated `name=value` pairs, using the precision
/// of the formatter if given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record(IndexMap<&'static str, f64>);

impl Record {
    /// Appends the statistics of another record.
    ///
    /// Statistics with names already in the record are overwritten in place.
    pub fn extend<R>(&mut self, other: R)
    where
        R: Into<Record>,
    {
        self.0.extend(other.into().0)
    }

    /// Returns the value of a statistic by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Inserts a statistic, returning the previous value if present.
    pub fn insert(&mut self, name: &'static str, value: f64) -> Option<f64> {
        self.0.insert(name, value)
    }

    /// Returns `true` if the record has no statistics.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over names and values in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.0.iter().map(|(&name, &value)| (name, value))
    }

    /// Returns the number of statistics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over names in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Returns an iterator over values in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().copied()
    }
}

impl FromIterator<(&'static str, f64)> for Record {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, f64)>,
    {
        Self(IndexMap::from_iter(iter))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            match f.precision() {
                Some(precision) => write!(f, "{name}={value:.precision$}")?,
                None => write!(f, "{name}={value}")?,
            }
        }
        Ok(())
    }
}
