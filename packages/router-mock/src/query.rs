//! The query part of a location, and how query values from different sources are merged.

use std::fmt::{self, Display};

use indexmap::IndexMap;

/// A single query value.
///
/// Values read from a query string are always [`QueryValue::Single`]. Catch-all bindings produce a
/// [`QueryValue::List`] with one entry per path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum QueryValue {
    /// A plain string value.
    Single(String),
    /// An ordered list of values.
    List(Vec<String>),
}

impl QueryValue {
    /// Get the value as a string, if it is a [`QueryValue::Single`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Get the value as a list of segments.
    ///
    /// A single value is treated as a list with one entry.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::List(l) => l.iter().map(String::as_str).collect(),
        }
    }
}

impl Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(s) => f.write_str(s),
            Self::List(l) => f.write_str(&l.join("/")),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for QueryValue {
    fn from(value: Vec<S>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for QueryValue {
    fn from(value: [S; N]) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String> + Clone> From<&[S]> for QueryValue {
    fn from(value: &[S]) -> Self {
        Self::List(value.iter().cloned().map(Into::into).collect())
    }
}

/// An insertion ordered mapping from query keys to [`QueryValue`]s.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps the position it was
/// first inserted at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Query {
    entries: IndexMap<String, QueryValue>,
}

impl Query {
    /// Create an empty [`Query`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing the value of an existing key in place.
    ///
    /// Returns the previous value for `key`, if there was one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Option<QueryValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get the value for `key`.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.get(key)
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`, shifting later entries forward.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.entries.shift_remove(key)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copy every entry of `other` into `self`.
    ///
    /// Existing keys keep their position and take the value from `other`. New keys are appended in
    /// the order of `other`. No key is ever removed.
    pub fn overlay(&mut self, other: &Query) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut query = Query::new();
        query.extend(iter);
        query
    }
}

impl<K, V> Extend<(K, V)> for Query
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Query {
    type Item = (String, QueryValue);
    type IntoIter = indexmap::map::IntoIter<String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Merge the query sources of a navigation.
///
/// Precedence from lowest to highest: `bindings` extracted from a matched pattern, the output of
/// a custom path parser, and the `explicit` query of the navigation target.
pub fn compose(bindings: &Query, parsed: &Query, explicit: &Query) -> Query {
    let mut query = Query::new();
    query.overlay(bindings);
    query.overlay(parsed);
    query.overlay(explicit);
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(query: &Query) -> Vec<&str> {
        query.keys().collect()
    }

    #[test]
    fn insert_keeps_first_position() {
        let mut q = Query::new();
        q.insert("a", "1");
        q.insert("b", "2");
        assert_eq!(q.insert("a", "3"), Some(QueryValue::from("1")));

        assert_eq!(keys(&q), ["a", "b"]);
        assert_eq!(q.get("a"), Some(&QueryValue::from("3")));
    }

    #[test]
    fn remove_shifts_entries() {
        let mut q: Query = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(q.remove("b"), Some(QueryValue::from("2")));
        assert_eq!(q.remove("b"), None);
        assert_eq!(keys(&q), ["a", "c"]);
    }

    #[test]
    fn extend_replaces_in_place() {
        let mut q: Query = [("a", "1"), ("b", "2")].into_iter().collect();
        q.extend([("c", "3"), ("a", "4")]);

        assert_eq!(keys(&q), ["a", "b", "c"]);
        assert_eq!(q.get("a"), Some(&QueryValue::from("4")));
        assert!(q.contains_key("c"));
        assert_eq!(
            q.into_iter().map(|(k, _)| k).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
    }

    #[test]
    fn explicit_beats_parser_beats_bindings() {
        let bindings: Query = [("id", "pattern"), ("only_pattern", "p")].into_iter().collect();
        let parsed: Query = [("id", "parser"), ("only_parser", "x")].into_iter().collect();
        let explicit: Query = [("id", "explicit")].into_iter().collect();

        let q = compose(&bindings, &parsed, &explicit);
        assert_eq!(q.get("id"), Some(&QueryValue::from("explicit")));
        assert_eq!(keys(&q), ["id", "only_pattern", "only_parser"]);

        let q = compose(&bindings, &parsed, &Query::new());
        assert_eq!(q.get("id"), Some(&QueryValue::from("parser")));
    }

    #[test]
    fn compose_empty() {
        let empty = Query::new();
        assert!(compose(&empty, &empty, &empty).is_empty());
    }

    #[test]
    fn single_value_as_segments() {
        assert_eq!(QueryValue::from("one").segments(), ["one"]);
        assert_eq!(QueryValue::from(vec!["a", "b"]).segments(), ["a", "b"]);
        assert_eq!(QueryValue::from(vec!["a", "b"]).to_string(), "a/b");
    }
}
