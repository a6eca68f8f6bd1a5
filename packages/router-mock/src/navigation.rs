//! Types relating to navigation.

use crate::query::{Query, QueryValue};

/// A structured navigation target.
///
/// The `pathname` may contain placeholders like `[id]`. They are filled in from `query` when the
/// display path (`asPath`) is built, while `pathname` itself is recorded verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlObject {
    /// The path, possibly containing placeholders.
    pub pathname: String,
    /// Query values, including the values of any placeholders.
    pub query: Query,
}

impl UrlObject {
    /// Create a target for `pathname` with an empty query.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            query: Query::new(),
        }
    }

    /// Add a query value.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Replace the query.
    pub fn with_query(self, query: Query) -> Self {
        Self { query, ..self }
    }
}

/// A target for the router to navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A raw `path?query` string.
    Path(String),
    /// A pathname with a separate query.
    Url(UrlObject),
}

impl From<&str> for NavigationTarget {
    fn from(value: &str) -> Self {
        Self::Path(value.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(value: String) -> Self {
        Self::Path(value)
    }
}

impl From<&String> for NavigationTarget {
    fn from(value: &String) -> Self {
        Self::Path(value.clone())
    }
}

impl From<UrlObject> for NavigationTarget {
    fn from(value: UrlObject) -> Self {
        Self::Url(value)
    }
}

/// Options for a single navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationOptions {
    /// Passed through to route change listeners.
    pub shallow: bool,
    /// If set, becomes the router's current locale.
    pub locale: Option<String>,
}

impl NavigationOptions {
    /// Mark the navigation as shallow.
    pub fn shallow(self, shallow: bool) -> Self {
        Self { shallow, ..self }
    }

    /// Switch to `locale` as part of the navigation.
    pub fn locale(self, locale: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            ..self
        }
    }
}
