//! Splitting raw `path?query` strings apart and putting them back together.

use std::borrow::Cow;

use tracing::warn;
use urlencoding::{decode, encode};

use crate::query::{Query, QueryValue};

/// Split `raw` into its decoded path and query.
///
/// Everything before the first `?` is the path. The rest is read as `&` separated `key=value`
/// pairs. A key without `=` maps to an empty string, and a repeated key overwrites the earlier
/// value without moving it.
///
/// Nothing here fails: text that is not valid percent-encoding is kept as it is.
///
/// ```rust
/// # use router_mock::url::parse_url;
/// let (path, query) = parse_url("/search?q=rust%20router&page=2&q=mock");
/// assert_eq!(path, "/search");
/// assert_eq!(query.keys().collect::<Vec<_>>(), ["q", "page"]);
/// assert_eq!(query.get("q").and_then(|v| v.as_str()), Some("mock"));
/// ```
pub fn parse_url(raw: &str) -> (String, Query) {
    let (path, query) = match raw.split_once('?') {
        Some((path, query)) => (path, query),
        None => (raw, ""),
    };

    (decode_component(path).into_owned(), parse_query(query))
}

/// Parse the part of a URL after the `?`.
pub fn parse_query(raw: &str) -> Query {
    let mut query = Query::new();

    for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        query.insert(decode_component(key), decode_component(value).into_owned());
    }

    query
}

/// Append `query` to `path`.
///
/// An empty query leaves the path untouched. Keys and values are percent-encoded, and a list value
/// repeats its key once per entry.
///
/// ```rust
/// # use router_mock::{query::Query, url::format_url};
/// let query: Query = [("four", "4"), ("name", "a b")].into_iter().collect();
/// assert_eq!(format_url("/one", &query), "/one?four=4&name=a%20b");
/// assert_eq!(format_url("/one", &Query::new()), "/one");
/// ```
pub fn format_url(path: &str, query: &Query) -> String {
    if query.is_empty() {
        return path.to_string();
    }

    format!("{path}?{}", encode_query(query))
}

/// Encode `query` without the leading `?`.
pub fn encode_query(query: &Query) -> String {
    let mut pairs = Vec::with_capacity(query.len());

    for (key, value) in query.iter() {
        let key = encode(key);
        match value {
            QueryValue::Single(v) => pairs.push(format!("{key}={}", encode(v))),
            QueryValue::List(list) => {
                pairs.extend(list.iter().map(|v| format!("{key}={}", encode(v))));
            }
        }
    }

    pairs.join("&")
}

fn decode_component(raw: &str) -> Cow<'_, str> {
    match decode(raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(raw, %err, "failed to decode url component, keeping it verbatim");
            Cow::Borrowed(raw)
        }
    }
}
