use std::fmt::{self, Display};

use crate::{
    error::RouterError,
    query::{Query, QueryValue},
};

use super::Segment;

/// A parsed path pattern such as `/entity/[id]/attribute/[name]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern. Empty segments (doubled, leading or trailing `/`) are ignored.
    ///
    /// ```rust
    /// # use router_mock::route_definition::{Pattern, Segment};
    /// let pattern = Pattern::parse("/docs/[...slug]");
    /// assert_eq!(
    ///     pattern.segments(),
    ///     [Segment::Literal("docs".into()), Segment::CatchAll("slug".into())]
    /// );
    /// ```
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let segments = split_path(&text).map(Segment::parse).collect();
        Self { text, segments }
    }

    /// The text this pattern was parsed from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether `text` contains any dynamic or catch-all segment.
    pub fn has_placeholders(text: &str) -> bool {
        split_path(text).any(|s| Segment::parse(s).name().is_some())
    }

    /// Match a concrete `path` against this pattern.
    ///
    /// Returns the bound variables if every segment of the path and of the pattern was consumed.
    /// Dynamic segments bind a single string, catch-all segments bind a list.
    pub fn match_path(&self, path: &str) -> Option<Query> {
        let parts: Vec<&str> = split_path(path).collect();
        let mut rest = parts.as_slice();
        let mut bindings = Query::new();

        for (idx, segment) in self.segments.iter().enumerate() {
            let is_last = idx + 1 == self.segments.len();

            match segment {
                Segment::Literal(text) => {
                    let (first, tail) = rest.split_first()?;
                    if *first != text.as_str() {
                        return None;
                    }
                    rest = tail;
                }
                Segment::Dynamic(name) => {
                    let (first, tail) = rest.split_first()?;
                    bindings.insert(name, *first);
                    rest = tail;
                }
                Segment::CatchAll(name) => {
                    if !is_last || rest.is_empty() {
                        return None;
                    }
                    bindings.insert(name, rest.to_vec());
                    rest = &[];
                }
                Segment::OptionalCatchAll(name) => {
                    if !is_last {
                        return None;
                    }
                    if !rest.is_empty() {
                        bindings.insert(name, rest.to_vec());
                    }
                    rest = &[];
                }
            }
        }

        rest.is_empty().then_some(bindings)
    }

    /// Fill the placeholders of this pattern with `values`.
    ///
    /// Returns the concrete path together with the keys of `values` that were used. A catch-all
    /// given a single string is treated as a list with one entry.
    ///
    /// ```rust
    /// # use router_mock::{query::Query, route_definition::Pattern};
    /// let values: Query = [("id", "two"), ("four", "4")].into_iter().collect();
    /// let (path, used) = Pattern::parse("/one/[id]/three").interpolate(&values).unwrap();
    /// assert_eq!(path, "/one/two/three");
    /// assert_eq!(used, ["id"]);
    /// ```
    ///
    /// # Errors
    /// [`RouterError::MissingParam`] if a dynamic or (non-optional) catch-all segment has no value.
    pub fn interpolate(&self, values: &Query) -> Result<(String, Vec<String>), RouterError> {
        let mut pieces = Vec::new();
        let mut consumed = Vec::new();

        for piece in self.text.split('/') {
            if piece.is_empty() {
                pieces.push(String::new());
                continue;
            }

            match Segment::parse(piece) {
                Segment::Literal(text) => pieces.push(text),
                Segment::Dynamic(name) | Segment::CatchAll(name) => {
                    let value = values.get(&name).ok_or_else(|| RouterError::MissingParam {
                        param: name.clone(),
                        pattern: self.text.clone(),
                    })?;
                    pieces.push(join_segments(value));
                    consumed.push(name);
                }
                Segment::OptionalCatchAll(name) => {
                    if let Some(value) = values.get(&name) {
                        pieces.push(join_segments(value));
                        consumed.push(name);
                    }
                }
            }
        }

        let mut path = pieces.join("/");
        if path.is_empty() && self.text.starts_with('/') {
            path.push('/');
        }

        Ok((path, consumed))
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn join_segments(value: &QueryValue) -> String {
    value.segments().join("/")
}

pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
