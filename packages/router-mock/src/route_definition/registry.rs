use tracing::{debug, trace};

use crate::query::Query;

use super::Pattern;

/// A successful match of a concrete path against a registered [`Pattern`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// The pattern that matched.
    pub pattern: &'a Pattern,
    /// The variables bound by the pattern.
    pub bindings: Query,
}

/// The ordered list of patterns a router knows about.
#[derive(Clone, Debug, Default)]
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
}

impl PatternRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all registered patterns with `patterns`.
    ///
    /// Registration never accumulates: registering `["/a/[x]"]` and then `["/b/[y]"]` leaves only
    /// `/b/[y]` registered.
    pub fn register<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Pattern::parse).collect();
        debug!(
            patterns = ?self.patterns.iter().map(Pattern::as_str).collect::<Vec<_>>(),
            "registered paths"
        );
    }

    /// The registered patterns, in registration order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Find the first registered pattern matching `path`.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        let found = self.patterns.iter().find_map(|pattern| {
            pattern
                .match_path(path)
                .map(|bindings| RouteMatch { pattern, bindings })
        });

        match &found {
            Some(m) => trace!(path, pattern = %m.pattern, "path matched pattern"),
            None => trace!(path, "no registered pattern matched"),
        }

        found
    }
}
