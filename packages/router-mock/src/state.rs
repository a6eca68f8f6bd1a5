use crate::{
    query::Query, route_definition::PatternRegistry, router_cfg::PathParser,
    scheduler::Completion,
};

/// The current location of a router.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Location {
    /// The path as navigated to. For structured targets this keeps any placeholders.
    pub pathname: String,
    /// The concrete path plus query string, as it would appear in an address bar.
    pub as_path: String,
    /// All query values, including values bound from the path.
    pub query: Query,
    /// The active locale.
    pub locale: Option<String>,
}

/// Everything a router owns besides its listeners.
pub(crate) struct RouterState {
    pub(crate) location: Location,
    pub(crate) locales: Vec<String>,
    pub(crate) path_parser: Option<PathParser>,
    pub(crate) completion: Completion,
    pub(crate) registry: PatternRegistry,
}

/// Run `parser` on `path`, if there is one.
///
/// Callers hold a clone of the parser rather than a borrow of the state, so the parser may call
/// back into the router.
pub(crate) fn parse_path(parser: Option<&PathParser>, path: &str) -> Query {
    parser.and_then(|parser| parser(path)).unwrap_or_default()
}
