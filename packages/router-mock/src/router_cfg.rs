use std::{fmt, rc::Rc};

use crate::query::Query;

/// A custom parser that derives extra query values from the path of a navigation.
///
/// Returning [`None`] contributes nothing.
pub type PathParser = Rc<dyn Fn(&str) -> Option<Query>>;

/// Global configuration options for the router.
///
/// This implements [`Default`] and follows the builder pattern, so you can use it like this:
/// ```rust
/// # use router_mock::prelude::*;
/// let cfg = RouterConfig::default()
///     .locales(["en", "fr"])
///     .asynchronous(true);
///
/// let router = MemoryRouter::with_config(cfg);
/// assert_eq!(router.locales(), ["en", "fr"]);
/// ```
#[derive(Clone, Default)]
pub struct RouterConfig {
    pub(crate) locales: Vec<String>,
    pub(crate) default_locale: Option<String>,
    pub(crate) asynchronous: bool,
    pub(crate) path_parser: Option<PathParser>,
}

impl RouterConfig {
    /// The locales the router knows about.
    ///
    /// Defaults to an empty list.
    pub fn locales<I, S>(self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// The locale the router starts out with.
    ///
    /// Defaults to [`None`].
    pub fn default_locale(self, locale: impl Into<String>) -> Self {
        Self {
            default_locale: Some(locale.into()),
            ..self
        }
    }

    /// Whether navigations complete on a later poll instead of immediately.
    ///
    /// With `true`, `routeChangeStart` still fires as soon as a navigation is requested, but the
    /// new location is only committed, and `routeChangeComplete` only fired, once the returned
    /// navigation is awaited.
    ///
    /// Defaults to [`false`].
    pub fn asynchronous(self, asynchronous: bool) -> Self {
        Self {
            asynchronous,
            ..self
        }
    }

    /// A parser that contributes query values for every navigation.
    ///
    /// Its output overrides values bound by registered patterns, and is overridden by the query of
    /// the navigation target itself.
    ///
    /// Defaults to [`None`].
    pub fn path_parser(self, parser: impl Fn(&str) -> Option<Query> + 'static) -> Self {
        Self {
            path_parser: Some(Rc::new(parser)),
            ..self
        }
    }
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("locales", &self.locales)
            .field("default_locale", &self.default_locale)
            .field("asynchronous", &self.asynchronous)
            .field("path_parser", &self.path_parser.is_some())
            .finish()
    }
}
