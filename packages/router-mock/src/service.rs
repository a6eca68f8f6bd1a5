use std::{
    cell::RefCell,
    fmt,
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use tracing::trace;

use crate::{
    error::RouterError,
    events::{EventBus, EventOptions, RouterEvent},
    navigation::{NavigationOptions, NavigationTarget, UrlObject},
    query::{compose, Query},
    route_definition::{Pattern, PatternRegistry},
    router_cfg::RouterConfig,
    scheduler::{Completion, Scheduled, Transition},
    state::{parse_path, Location, RouterState},
    url::{format_url, parse_url},
};

struct RouterInner {
    state: RefCell<RouterState>,
    events: EventBus,
}

/// An in-memory router.
///
/// The router only knows the current location; there is no back or forward stack. Cloning a
/// [`MemoryRouter`] yields another handle to the same router.
///
/// ```rust
/// # use router_mock::prelude::*;
/// # futures::executor::block_on(async {
/// let router = MemoryRouter::new();
/// router
///     .push(UrlObject::new("/one/[id]/three").query("id", "two").query("four", "4"))
///     .await
///     .unwrap();
///
/// assert_eq!(router.pathname(), "/one/[id]/three");
/// assert_eq!(router.as_path(), "/one/two/three?four=4");
/// assert_eq!(router.query().keys().collect::<Vec<_>>(), ["four", "id"]);
/// # });
/// ```
#[derive(Clone)]
pub struct MemoryRouter {
    inner: Rc<RouterInner>,
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRouter {
    /// Create a router with the default [`RouterConfig`].
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create a router from `cfg`.
    pub fn with_config(cfg: RouterConfig) -> Self {
        let RouterConfig {
            locales,
            default_locale,
            asynchronous,
            path_parser,
        } = cfg;

        let state = RouterState {
            location: Location {
                locale: default_locale,
                ..Default::default()
            },
            locales,
            path_parser,
            completion: Completion::from_asynchronous(asynchronous),
            registry: PatternRegistry::new(),
        };

        Self {
            inner: Rc::new(RouterInner {
                state: RefCell::new(state),
                events: EventBus::new(),
            }),
        }
    }

    /// The current path including the query string.
    pub fn as_path(&self) -> String {
        self.inner.state.borrow().location.as_path.clone()
    }

    /// The current pathname.
    pub fn pathname(&self) -> String {
        self.inner.state.borrow().location.pathname.clone()
    }

    /// The current query.
    pub fn query(&self) -> Query {
        self.inner.state.borrow().location.query.clone()
    }

    /// The current locale.
    pub fn locale(&self) -> Option<String> {
        self.inner.state.borrow().location.locale.clone()
    }

    /// A snapshot of the whole current location.
    pub fn location(&self) -> Location {
        self.inner.state.borrow().location.clone()
    }

    /// The locales the router knows about.
    pub fn locales(&self) -> Vec<String> {
        self.inner.state.borrow().locales.clone()
    }

    /// Replace the list of known locales.
    pub fn set_locales<I, S>(&self, locales: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.state.borrow_mut().locales = locales.into_iter().map(Into::into).collect();
    }

    /// Switch between immediate and deferred completion for future navigations.
    pub fn set_asynchronous(&self, asynchronous: bool) {
        self.inner.state.borrow_mut().completion = Completion::from_asynchronous(asynchronous);
    }

    /// Whether navigations complete on a later poll.
    pub fn is_asynchronous(&self) -> bool {
        self.inner.state.borrow().completion == Completion::Deferred
    }

    /// Use `parser` to derive query values from the path of every navigation.
    pub fn set_path_parser(&self, parser: impl Fn(&str) -> Option<Query> + 'static) {
        self.inner.state.borrow_mut().path_parser = Some(Rc::new(parser));
    }

    /// Stop using a custom path parser.
    pub fn clear_path_parser(&self) {
        self.inner.state.borrow_mut().path_parser = None;
    }

    /// Replace the registered path patterns.
    ///
    /// Paths pushed as strings are matched against these patterns, and the variables of the first
    /// matching pattern are added to the query.
    pub fn register_paths<I, S>(&self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.state.borrow_mut().registry.register(patterns);
    }

    /// The registered path patterns, in registration order.
    pub fn registered_paths(&self) -> Vec<String> {
        self.inner
            .state
            .borrow()
            .registry
            .patterns()
            .iter()
            .map(|p| p.as_str().to_string())
            .collect()
    }

    /// The route change listeners of this router.
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Navigate to `target`.
    pub fn push(&self, target: impl Into<NavigationTarget>) -> Navigation {
        self.navigate("push", target.into(), None, NavigationOptions::default())
    }

    /// Navigate to `target` with an alias path and [`NavigationOptions`].
    ///
    /// The alias is accepted for compatibility and does not affect the resulting location.
    pub fn push_with(
        &self,
        target: impl Into<NavigationTarget>,
        alias: Option<&str>,
        options: NavigationOptions,
    ) -> Navigation {
        self.navigate("push", target.into(), alias, options)
    }

    /// Navigate to `target`, replacing the current location.
    ///
    /// Without a history stack this behaves exactly like [`MemoryRouter::push`].
    pub fn replace(&self, target: impl Into<NavigationTarget>) -> Navigation {
        self.navigate("replace", target.into(), None, NavigationOptions::default())
    }

    /// [`MemoryRouter::replace`] with an alias path and [`NavigationOptions`].
    pub fn replace_with(
        &self,
        target: impl Into<NavigationTarget>,
        alias: Option<&str>,
        options: NavigationOptions,
    ) -> Navigation {
        self.navigate("replace", target.into(), alias, options)
    }

    /// Accepted for parity with real routers. Does nothing.
    pub async fn prefetch(&self, target: impl Into<NavigationTarget>) {
        let target = target.into();
        trace!(?target, "prefetch ignored");
    }

    fn navigate(
        &self,
        method: &'static str,
        target: NavigationTarget,
        alias: Option<&str>,
        options: NavigationOptions,
    ) -> Navigation {
        trace!(method, ?target, shallow = options.shallow, "navigate");
        if let Some(alias) = alias {
            trace!(alias, "alias path does not affect the location");
        }

        let completion = self.inner.state.borrow().completion;

        let (pathname, as_path, query) = match self.resolve(target) {
            Ok(resolved) => resolved,
            Err(err) => {
                trace!(%err, "navigation aborted");
                return Navigation {
                    inner: NavigationInner::Failed(Some(err)),
                };
            }
        };

        let change = RouteChange {
            router: self.inner.clone(),
            pathname,
            as_path,
            query,
            locale: options.locale,
            shallow: options.shallow,
        };

        Navigation {
            inner: NavigationInner::Scheduled(completion.run(change)),
        }
    }

    /// Work out `(pathname, asPath, query)` for `target` without touching the location.
    ///
    /// No borrow of the state is held while the path parser runs.
    fn resolve(&self, target: NavigationTarget) -> Result<(String, String, Query), RouterError> {
        match target {
            NavigationTarget::Path(raw) => {
                let (path, explicit) = parse_url(&raw);

                let (bindings, parser) = {
                    let state = self.inner.state.borrow();
                    // an unmatched path contributes no bindings
                    let bindings = state
                        .registry
                        .match_path(&path)
                        .map(|m| m.bindings)
                        .unwrap_or_default();
                    (bindings, state.path_parser.clone())
                };
                let parsed = parse_path(parser.as_ref(), &path);

                let query = compose(&bindings, &parsed, &explicit);
                let as_path = format_url(&path, &explicit);
                Ok((path, as_path, query))
            }
            NavigationTarget::Url(UrlObject {
                pathname,
                query: mut explicit,
            }) => {
                let (concrete, consumed) = if Pattern::has_placeholders(&pathname) {
                    Pattern::parse(pathname.as_str()).interpolate(&explicit)?
                } else {
                    (pathname.clone(), Vec::new())
                };

                // interpolated values live in the path, not the query string, but stay in the query
                let mut interpolated = Query::new();
                for key in consumed {
                    if let Some(value) = explicit.remove(&key) {
                        interpolated.insert(key, value);
                    }
                }

                let parser = self.inner.state.borrow().path_parser.clone();
                let parsed = parse_path(parser.as_ref(), &concrete);
                let mut query = compose(&Query::new(), &parsed, &explicit);
                query.overlay(&interpolated);

                let as_path = format_url(&concrete, &explicit);
                Ok((pathname, as_path, query))
            }
        }
    }
}

impl fmt::Debug for MemoryRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("MemoryRouter")
            .field("location", &state.location)
            .field("locales", &state.locales)
            .field("completion", &state.completion)
            .field("registry", &state.registry)
            .field("events", &self.inner.events)
            .finish()
    }
}

/// A resolved navigation waiting to be committed.
struct RouteChange {
    router: Rc<RouterInner>,
    pathname: String,
    as_path: String,
    query: Query,
    locale: Option<String>,
    shallow: bool,
}

impl RouteChange {
    fn emit(&self, event: RouterEvent) {
        let options = EventOptions {
            shallow: self.shallow,
        };
        self.router.events.emit(event, &self.as_path, options);
    }
}

impl Transition for RouteChange {
    fn commit(&self) {
        let mut state = self.router.state.borrow_mut();
        let location = &mut state.location;
        location.pathname = self.pathname.clone();
        location.as_path = self.as_path.clone();
        location.query = self.query.clone();
        if let Some(locale) = &self.locale {
            location.locale = Some(locale.clone());
        }
        trace!(as_path = %self.as_path, "location committed");
    }

    fn start(&self) {
        self.emit(RouterEvent::RouteChangeStart);
    }

    fn complete(&self) {
        self.emit(RouterEvent::RouteChangeComplete);
    }
}

enum NavigationInner {
    Scheduled(Scheduled<RouteChange>),
    Failed(Option<RouterError>),
}

/// A navigation started by [`MemoryRouter::push`] or [`MemoryRouter::replace`].
///
/// In immediate mode the navigation has already completed when this is returned. In asynchronous
/// mode it completes once awaited; dropping it earlier means the location is never committed.
#[must_use = "asynchronous navigations only complete when awaited"]
pub struct Navigation {
    inner: NavigationInner,
}

impl Navigation {
    /// Whether the navigation has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        match &self.inner {
            NavigationInner::Scheduled(scheduled) => scheduled.is_settled(),
            NavigationInner::Failed(_) => true,
        }
    }
}

impl Future for Navigation {
    type Output = Result<(), RouterError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            NavigationInner::Scheduled(scheduled) => Pin::new(scheduled).poll(cx).map(Ok),
            NavigationInner::Failed(err) => Poll::Ready(err.take().map_or(Ok(()), Err)),
        }
    }
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("settled", &self.is_settled())
            .finish()
    }
}
