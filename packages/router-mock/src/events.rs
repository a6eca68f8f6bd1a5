//! Route change notifications.

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::{self, Display},
    rc::Rc,
    str::FromStr,
};

use tracing::trace;

/// The events a router emits around every navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouterEvent {
    /// `routeChangeStart`: a navigation began.
    RouteChangeStart,
    /// `routeChangeComplete`: a navigation finished and the new location is current.
    RouteChangeComplete,
}

impl RouterEvent {
    /// The name listeners know this event by.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RouteChangeStart => "routeChangeStart",
            Self::RouteChangeComplete => "routeChangeComplete",
        }
    }
}

impl Display for RouterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The name passed to [`RouterEvent::from_str`] is not a known event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown router event: {0}")]
pub struct UnknownEvent(String);

impl FromStr for RouterEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "routeChangeStart" => Ok(Self::RouteChangeStart),
            "routeChangeComplete" => Ok(Self::RouteChangeComplete),
            other => Err(UnknownEvent(other.to_string())),
        }
    }
}

/// Extra information passed to every route change listener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOptions {
    /// Whether the navigation was shallow.
    pub shallow: bool,
}

/// A listener for route change events. It receives the new `asPath` and the [`EventOptions`].
///
/// Listeners are compared by pointer, so keep a clone of the [`Rc`] around to be able to
/// [`EventBus::off`] it later.
pub type RouteChangeHandler = Rc<dyn Fn(&str, EventOptions)>;

/// A small publish/subscribe hub keyed by [`RouterEvent`].
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<HashMap<RouterEvent, Vec<RouteChangeHandler>>>,
}

impl EventBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to `event`.
    ///
    /// The same handler may be registered more than once; it is then called once per
    /// registration.
    pub fn on(&self, event: RouterEvent, handler: RouteChangeHandler) {
        self.handlers
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(handler);
    }

    /// Remove the first registration of `handler` for `event`.
    ///
    /// Returns whether a registration was removed.
    pub fn off(&self, event: RouterEvent, handler: &RouteChangeHandler) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let Some(list) = handlers.get_mut(&event) else {
            return false;
        };

        match list.iter().position(|h| same_handler(h, handler)) {
            Some(idx) => {
                list.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Call every listener of `event` in registration order.
    ///
    /// Listeners registered or removed while the event is being dispatched only take effect for
    /// the next emit.
    pub fn emit(&self, event: RouterEvent, url: &str, options: EventOptions) {
        let snapshot = self
            .handlers
            .borrow()
            .get(&event)
            .cloned()
            .unwrap_or_default();

        trace!(%event, url, shallow = options.shallow, listeners = snapshot.len(), "emit");

        for handler in snapshot {
            handler(url, options);
        }
    }

    /// The number of registrations for `event`.
    pub fn listener_count(&self, event: RouterEvent) -> usize {
        self.handlers
            .borrow()
            .get(&event)
            .map(Vec::len)
            .unwrap_or_default()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.borrow();
        f.debug_map()
            .entries(handlers.iter().map(|(event, list)| (event, list.len())))
            .finish()
    }
}

fn same_handler(a: &RouteChangeHandler, b: &RouteChangeHandler) -> bool {
    // compare data pointers only, vtables may be duplicated across codegen units
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}
