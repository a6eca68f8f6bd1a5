#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod error;
pub mod events;
pub mod navigation;
pub mod query;
pub mod route_definition;
pub mod scheduler;
pub mod url;

mod router_cfg;
mod service;
mod state;

pub use error::RouterError;
pub use router_cfg::{PathParser, RouterConfig};
pub use service::{MemoryRouter, Navigation};
pub use state::Location;

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::error::RouterError;
    pub use crate::events::{EventBus, EventOptions, RouteChangeHandler, RouterEvent};
    pub use crate::navigation::*;
    pub use crate::query::{Query, QueryValue};
    pub use crate::router_cfg::{PathParser, RouterConfig};
    pub use crate::service::{MemoryRouter, Navigation};
    pub use crate::state::Location;
}
