//! Path patterns: parsing, matching concrete paths against them, and filling them in.
//!
//! A pattern is a path in which some segments are placeholders:
//! - `[name]` binds exactly one segment,
//! - `[...name]` binds all remaining segments (at least one),
//! - `[[...name]]` binds all remaining segments, or nothing.

mod pattern;
mod registry;
mod segment;

pub use pattern::*;
pub use registry::*;
pub use segment::*;
