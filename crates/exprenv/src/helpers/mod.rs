//! Helper objects exposed to expressions as `#dates`, `#strings`, ...
//!
//! Helpers come in three groups:
//! - locale-aware helpers (`calendars`, `dates`, `numbers`, `strings`), only
//!   available when the context has a locale
//! - locale-independent helpers (`bools`, `objects`, `arrays`, `lists`,
//!   `sets`, `maps`, `aggregates`)
//! - invocation helpers (`messages`, `ids`), scoped to one template invocation
//!
//! The first two groups are assembled into a [`HelperBundle`] and cached per
//! conversion service and locale; see [`crate::cache`].

mod bools;
mod bundle;
mod collections;
mod dates;
mod error;
mod ids;
mod messages;
mod numbers;
mod strings;

pub use bools::Bools;
pub use bundle::{Helper, HelperBundle};
pub use collections::{Aggregates, Arrays, Lists, Maps, Objects, Sets};
pub use dates::{Calendars, Dates};
pub use error::HelperError;
pub use ids::{IdCounts, Ids};
pub use messages::Messages;
pub use numbers::Numbers;
pub use strings::Strings;
