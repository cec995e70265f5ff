//! Client-side routing subsystem.
//!
//! # Data Flow
//! ```text
//! Host location (URL, path or #fragment)
//!     → location.rs (extract match key for the configured mode/base)
//!     → router.rs (route lookup, reverse lookup)
//!     → matcher.rs (segment-wise pattern evaluation)
//!     → Return: matched Route or NotFound
//!
//! Table construction (at startup):
//!     static route list
//!     → table.rs (compile patterns, reject duplicate names / overlapping paths)
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex: literal and `:param` segments only
//! - Deterministic: same location always resolves to the same route
//! - First match wins (table order)
//! - NotFound is a value, not an error

pub mod guard;
pub mod location;
pub mod matcher;
pub mod route;
pub mod router;
pub mod table;

pub use guard::{AuthGuard, GuardDecision};
pub use location::{Location, Mode};
pub use route::{Component, Route, RouteParams};
pub use router::{Resolution, RouteMatch, Router, RouterError};
pub use table::{RouteTable, RouteTableError};
