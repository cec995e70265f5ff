//! Shell HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned and propagated)
//!     → api.rs ({api_prefix}/ping, /routes, /status)
//!     → otherwise: AppRoot renders the host document for the location
//!     → 200 (route matched) or 404 (fallback markup)
//! ```

pub mod api;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, ShellServer};
