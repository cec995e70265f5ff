//! Application shell library: client-side routing, bootstrap and the
//! HTTP server that hosts the single-page application.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use app::AppRoot;
pub use config::schema::ShellConfig;
pub use http::ShellServer;
pub use lifecycle::{Bootstrapper, Shutdown};
pub use routing::Router;
