//! Application root subsystem.
//!
//! # Data Flow
//! ```text
//! Bootstrapper
//!     → theme.rs (plugin/theme provider)
//!     → root.rs (AppRoot owns Router + provider)
//!     → document.rs (mount onto host element)
//!
//! Per navigation:
//!     location → Router::resolve → [guard] → render into host element
//! ```
//!
//! # Design Decisions
//! - Exactly one root per bootstrap; no ambient global instance
//! - Construction and mounting are separate, sequenced calls
//! - Root is read-only once mounted and shared via Arc

pub mod document;
pub mod root;
pub mod theme;

pub use document::Document;
pub use root::{AppRoot, MountError, Navigation, PageStatus, RenderError, RenderedPage};
pub use theme::{StylesheetTheme, ThemeProvider};
