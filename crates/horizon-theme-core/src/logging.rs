//! Tracing integration for Horizon Theme.
//!
//! Horizon Theme logs through the `tracing` crate and never installs a
//! subscriber itself. To see logs, install one in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_theme::cache=debug,horizon_theme::font=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal emission and connection bookkeeping.
    pub const SIGNAL: &str = "horizon_theme_core::signal";
    /// Resolution engine (theme/own fallback).
    pub const RESOLVE: &str = "horizon_theme::resolve";
    /// Kind caches and invalidation.
    pub const CACHE: &str = "horizon_theme::cache";
    /// Active theme selection and provider enumeration.
    pub const REGISTRY: &str = "horizon_theme::registry";
    /// Font fallback chain.
    pub const FONT: &str = "horizon_theme::font";
    /// Package reinstall subscriptions.
    pub const LISTENER: &str = "horizon_theme::listener";
    /// Style token lookup.
    pub const STYLE: &str = "horizon_theme::style";
}
