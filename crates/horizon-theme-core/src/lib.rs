//! Core primitives for Horizon Theme.
//!
//! This crate holds the pieces shared between the theme engine and the host
//! that embeds it:
//!
//! - [`Signal`]: a thread-safe observer primitive used as the host's
//!   package-install notification channel
//! - [`PackageEvent`]: the payload a host emits when a package is installed
//!   or updated
//! - [`logging`]: tracing target constants for per-subsystem filtering
//!
//! # Example
//!
//! ```
//! use horizon_theme_core::{PackageEvent, Signal};
//!
//! let installs = Signal::<PackageEvent>::new();
//! let id = installs.connect(|event| {
//!     println!("{} was reinstalled", event.package_id());
//! });
//!
//! installs.emit(PackageEvent::replaced("com.example.theme.dark"));
//! installs.disconnect(id);
//! ```

pub mod event;
pub mod logging;
pub mod signal;

pub use event::{PackageEvent, PackageEventKind};
pub use signal::{ConnectionGuard, ConnectionId, Signal};

/// Signal type a host uses to broadcast package install/update events.
pub type PackageEvents = Signal<PackageEvent>;
