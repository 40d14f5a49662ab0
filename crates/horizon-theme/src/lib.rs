//! Runtime resource theming for Horizon.
//!
//! An application (the *consumer*) asks for resources by kind and symbolic
//! name. Resources come from the selected *theme package* when it has them,
//! and from the consumer's own package otherwise:
//!
//! - **Resolution**: theme first, own package as ground truth
//! - **Caching**: per-kind LRU caches partitioned by consumer and theme
//! - **Invalidation**: reinstalling a theme package clears its partition
//! - **Fonts**: a tiered chain (native resources, file provider, assets)
//! - **Discovery**: enumerate installed packages that provide themes
//!
//! The host framework is reached only through the [`host::PackageHost`] and
//! [`host::ResourceStore`] traits; [`host::memory`] implements both in
//! memory.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_theme::prelude::*;
//! use horizon_theme::host::memory::{MemoryHost, MemoryStore};
//!
//! let host = Arc::new(MemoryHost::new());
//! let own = host.install(MemoryStore::new("com.example.app")
//!     .with_string("title", "Example")
//!     .with_string("app_theme", "Theme.Material"));
//! host.install(MemoryStore::new("com.example.light")
//!     .with_string("app_theme", "Theme.Material.Light"));
//!
//! let engine = ThemeEngine::builder(host.clone(), own)
//!     .events(host.events())
//!     .build()?;
//! assert!(!engine.is_light_theme());
//!
//! engine.set_active_theme("com.example.light");
//! assert!(engine.is_light_theme());
//! assert_eq!(engine.string("title").as_deref(), Some("Example"));
//! # Ok::<(), horizon_theme::ThemeError>(())
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod font;
pub mod host;
pub mod listener;
pub mod registry;
pub mod resource;
pub mod style;

mod error;

pub use config::ThemeConfig;
pub use engine::{ThemeEngine, ThemeEngineBuilder};
pub use error::{Result, ThemeError};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::cache::{CacheKey, CacheStats, ThemeCache};
    pub use crate::config::ThemeConfig;
    pub use crate::engine::{ThemeEngine, ThemeEngineBuilder};
    pub use crate::error::{Result, ThemeError};
    pub use crate::font::{ParsedTypefaceLoader, TypefaceLoader};
    pub use crate::host::{InstalledThemeApp, PackageHost, ResourceStore};
    pub use crate::listener::SubscriptionState;
    pub use crate::registry::ThemeChoices;
    pub use crate::resource::{
        Color, ColorStateList, Drawable, Res, ResolvedValue, ResourceId, ResourceKind, Typeface,
        ValueKind,
    };
    pub use crate::style::{StyleId, StyleTable};
}
