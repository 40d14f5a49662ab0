//! Host framework abstraction.
//!
//! The engine never talks to a package manager directly. Everything it needs
//! from the host goes through two narrow traits:
//!
//! - [`ResourceStore`]: one package's resource namespace (symbolic lookup,
//!   typed decode, asset access)
//! - [`PackageHost`]: the package directory (open a package's store,
//!   discover theme providers, read file-provider content)
//!
//! [`memory`] provides complete in-memory implementations for tests and for
//! hosts that assemble resources themselves.

pub mod memory;

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::resource::{ResolvedValue, ResourceEntry, ResourceId, ResourceKind, ValueKind};

/// A package's resource namespace.
pub trait ResourceStore: Send + Sync {
    /// Identifier of the package this store belongs to.
    fn package_id(&self) -> &str;

    /// Look up the handle for a symbolic name. `None` when absent.
    fn resolve_id(&self, kind: ResourceKind, name: &str) -> Option<ResourceId>;

    /// Describe one of this store's handles (type name and entry name).
    fn entry(&self, id: ResourceId) -> Option<ResourceEntry>;

    /// Decode a handle into the requested value form.
    fn decode(&self, id: ResourceId, kind: ValueKind) -> Result<ResolvedValue>;

    /// Probe the playback duration of a raw sound resource.
    fn sound_duration(&self, id: ResourceId) -> Result<Duration>;

    /// Read a file from this package's asset bundle.
    fn open_asset(&self, file_name: &str) -> Result<Vec<u8>>;
}

/// An installed package advertising the theme-provider capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstalledThemeApp {
    /// Human-readable label.
    pub name: String,
    /// Package identifier, usable as an active theme.
    pub package_id: String,
}

impl InstalledThemeApp {
    /// Create an entry.
    pub fn new(name: impl Into<String>, package_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_id: package_id.into(),
        }
    }
}

/// The host's package directory.
pub trait PackageHost: Send + Sync {
    /// Open the resource store of an installed package.
    ///
    /// Fails with [`ThemeError::NamespaceNotFound`](crate::ThemeError::NamespaceNotFound)
    /// when the package is not installed.
    fn open_package(&self, package_id: &str) -> Result<Arc<dyn ResourceStore>>;

    /// List installed packages declaring a component for `action`.
    fn query_theme_providers(&self, action: &str) -> Result<Vec<InstalledThemeApp>>;

    /// Open a content URI served by a package's file provider.
    fn open_content(&self, uri: &str) -> Result<Box<dyn Read + Send>>;

    /// Whether the host can decode native font resources.
    fn supports_native_fonts(&self) -> bool {
        true
    }

    /// Display label of a package, when the host knows one.
    fn application_label(&self, _package_id: &str) -> Option<String> {
        None
    }
}
