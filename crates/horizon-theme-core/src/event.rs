//! Package lifecycle events emitted by the host.

use std::fmt;

/// What happened to a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageEventKind {
    /// The package was installed for the first time.
    Added,
    /// An existing package was reinstalled or updated in place.
    Replaced,
    /// The package was uninstalled.
    Removed,
}

impl PackageEventKind {
    /// Whether this event means the package's resources may have changed
    /// while it remains installed.
    pub fn is_install(self) -> bool {
        matches!(self, PackageEventKind::Added | PackageEventKind::Replaced)
    }
}

/// A package install/update notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageEvent {
    package_id: String,
    kind: PackageEventKind,
}

impl PackageEvent {
    /// Create an event for a package.
    pub fn new(package_id: impl Into<String>, kind: PackageEventKind) -> Self {
        Self {
            package_id: package_id.into(),
            kind,
        }
    }

    /// A first-time install.
    pub fn added(package_id: impl Into<String>) -> Self {
        Self::new(package_id, PackageEventKind::Added)
    }

    /// A reinstall or in-place update.
    pub fn replaced(package_id: impl Into<String>) -> Self {
        Self::new(package_id, PackageEventKind::Replaced)
    }

    /// An uninstall.
    pub fn removed(package_id: impl Into<String>) -> Self {
        Self::new(package_id, PackageEventKind::Removed)
    }

    /// The package identifier the event is scoped to.
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// The kind of change.
    pub fn kind(&self) -> PackageEventKind {
        self.kind
    }
}

impl fmt::Display for PackageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.package_id)
    }
}
