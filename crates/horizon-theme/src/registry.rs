//! Active theme selection and theme-provider discovery.

use parking_lot::RwLock;

use horizon_theme_core::logging::targets;

use crate::config::ThemeConfig;
use crate::host::{InstalledThemeApp, PackageHost};

/// Snapshot of a registry's selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeIdentity {
    /// Selected theme package; `None` means the consumer's own resources.
    pub active: Option<String>,
    /// Package whose theme contract is used for provider discovery.
    pub override_package: Option<String>,
}

/// Tracks the active theme package for one consumer.
///
/// Last write wins; nothing is validated until the next resolution opens the
/// package.
#[derive(Debug)]
pub struct ThemeRegistry {
    consumer: String,
    identity: RwLock<ThemeIdentity>,
}

impl ThemeRegistry {
    /// Create a registry for `consumer` with no theme selected.
    pub fn new(consumer: impl Into<String>) -> Self {
        Self {
            consumer: consumer.into(),
            identity: RwLock::new(ThemeIdentity::default()),
        }
    }

    /// The consuming package.
    pub fn consumer(&self) -> &str {
        &self.consumer
    }

    /// Select the active theme package.
    pub fn set_active_theme(&self, package_id: impl Into<String>) {
        let package_id = package_id.into();
        tracing::debug!(target: targets::REGISTRY, consumer = %self.consumer, theme = %package_id, "active theme set");
        self.identity.write().active = Some(package_id);
    }

    /// Go back to the consumer's own resources.
    pub fn clear_active_theme(&self) {
        self.identity.write().active = None;
    }

    /// The active theme package, or the consumer itself when none is set.
    pub fn active_theme(&self) -> String {
        self.identity
            .read()
            .active
            .clone()
            .unwrap_or_else(|| self.consumer.clone())
    }

    /// Whether the active theme is a package other than the consumer.
    pub fn has_external_theme(&self) -> bool {
        self.identity
            .read()
            .active
            .as_deref()
            .is_some_and(|active| active != self.consumer)
    }

    /// Set or clear the package used for provider discovery.
    pub fn set_override(&self, package_id: Option<String>) {
        tracing::debug!(target: targets::REGISTRY, consumer = %self.consumer, override_package = ?package_id, "override set");
        self.identity.write().override_package = package_id;
    }

    /// The discovery override, if any.
    pub fn override_package(&self) -> Option<String> {
        self.identity.read().override_package.clone()
    }

    /// Current selection.
    pub fn identity(&self) -> ThemeIdentity {
        self.identity.read().clone()
    }

    /// The action theme providers for this consumer respond to.
    pub fn provider_action(&self, config: &ThemeConfig) -> String {
        let identity = self.identity.read();
        let package = identity
            .override_package
            .as_deref()
            .unwrap_or(&self.consumer);
        config.theme_action(package)
    }

    /// Query the host for installed theme providers.
    ///
    /// A failing directory query is logged and yields an empty list.
    pub fn enumerate_theme_providers(
        &self,
        host: &dyn PackageHost,
        config: &ThemeConfig,
    ) -> Vec<InstalledThemeApp> {
        let action = self.provider_action(config);
        match host.query_theme_providers(&action) {
            Ok(providers) => {
                tracing::debug!(target: targets::REGISTRY, %action, count = providers.len(), "theme providers found");
                providers
            }
            Err(err) => {
                tracing::error!(target: targets::REGISTRY, %action, error = %err, "theme provider query failed");
                Vec::new()
            }
        }
    }
}

/// Entries for a theme picker: the consumer itself, then every provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChoices {
    entries: Vec<InstalledThemeApp>,
}

impl ThemeChoices {
    /// Build the list with `consumer` first.
    pub fn new(consumer: InstalledThemeApp, providers: Vec<InstalledThemeApp>) -> Self {
        let mut entries = Vec::with_capacity(providers.len() + 1);
        entries.push(consumer);
        entries.extend(providers);
        Self { entries }
    }

    /// All entries, consumer first.
    pub fn entries(&self) -> &[InstalledThemeApp] {
        &self.entries
    }

    /// The consumer's own entry.
    pub fn consumer(&self) -> &InstalledThemeApp {
        &self.entries[0]
    }

    /// Installed providers only.
    pub fn providers(&self) -> &[InstalledThemeApp] {
        &self.entries[1..]
    }

    /// Number of entries, including the consumer.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the consumer entry is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `package_id` is one of the entries.
    pub fn contains(&self, package_id: &str) -> bool {
        self.entries.iter().any(|app| app.package_id == package_id)
    }

    /// Display label for `package_id`; unknown packages get the consumer's.
    pub fn title_for(&self, package_id: &str) -> &str {
        self.providers()
            .iter()
            .find(|app| app.package_id == package_id)
            .unwrap_or_else(|| self.consumer())
            .name
            .as_str()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, InstalledThemeApp> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ThemeChoices {
    type Item = &'a InstalledThemeApp;
    type IntoIter = std::slice::Iter<'a, InstalledThemeApp>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
