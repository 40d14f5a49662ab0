//! Integration tests for reinstall-driven cache invalidation and host styles.

use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use horizon_theme::host::memory::{MemoryHost, MemoryStore};
use horizon_theme::prelude::*;
use horizon_theme::resource::{ResolvedValue, ResourceEntry, ResourceId, ResourceKind, ValueKind};
use horizon_theme_core::PackageEvent;

const APP: &str = "com.example.app";
const DARK: &str = "com.example.dark";
const LIGHT: &str = "com.example.light";

fn setup() -> (Arc<MemoryHost>, ThemeEngine) {
    let host = Arc::new(MemoryHost::new());
    let own = host.install(
        MemoryStore::new(APP)
            .with_color("background", Color::WHITE)
            .with_string("app_theme", "Theme.Material"),
    );
    host.install(MemoryStore::new(DARK).with_color("background", Color::BLACK));
    host.install(MemoryStore::new(LIGHT).with_color("background", Color::from_argb_u32(0xffee_eeee)));

    let engine = ThemeEngine::builder(host.clone(), own)
        .events(host.events())
        .styles(StyleTable::from_entries([
            ("Theme.Material", 0x0103_0224),
            ("Theme.Material.Light.NoActionBar", 0x0103_0240),
            ("Theme.Material.Settings", 0x0103_0250),
        ]))
        .build()
        .unwrap();
    (host, engine)
}

#[test]
fn reinstall_drops_stale_values() {
    let (host, engine) = setup();
    engine.set_active_theme(DARK);
    assert_eq!(engine.color("background"), Some(Color::BLACK));
    assert_eq!(engine.subscription_state(DARK), SubscriptionState::Registered);

    host.install(MemoryStore::new(DARK).with_color("background", Color::TRANSPARENT));

    assert_eq!(engine.subscription_state(DARK), SubscriptionState::Fired);
    assert_eq!(engine.color("background"), Some(Color::TRANSPARENT));
    // The lookup reopened the package and re-armed the subscription.
    assert_eq!(engine.subscription_state(DARK), SubscriptionState::Registered);
}

#[test]
fn reinstall_leaves_other_themes_cached() {
    let (host, engine) = setup();
    engine.set_active_theme(DARK);
    engine.color("background");
    engine.set_active_theme(LIGHT);
    engine.color("background");
    assert_eq!(engine.cache().stats().colors.entries, 2);

    host.install(MemoryStore::new(DARK));

    assert_eq!(engine.cache().stats().colors.entries, 1);
    assert_eq!(engine.subscription_state(LIGHT), SubscriptionState::Registered);
}

#[test]
fn subscriptions_are_one_per_package() {
    let (host, engine) = setup();
    engine.set_active_theme(DARK);
    engine.color("background");
    engine.color("accent");
    engine.string("title");

    assert_eq!(host.events().connection_count(), 1);
}

#[test]
fn removal_does_not_fire() {
    let (host, engine) = setup();
    engine.set_active_theme(DARK);
    engine.color("background");

    host.uninstall(DARK);
    assert_eq!(engine.subscription_state(DARK), SubscriptionState::Registered);

    // Still cached; invalidation only follows installs.
    assert_eq!(engine.color("background"), Some(Color::BLACK));
}

#[test]
fn own_theme_has_no_subscription() {
    let (host, engine) = setup();
    engine.color("background");
    assert_eq!(engine.subscription_state(APP), SubscriptionState::Unregistered);
    assert_eq!(host.events().connection_count(), 0);
}

#[test]
fn events_emitted_directly_are_honored() {
    let (host, engine) = setup();
    engine.set_active_theme(DARK);
    engine.color("background");

    engine.package_events().emit(PackageEvent::replaced(DARK));
    assert_eq!(engine.cache().stats().colors.entries, 0);
    assert_eq!(host.events().connection_count(), 0);
}

#[test]
fn dropping_the_engine_disconnects() {
    let (host, engine) = setup();
    engine.set_active_theme(DARK);
    engine.color("background");
    assert_eq!(host.events().connection_count(), 1);

    drop(engine);
    assert_eq!(host.events().connection_count(), 0);
}

/// Reinstalls the theme with a white background the first time one of its
/// values is decoded.
struct ReinstallDuringDecode {
    host: Arc<MemoryHost>,
    inner: Arc<dyn ResourceStore>,
    done: Arc<AtomicBool>,
}

impl ResourceStore for ReinstallDuringDecode {
    fn package_id(&self) -> &str {
        self.inner.package_id()
    }

    fn resolve_id(&self, kind: ResourceKind, name: &str) -> Option<ResourceId> {
        self.inner.resolve_id(kind, name)
    }

    fn entry(&self, id: ResourceId) -> Option<ResourceEntry> {
        self.inner.entry(id)
    }

    fn decode(&self, id: ResourceId, kind: ValueKind) -> Result<ResolvedValue> {
        let value = self.inner.decode(id, kind);
        if !self.done.swap(true, Ordering::SeqCst) {
            self.host
                .install(MemoryStore::new(DARK).with_color("background", Color::WHITE));
        }
        value
    }

    fn sound_duration(&self, id: ResourceId) -> Result<Duration> {
        self.inner.sound_duration(id)
    }

    fn open_asset(&self, file_name: &str) -> Result<Vec<u8>> {
        self.inner.open_asset(file_name)
    }
}

struct RacingHost {
    inner: Arc<MemoryHost>,
    done: Arc<AtomicBool>,
}

impl PackageHost for RacingHost {
    fn open_package(&self, package_id: &str) -> Result<Arc<dyn ResourceStore>> {
        let store = self.inner.open_package(package_id)?;
        if package_id != DARK {
            return Ok(store);
        }
        Ok(Arc::new(ReinstallDuringDecode {
            host: self.inner.clone(),
            inner: store,
            done: self.done.clone(),
        }))
    }

    fn query_theme_providers(&self, action: &str) -> Result<Vec<InstalledThemeApp>> {
        self.inner.query_theme_providers(action)
    }

    fn open_content(&self, uri: &str) -> Result<Box<dyn Read + Send>> {
        self.inner.open_content(uri)
    }
}

#[test]
fn reinstall_during_lookup_is_not_cached() {
    let (host, _) = setup();
    let own = host.install(MemoryStore::new(APP).with_color("background", Color::TRANSPARENT));
    let racing = Arc::new(RacingHost {
        inner: host.clone(),
        done: Arc::new(AtomicBool::new(false)),
    });
    let engine = ThemeEngine::builder(racing, own)
        .events(host.events())
        .active_theme(DARK)
        .build()
        .unwrap();

    // The value decoded before the reinstall is still returned once.
    assert_eq!(engine.color("background"), Some(Color::BLACK));
    assert_eq!(engine.subscription_state(DARK), SubscriptionState::Fired);
    assert_eq!(engine.cache().stats().colors.entries, 0);

    // The next lookup goes back to the store and re-arms the subscription.
    assert_eq!(engine.color("background"), Some(Color::WHITE));
    assert_eq!(engine.subscription_state(DARK), SubscriptionState::Registered);
    assert_eq!(engine.cache().stats().colors.entries, 1);
}

#[test]
fn light_theme_detection() {
    let (host, engine) = setup();
    assert!(!engine.is_light_theme());

    host.install(MemoryStore::new("com.example.day").with_string("app_theme", "Theme.Material.Light.NoActionBar"));
    engine.set_active_theme("com.example.day");
    assert!(engine.is_light_theme());
    assert_eq!(engine.theme_style(), StyleId::new(0x0103_0240));

    host.install(MemoryStore::new("com.example.night").with_string("app_theme", "Theme_Dark"));
    engine.set_active_theme("com.example.night");
    assert!(!engine.is_light_theme());
    assert_eq!(engine.theme_style(), StyleId::NONE);
}

#[test]
fn absent_theme_string_counts_as_dark() {
    let host = Arc::new(MemoryHost::new());
    let own = host.install(MemoryStore::new(APP));
    let engine = ThemeEngine::builder(host.clone(), own).build().unwrap();

    assert!(!engine.is_light_theme());
    assert_eq!(engine.theme_style(), StyleId::NONE);
    assert_eq!(engine.settings_theme_style(), StyleId::NONE);
}

#[test]
fn settings_style_uses_its_own_string() {
    let (host, engine) = setup();
    host.install(
        MemoryStore::new("com.example.settings")
            .with_string("app_theme", "Theme.Material")
            .with_string("app_settings_theme", "Theme.Material.Settings"),
    );
    engine.set_active_theme("com.example.settings");

    assert_eq!(engine.theme_style(), StyleId::new(0x0103_0224));
    assert_eq!(engine.settings_theme_style(), StyleId::new(0x0103_0250));
}
