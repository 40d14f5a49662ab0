//! In-memory host implementation.
//!
//! [`MemoryStore`] is an immutable resource namespace assembled with builder
//! calls; [`MemoryHost`] is a package directory holding such stores. Installing
//! a store into a `MemoryHost` emits a package event on the host's signal, the
//! same way a real host broadcasts package installs.
//!
//! ```
//! use std::sync::Arc;
//! use horizon_theme::host::memory::{MemoryHost, MemoryStore};
//! use horizon_theme::resource::Color;
//!
//! let host = MemoryHost::new();
//! host.install(MemoryStore::new("com.example.theme").with_color("accent", Color::WHITE));
//! assert!(host.is_installed("com.example.theme"));
//! ```

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use horizon_theme_core::{PackageEvent, PackageEvents};
use parking_lot::RwLock;

use super::{InstalledThemeApp, PackageHost, ResourceStore};
use crate::error::{Result, ThemeError};
use crate::resource::{
    Color, ColorStateList, Drawable, DrawableTemplate, ResolvedValue, ResourceEntry, ResourceId,
    ResourceKind, Typeface, ValueKind,
};

/// First handle assigned by a [`MemoryStore`].
const FIRST_ID: u32 = 0x7f00_0001;

#[derive(Debug, Clone)]
enum StoredValue {
    String(String),
    Color(Color),
    ColorStateList(ColorStateList),
    Drawable(Arc<DrawableTemplate>),
    Boolean(bool),
    Dimension(f32),
    Font(Option<String>),
    Raw {
        bytes: Vec<u8>,
        duration: Option<Duration>,
    },
    /// Present but undecodable.
    Corrupt,
}

/// An immutable in-memory resource namespace.
#[derive(Debug)]
pub struct MemoryStore {
    package_id: String,
    ids: HashMap<(ResourceKind, String), ResourceId>,
    values: HashMap<ResourceId, (ResourceKind, String, StoredValue)>,
    assets: HashMap<String, Vec<u8>>,
    next_id: u32,
    resolve_calls: AtomicUsize,
    decode_calls: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store for a package.
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            ids: HashMap::new(),
            values: HashMap::new(),
            assets: HashMap::new(),
            next_id: FIRST_ID,
            resolve_calls: AtomicUsize::new(0),
            decode_calls: AtomicUsize::new(0),
        }
    }

    /// Start handle numbering at `first` instead of the default.
    ///
    /// Useful to keep handles of two stores disjoint.
    pub fn with_id_base(mut self, first: u32) -> Self {
        self.next_id = first.max(1);
        self
    }

    fn insert(mut self, kind: ResourceKind, name: impl Into<String>, value: StoredValue) -> Self {
        let name = name.into();
        let key = (kind, name.clone());
        let id = match self.ids.get(&key).copied() {
            Some(id) => id,
            None => {
                let Some(id) = ResourceId::new(self.next_id) else {
                    return self;
                };
                self.next_id = self.next_id.wrapping_add(1);
                self.ids.insert(key, id);
                id
            }
        };
        self.values.insert(id, (kind, name, value));
        self
    }

    /// Add a string resource.
    pub fn with_string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(ResourceKind::String, name, StoredValue::String(value.into()))
    }

    /// Add a color resource.
    pub fn with_color(self, name: impl Into<String>, color: Color) -> Self {
        self.insert(ResourceKind::Color, name, StoredValue::Color(color))
    }

    /// Add a color state list resource.
    pub fn with_color_state_list(self, name: impl Into<String>, list: ColorStateList) -> Self {
        self.insert(ResourceKind::Color, name, StoredValue::ColorStateList(list))
    }

    /// Add a drawable resource with placeholder RGBA pixel data.
    pub fn with_drawable(self, name: impl Into<String>, width: u32, height: u32) -> Self {
        let name = name.into();
        let data = vec![0u8; (width as usize) * (height as usize) * 4];
        let template = DrawableTemplate::new(self.package_id.clone(), name.clone(), width, height, data);
        self.insert(ResourceKind::Drawable, name, StoredValue::Drawable(Arc::new(template)))
    }

    /// Add a boolean resource.
    pub fn with_bool(self, name: impl Into<String>, value: bool) -> Self {
        self.insert(ResourceKind::Boolean, name, StoredValue::Boolean(value))
    }

    /// Add a dimension resource.
    pub fn with_dimension(self, name: impl Into<String>, value: f32) -> Self {
        self.insert(ResourceKind::Dimension, name, StoredValue::Dimension(value))
    }

    /// Add a native font resource.
    pub fn with_font(self, name: impl Into<String>, family: Option<&str>) -> Self {
        self.insert(
            ResourceKind::Font,
            name,
            StoredValue::Font(family.map(str::to_string)),
        )
    }

    /// Add a raw sound resource. `duration` of `None` makes duration probing fail.
    pub fn with_raw(self, name: impl Into<String>, bytes: Vec<u8>, duration: Option<Duration>) -> Self {
        self.insert(ResourceKind::Raw, name, StoredValue::Raw { bytes, duration })
    }

    /// Add a resource that resolves to a handle but fails to decode.
    pub fn with_corrupt(self, kind: ResourceKind, name: impl Into<String>) -> Self {
        self.insert(kind, name, StoredValue::Corrupt)
    }

    /// Add a file to the asset bundle.
    pub fn with_asset(mut self, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.assets.insert(file_name.into(), bytes);
        self
    }

    /// Number of `resolve_id` calls served so far.
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Number of `decode` calls served so far.
    pub fn decode_calls(&self) -> usize {
        self.decode_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, id: ResourceId) -> Result<&(ResourceKind, String, StoredValue)> {
        self.values.get(&id).ok_or_else(|| {
            ThemeError::resource_not_found(ResourceKind::Raw, format!("#{id}"))
        })
    }
}

impl ResourceStore for MemoryStore {
    fn package_id(&self) -> &str {
        &self.package_id
    }

    fn resolve_id(&self, kind: ResourceKind, name: &str) -> Option<ResourceId> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.ids.get(&(kind, name.to_string())).copied()
    }

    fn entry(&self, id: ResourceId) -> Option<ResourceEntry> {
        self.values
            .get(&id)
            .map(|(kind, name, _)| ResourceEntry::new(kind.as_str(), name.clone()))
    }

    fn decode(&self, id: ResourceId, kind: ValueKind) -> Result<ResolvedValue> {
        self.decode_calls.fetch_add(1, Ordering::SeqCst);
        let (stored_kind, name, value) = self.lookup(id)?;
        let mismatch = || {
            ThemeError::decode(
                *stored_kind,
                name.clone(),
                format!("cannot decode as {kind:?}"),
            )
        };

        let resolved = match (kind, value) {
            (ValueKind::String, StoredValue::String(s)) => ResolvedValue::String(s.clone()),
            (ValueKind::Color, StoredValue::Color(c)) => ResolvedValue::Color(*c),
            (ValueKind::Color, StoredValue::ColorStateList(list)) => {
                ResolvedValue::Color(list.default_color())
            }
            (ValueKind::ColorStateList, StoredValue::ColorStateList(list)) => {
                ResolvedValue::ColorStateList(list.clone())
            }
            (ValueKind::ColorStateList, StoredValue::Color(c)) => {
                ResolvedValue::ColorStateList(ColorStateList::single(*c))
            }
            (ValueKind::Drawable, StoredValue::Drawable(template)) => {
                ResolvedValue::Drawable(Drawable::new(template.clone()))
            }
            (ValueKind::Drawable, StoredValue::Color(c)) => {
                // Color drawables: a 1x1 swatch.
                let template = DrawableTemplate::new(
                    self.package_id.clone(),
                    name.clone(),
                    1,
                    1,
                    c.argb().to_be_bytes().to_vec(),
                );
                ResolvedValue::Drawable(Drawable::new(Arc::new(template)))
            }
            (ValueKind::Boolean, StoredValue::Boolean(b)) => ResolvedValue::Boolean(*b),
            (ValueKind::Dimension, StoredValue::Dimension(d)) => ResolvedValue::Dimension(*d),
            (ValueKind::Font, StoredValue::Font(family)) => ResolvedValue::Font(
                Typeface::from_resource(self.package_id.clone(), id, family.clone()),
            ),
            _ => return Err(mismatch()),
        };
        Ok(resolved)
    }

    fn sound_duration(&self, id: ResourceId) -> Result<Duration> {
        let (kind, name, value) = self.lookup(id)?;
        match value {
            StoredValue::Raw {
                duration: Some(duration),
                ..
            } => Ok(*duration),
            StoredValue::Raw { bytes, .. } => Err(ThemeError::decode(
                *kind,
                name.clone(),
                format!("unrecognized audio data ({} bytes)", bytes.len()),
            )),
            _ => Err(ThemeError::decode(*kind, name.clone(), "not a raw resource")),
        }
    }

    fn open_asset(&self, file_name: &str) -> Result<Vec<u8>> {
        self.assets
            .get(file_name)
            .cloned()
            .ok_or_else(|| ThemeError::resource_not_found(ResourceKind::Raw, file_name))
    }
}

/// An in-memory package directory.
pub struct MemoryHost {
    packages: RwLock<HashMap<String, Arc<MemoryStore>>>,
    labels: RwLock<HashMap<String, String>>,
    providers: RwLock<HashMap<String, Vec<InstalledThemeApp>>>,
    content: RwLock<HashMap<String, Vec<u8>>>,
    events: Arc<PackageEvents>,
    native_fonts: AtomicBool,
    directory_broken: AtomicBool,
    open_calls: AtomicUsize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self {
            packages: RwLock::new(HashMap::new()),
            labels: RwLock::new(HashMap::new()),
            providers: RwLock::new(HashMap::new()),
            content: RwLock::new(HashMap::new()),
            events: Arc::new(PackageEvents::new()),
            native_fonts: AtomicBool::new(true),
            directory_broken: AtomicBool::new(false),
            open_calls: AtomicUsize::new(0),
        }
    }

    /// The package-install signal this host emits on.
    pub fn events(&self) -> Arc<PackageEvents> {
        self.events.clone()
    }

    /// Install (or reinstall) a package and broadcast the change.
    pub fn install(&self, store: MemoryStore) -> Arc<MemoryStore> {
        let store = Arc::new(store);
        let package_id = store.package_id().to_string();
        let previous = self
            .packages
            .write()
            .insert(package_id.clone(), store.clone());

        let event = if previous.is_some() {
            PackageEvent::replaced(package_id)
        } else {
            PackageEvent::added(package_id)
        };
        self.events.emit(event);
        store
    }

    /// Remove a package and broadcast the change.
    pub fn uninstall(&self, package_id: &str) -> bool {
        let removed = self.packages.write().remove(package_id).is_some();
        if removed {
            self.events.emit(PackageEvent::removed(package_id));
        }
        removed
    }

    /// Whether a package is installed.
    pub fn is_installed(&self, package_id: &str) -> bool {
        self.packages.read().contains_key(package_id)
    }

    /// Set a package's display label.
    pub fn set_label(&self, package_id: impl Into<String>, label: impl Into<String>) {
        self.labels.write().insert(package_id.into(), label.into());
    }

    /// Declare that `app` responds to `action`.
    pub fn declare_provider(&self, action: impl Into<String>, app: InstalledThemeApp) {
        self.providers
            .write()
            .entry(action.into())
            .or_default()
            .push(app);
    }

    /// Serve bytes at a content URI.
    pub fn serve_content(&self, uri: impl Into<String>, bytes: Vec<u8>) {
        self.content.write().insert(uri.into(), bytes);
    }

    /// Toggle native font support.
    pub fn set_native_fonts(&self, supported: bool) {
        self.native_fonts.store(supported, Ordering::SeqCst);
    }

    /// Make every directory query fail.
    pub fn set_directory_broken(&self, broken: bool) {
        self.directory_broken.store(broken, Ordering::SeqCst);
    }

    /// Number of `open_package` calls served so far.
    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }
}

impl PackageHost for MemoryHost {
    fn open_package(&self, package_id: &str) -> Result<Arc<dyn ResourceStore>> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        self.packages
            .read()
            .get(package_id)
            .map(|store| store.clone() as Arc<dyn ResourceStore>)
            .ok_or_else(|| ThemeError::namespace_not_found(package_id))
    }

    fn query_theme_providers(&self, action: &str) -> Result<Vec<InstalledThemeApp>> {
        if self.directory_broken.load(Ordering::SeqCst) {
            return Err(ThemeError::DirectoryQuery(format!(
                "package directory unavailable for '{action}'"
            )));
        }
        Ok(self
            .providers
            .read()
            .get(action)
            .cloned()
            .unwrap_or_default())
    }

    fn open_content(&self, uri: &str) -> Result<Box<dyn Read + Send>> {
        let bytes = self
            .content
            .read()
            .get(uri)
            .cloned()
            .ok_or_else(|| ThemeError::resource_not_found(ResourceKind::Raw, uri))?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn supports_native_fonts(&self) -> bool {
        self.native_fonts.load(Ordering::SeqCst)
    }

    fn application_label(&self, package_id: &str) -> Option<String> {
        self.labels.read().get(package_id).cloned()
    }
}
