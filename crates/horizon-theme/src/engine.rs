//! The resolution engine.
//!
//! [`ThemeEngine`] answers "what is resource `name` of kind `K` for this
//! consumer right now". Every lookup goes:
//!
//! 1. cache, keyed by (consumer, active theme, name)
//! 2. the active theme package's store
//! 3. the consumer's own store
//!
//! Missing values come back as `None` and are not cached, except fonts, whose
//! absence is cached. A result is not cached when the theme was reinstalled
//! while it was being resolved. Host failures never reach the caller; they are logged
//! and the lookup moves on to the next namespace.

use std::sync::Arc;
use std::time::Duration;

use horizon_theme_core::PackageEvents;
use horizon_theme_core::logging::targets;

use crate::cache::{CacheKey, ThemeCache};
use crate::config::ThemeConfig;
use crate::error::Result;
use crate::font::{FontChain, ParsedTypefaceLoader, TypefaceLoader};
use crate::host::{InstalledThemeApp, PackageHost, ResourceStore};
use crate::listener::{InvalidationListener, SubscriptionState};
use crate::registry::{ThemeChoices, ThemeIdentity, ThemeRegistry};
use crate::resource::{
    Color, ColorStateList, Drawable, Res, ResolvedValue, ResourceId, ResourceKind, SoundSource,
    Typeface, ValueKind,
};
use crate::style::{StyleId, StyleTable, is_light_token, style_token};

/// Builder for [`ThemeEngine`].
pub struct ThemeEngineBuilder {
    host: Arc<dyn PackageHost>,
    own: Arc<dyn ResourceStore>,
    config: ThemeConfig,
    styles: StyleTable,
    events: Option<Arc<PackageEvents>>,
    cache: Option<Arc<ThemeCache>>,
    loader: Option<Arc<dyn TypefaceLoader>>,
    active_theme: Option<String>,
}

impl ThemeEngineBuilder {
    /// Start a builder for the consumer owning `own`.
    pub fn new(host: Arc<dyn PackageHost>, own: Arc<dyn ResourceStore>) -> Self {
        Self {
            host,
            own,
            config: ThemeConfig::default(),
            styles: StyleTable::new(),
            events: None,
            cache: None,
            loader: None,
            active_theme: None,
        }
    }

    /// Use a custom configuration.
    pub fn config(mut self, config: ThemeConfig) -> Self {
        self.config = config;
        self
    }

    /// Host style table used by [`ThemeEngine::theme_style`].
    pub fn styles(mut self, styles: StyleTable) -> Self {
        self.styles = styles;
        self
    }

    /// The host's package-install signal.
    ///
    /// Without one the engine creates a private signal, reachable through
    /// [`ThemeEngine::package_events`].
    pub fn events(mut self, events: Arc<PackageEvents>) -> Self {
        self.events = Some(events);
        self
    }

    /// Share caches with other engines.
    pub fn cache(mut self, cache: Arc<ThemeCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Use a custom font loader instead of [`ParsedTypefaceLoader`].
    pub fn typeface_loader(mut self, loader: Arc<dyn TypefaceLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Select a theme up front.
    pub fn active_theme(mut self, package_id: impl Into<String>) -> Self {
        self.active_theme = Some(package_id.into());
        self
    }

    /// Build the engine.
    pub fn build(self) -> Result<ThemeEngine> {
        self.config.validate()?;

        let consumer = self.own.package_id().to_string();
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(ThemeCache::from_config(&self.config)));
        let events = self
            .events
            .unwrap_or_else(|| Arc::new(PackageEvents::new()));
        let listener = InvalidationListener::new(consumer.clone(), events.clone(), cache.clone());
        let registry = ThemeRegistry::new(consumer.clone());
        if let Some(theme) = self.active_theme {
            registry.set_active_theme(theme);
        }

        tracing::debug!(target: targets::RESOLVE, %consumer, "theme engine created");

        Ok(ThemeEngine {
            host: self.host,
            own: self.own,
            config: self.config,
            registry,
            cache,
            events,
            listener,
            styles: self.styles,
            loader: self
                .loader
                .unwrap_or_else(|| Arc::new(ParsedTypefaceLoader)),
        })
    }
}

/// Resolves themed resources for one consumer package.
///
/// `ThemeEngine` is `Send + Sync`; share it behind an `Arc`. No internal lock
/// is held while the engine calls into the host.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_theme::ThemeEngine;
/// use horizon_theme::host::memory::{MemoryHost, MemoryStore};
/// use horizon_theme::resource::Color;
///
/// let host = Arc::new(MemoryHost::new());
/// let own = host.install(MemoryStore::new("com.example.app")
///     .with_color("accent", Color::BLACK)
///     .with_color("background", Color::WHITE));
/// host.install(MemoryStore::new("com.example.dark")
///     .with_color("background", Color::BLACK));
///
/// let engine = ThemeEngine::builder(host.clone(), own)
///     .events(host.events())
///     .active_theme("com.example.dark")
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.color("background"), Some(Color::BLACK));
/// assert_eq!(engine.color("accent"), Some(Color::BLACK));
/// assert_eq!(engine.color("missing"), None);
/// ```
pub struct ThemeEngine {
    host: Arc<dyn PackageHost>,
    own: Arc<dyn ResourceStore>,
    config: ThemeConfig,
    registry: ThemeRegistry,
    cache: Arc<ThemeCache>,
    events: Arc<PackageEvents>,
    listener: Arc<InvalidationListener>,
    styles: StyleTable,
    loader: Arc<dyn TypefaceLoader>,
}

impl ThemeEngine {
    /// Start building an engine for the consumer owning `own`.
    pub fn builder(host: Arc<dyn PackageHost>, own: Arc<dyn ResourceStore>) -> ThemeEngineBuilder {
        ThemeEngineBuilder::new(host, own)
    }

    // =========================================================================
    // Identity and configuration
    // =========================================================================

    /// The consuming package.
    pub fn consumer(&self) -> &str {
        self.registry.consumer()
    }

    /// The engine's configuration.
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// The engine's caches.
    pub fn cache(&self) -> &Arc<ThemeCache> {
        &self.cache
    }

    /// The signal install events are received on.
    pub fn package_events(&self) -> &Arc<PackageEvents> {
        &self.events
    }

    /// Select the active theme package. Takes effect on the next lookup.
    pub fn set_active_theme(&self, package_id: impl Into<String>) {
        self.registry.set_active_theme(package_id);
    }

    /// Go back to the consumer's own resources.
    pub fn clear_active_theme(&self) {
        self.registry.clear_active_theme();
    }

    /// The active theme package (the consumer itself when none is selected).
    pub fn active_theme(&self) -> String {
        self.registry.active_theme()
    }

    /// Set or clear the package whose theme providers are enumerated.
    pub fn set_package_override(&self, package_id: Option<String>) {
        self.registry.set_override(package_id);
    }

    /// Current theme selection.
    pub fn identity(&self) -> ThemeIdentity {
        self.registry.identity()
    }

    // =========================================================================
    // Theme discovery
    // =========================================================================

    /// Installed packages providing themes for this consumer (or the
    /// override). Empty when the directory query fails.
    pub fn theme_providers(&self) -> Vec<InstalledThemeApp> {
        self.registry
            .enumerate_theme_providers(self.host.as_ref(), &self.config)
    }

    /// Picker entries: the consumer first, then every provider.
    pub fn theme_choices(&self) -> ThemeChoices {
        let consumer = self.consumer();
        let label = self
            .host
            .application_label(consumer)
            .unwrap_or_else(|| consumer.to_string());
        ThemeChoices::new(InstalledThemeApp::new(label, consumer), self.theme_providers())
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Reinstall subscription state for `package_id`.
    pub fn subscription_state(&self, package_id: &str) -> SubscriptionState {
        self.listener.state(package_id)
    }

    /// Drop every cached entry for `package_id` as this consumer's theme.
    pub fn invalidate(&self, package_id: &str) -> usize {
        self.cache.invalidate(self.consumer(), package_id)
    }

    // =========================================================================
    // Namespaces
    // =========================================================================

    fn key(&self, theme: &str, name: &str) -> CacheKey {
        CacheKey::new(self.consumer(), theme, name)
    }

    /// Open the theme's store, unless the theme is the consumer itself.
    fn theme_store(&self, theme: &str) -> Option<Arc<dyn ResourceStore>> {
        if theme == self.consumer() {
            return None;
        }
        match self.host.open_package(theme) {
            Ok(store) => {
                self.listener.ensure_registered(theme);
                Some(store)
            }
            Err(err) => {
                tracing::warn!(target: targets::RESOLVE, theme, error = %err, "theme package unavailable, using own resources");
                None
            }
        }
    }

    /// Find the store and handle holding `name`, theme first.
    fn locate(
        &self,
        theme: &str,
        kind: ResourceKind,
        name: &str,
    ) -> Option<(Arc<dyn ResourceStore>, ResourceId)> {
        if let Some(store) = self.theme_store(theme)
            && let Some(id) = store.resolve_id(kind, name)
        {
            return Some((store, id));
        }
        match self.own.resolve_id(kind, name) {
            Some(id) => Some((self.own.clone(), id)),
            None => {
                tracing::trace!(target: targets::RESOLVE, %kind, name, "resource not found");
                None
            }
        }
    }

    /// Decode `name` from the theme, falling back to the consumer's store
    /// when the theme lacks it or cannot decode it.
    fn lookup(&self, theme: &str, kind: ValueKind, name: &str) -> Option<ResolvedValue> {
        if let Some(store) = self.theme_store(theme)
            && let Some(value) = decode_from(store.as_ref(), kind, name)
        {
            return Some(value);
        }
        let value = decode_from(self.own.as_ref(), kind, name);
        if value.is_none() {
            tracing::trace!(target: targets::RESOLVE, ?kind, name, "resource not found");
        }
        value
    }

    // =========================================================================
    // Generic resolution
    // =========================================================================

    /// Resolve `name` as `kind`.
    pub fn resolve(&self, kind: ValueKind, name: &str) -> Option<ResolvedValue> {
        match kind {
            ValueKind::String => self.string(name).map(ResolvedValue::String),
            ValueKind::Color => self.color(name).map(ResolvedValue::Color),
            ValueKind::ColorStateList => self
                .color_state_list(name)
                .map(ResolvedValue::ColorStateList),
            ValueKind::Drawable => self.drawable(name).map(ResolvedValue::Drawable),
            ValueKind::Boolean => self.boolean(name).map(ResolvedValue::Boolean),
            ValueKind::Dimension => self.dimension(name).map(ResolvedValue::Dimension),
            ValueKind::Font => self.font(name).map(ResolvedValue::Font),
        }
    }

    /// Resolve a [`Res`] in its natural form. Raw resources yield the
    /// handle of the store that holds them.
    pub fn resolve_res(&self, res: &Res) -> Option<ResolvedValue> {
        let kind = match res.kind() {
            ResourceKind::Color => ValueKind::Color,
            ResourceKind::String => ValueKind::String,
            ResourceKind::Drawable => ValueKind::Drawable,
            ResourceKind::Boolean => ValueKind::Boolean,
            ResourceKind::Dimension => ValueKind::Dimension,
            ResourceKind::Font => ValueKind::Font,
            ResourceKind::Raw => {
                return self.sound(res.name()).map(|sound| ResolvedValue::Id(sound.id));
            }
        };
        self.resolve(kind, res.name())
    }

    /// Decode a numeric handle from the consumer's own namespace.
    ///
    /// `0` and unknown handles yield `None`.
    pub fn res_from_handle(&self, handle: u32) -> Option<Res> {
        let id = ResourceId::new(handle)?;
        let entry = self.own.entry(id)?;
        let res = Res::from_entry(&entry);
        if res.is_none() {
            tracing::debug!(target: targets::RESOLVE, handle = %id, type_name = %entry.type_name, "handle has an unsupported type");
        }
        res
    }

    /// Resolve the resource a numeric handle names.
    pub fn resolve_handle(&self, handle: u32) -> Option<ResolvedValue> {
        let res = self.res_from_handle(handle)?;
        self.resolve_res(&res)
    }

    fn handle_name(&self, handle: u32, kind: ResourceKind) -> Option<String> {
        self.res_from_handle(handle)
            .filter(|res| res.kind() == kind)
            .map(|res| res.name().to_string())
    }

    /// Handle of `name` in the active theme package only.
    pub fn theme_id(&self, kind: ResourceKind, name: &str) -> Option<ResourceId> {
        let theme = self.active_theme();
        match self.theme_store(&theme) {
            Some(store) => store.resolve_id(kind, name),
            None if theme == self.consumer() => self.own.resolve_id(kind, name),
            None => None,
        }
    }

    // =========================================================================
    // Typed getters
    // =========================================================================

    /// A string resource. Not cached.
    pub fn string(&self, name: &str) -> Option<String> {
        let theme = self.active_theme();
        self.lookup(&theme, ValueKind::String, name)?.into_string()
    }

    /// A color resource.
    pub fn color(&self, name: &str) -> Option<Color> {
        let theme = self.active_theme();
        let key = self.key(&theme, name);
        if let Some(color) = self.cache.color(&key) {
            tracing::trace!(target: targets::CACHE, %key, "color cache hit");
            return Some(color);
        }
        let generation = self.cache.generation(self.consumer(), &theme);
        let color = self.lookup(&theme, ValueKind::Color, name)?.as_color()?;
        self.cache.put_color_if(generation, key, color);
        Some(color)
    }

    /// A color state list. Plain colors become single-entry lists.
    pub fn color_state_list(&self, name: &str) -> Option<ColorStateList> {
        let theme = self.active_theme();
        let key = self.key(&theme, name);
        if let Some(list) = self.cache.color_state_list(&key) {
            tracing::trace!(target: targets::CACHE, %key, "color state list cache hit");
            return Some(list);
        }
        let generation = self.cache.generation(self.consumer(), &theme);
        let list = self
            .lookup(&theme, ValueKind::ColorStateList, name)?
            .into_color_state_list()?;
        self.cache.put_color_state_list_if(generation, key, list.clone());
        Some(list)
    }

    /// A drawable. Every call returns a new instance with its own state.
    pub fn drawable(&self, name: &str) -> Option<Drawable> {
        let theme = self.active_theme();
        let key = self.key(&theme, name);
        if let Some(drawable) = self.cache.drawable(&key) {
            tracing::trace!(target: targets::CACHE, %key, "drawable cache hit");
            return Some(drawable);
        }
        let generation = self.cache.generation(self.consumer(), &theme);
        let template = self
            .lookup(&theme, ValueKind::Drawable, name)?
            .into_drawable()?
            .template()
            .clone();
        self.cache.put_drawable_if(generation, key, template.clone());
        Some(Drawable::new(template))
    }

    /// A boolean resource. Not cached.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        let theme = self.active_theme();
        self.lookup(&theme, ValueKind::Boolean, name)?.as_bool()
    }

    /// A dimension resource. Not cached.
    pub fn dimension(&self, name: &str) -> Option<f32> {
        let theme = self.active_theme();
        self.lookup(&theme, ValueKind::Dimension, name)?.as_dimension()
    }

    /// A font, through the cache and the tiered font chain.
    ///
    /// A font found nowhere is remembered as missing until the theme's
    /// partition is invalidated.
    pub fn font(&self, name: &str) -> Option<Typeface> {
        let theme = self.active_theme();
        let key = self.key(&theme, name);
        if let Some(cached) = self.cache.typeface(&key) {
            tracing::trace!(target: targets::CACHE, %key, found = cached.is_some(), "typeface cache hit");
            return cached;
        }

        let generation = self.cache.generation(self.consumer(), &theme);
        let theme_store = self.theme_store(&theme);
        let chain = FontChain {
            host: self.host.as_ref(),
            config: &self.config,
            loader: self.loader.as_ref(),
            theme: theme_store
                .as_ref()
                .map(|store| (theme.as_str(), &**store)),
            own: self.own.as_ref(),
        };
        let typeface = chain.resolve(name).map(|(_, typeface)| typeface);
        self.cache.put_typeface_if(generation, key, typeface.clone());
        typeface
    }

    /// The font in the default slot.
    pub fn default_font(&self) -> Option<Typeface> {
        self.font(&self.config.default_font_name)
    }

    /// Put `typeface` in the default slot for the active theme.
    pub fn set_font(&self, typeface: Typeface) {
        let theme = self.active_theme();
        let key = self.key(&theme, &self.config.default_font_name);
        self.cache.put_typeface(key, Some(typeface));
    }

    // =========================================================================
    // Handle getters
    // =========================================================================

    /// [`string`](Self::string) for a numeric handle.
    pub fn string_by_handle(&self, handle: u32) -> Option<String> {
        self.string(&self.handle_name(handle, ResourceKind::String)?)
    }

    /// [`color`](Self::color) for a numeric handle.
    pub fn color_by_handle(&self, handle: u32) -> Option<Color> {
        self.color(&self.handle_name(handle, ResourceKind::Color)?)
    }

    /// [`color_state_list`](Self::color_state_list) for a numeric handle.
    pub fn color_state_list_by_handle(&self, handle: u32) -> Option<ColorStateList> {
        self.color_state_list(&self.handle_name(handle, ResourceKind::Color)?)
    }

    /// [`drawable`](Self::drawable) for a numeric handle.
    pub fn drawable_by_handle(&self, handle: u32) -> Option<Drawable> {
        self.drawable(&self.handle_name(handle, ResourceKind::Drawable)?)
    }

    /// [`boolean`](Self::boolean) for a numeric handle.
    pub fn boolean_by_handle(&self, handle: u32) -> Option<bool> {
        self.boolean(&self.handle_name(handle, ResourceKind::Boolean)?)
    }

    /// [`dimension`](Self::dimension) for a numeric handle.
    pub fn dimension_by_handle(&self, handle: u32) -> Option<f32> {
        self.dimension(&self.handle_name(handle, ResourceKind::Dimension)?)
    }

    /// [`font`](Self::font) for a numeric handle.
    pub fn font_by_handle(&self, handle: u32) -> Option<Typeface> {
        self.font(&self.handle_name(handle, ResourceKind::Font)?)
    }

    /// [`sound_uri`](Self::sound_uri) for a numeric handle.
    pub fn sound_uri_by_handle(&self, handle: u32) -> Option<String> {
        self.sound_uri(&self.handle_name(handle, ResourceKind::Raw)?)
    }

    // =========================================================================
    // Sounds
    // =========================================================================

    /// The namespace and handle of a raw sound resource.
    pub fn sound(&self, name: &str) -> Option<SoundSource> {
        let theme = self.active_theme();
        let (store, id) = self.locate(&theme, ResourceKind::Raw, name)?;
        Some(SoundSource {
            package: store.package_id().to_string(),
            id,
        })
    }

    /// URI of a raw sound resource.
    pub fn sound_uri(&self, name: &str) -> Option<String> {
        self.sound(name)
            .map(|sound| sound.uri(&self.config.resource_uri_scheme))
    }

    /// Playback duration of a raw sound resource.
    pub fn sound_duration(&self, name: &str) -> Option<Duration> {
        let theme = self.active_theme();
        let (store, id) = self.locate(&theme, ResourceKind::Raw, name)?;
        match store.sound_duration(id) {
            Ok(duration) => Some(duration),
            Err(err) => {
                tracing::warn!(target: targets::RESOLVE, sound = name, package = store.package_id(), error = %err, "sound duration unavailable");
                None
            }
        }
    }

    // =========================================================================
    // Host styles
    // =========================================================================

    /// Host style named by the theme's `app_theme` string.
    ///
    /// [`StyleId::NONE`] when the string or the style is missing.
    pub fn theme_style(&self) -> StyleId {
        self.style_named_by(&self.config.theme_string)
    }

    /// Host style named by the theme's `app_settings_theme` string.
    pub fn settings_theme_style(&self) -> StyleId {
        self.style_named_by(&self.config.settings_theme_string)
    }

    /// Whether the theme's `app_theme` token mentions "light".
    ///
    /// Themes without the string count as dark.
    pub fn is_light_theme(&self) -> bool {
        self.string(&self.config.theme_string)
            .is_some_and(|name| is_light_token(&style_token(&name)))
    }

    fn style_named_by(&self, string_name: &str) -> StyleId {
        match self.string(string_name) {
            Some(style_name) => self.styles.lookup(&style_name),
            None => {
                tracing::debug!(target: targets::STYLE, string = string_name, "theme names no host style");
                StyleId::NONE
            }
        }
    }
}

fn decode_from(store: &dyn ResourceStore, kind: ValueKind, name: &str) -> Option<ResolvedValue> {
    let id = store.resolve_id(kind.resource_kind(), name)?;
    match store.decode(id, kind) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(target: targets::RESOLVE, package = store.package_id(), ?kind, name, error = %err, "resource could not be decoded");
            None
        }
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("consumer", &self.consumer())
            .field("identity", &self.identity())
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ThemeEngine: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryHost, MemoryStore};

    const APP: &str = "com.example.app";
    const DARK: &str = "com.example.dark";

    fn engine(host: &Arc<MemoryHost>, own: MemoryStore) -> ThemeEngine {
        let own = host.install(own);
        ThemeEngine::builder(host.clone(), own)
            .events(host.events())
            .build()
            .unwrap()
    }

    #[test]
    fn own_resources_without_theme() {
        let host = Arc::new(MemoryHost::new());
        let engine = engine(&host, MemoryStore::new(APP).with_string("title", "App"));

        assert_eq!(engine.active_theme(), APP);
        assert_eq!(engine.string("title").as_deref(), Some("App"));
        // The own package is never opened as a theme.
        assert_eq!(host.open_calls(), 0);
    }

    #[test]
    fn missing_theme_falls_back() {
        let host = Arc::new(MemoryHost::new());
        let engine = engine(&host, MemoryStore::new(APP).with_color("accent", Color::WHITE));
        engine.set_active_theme("com.example.missing");

        assert_eq!(engine.color("accent"), Some(Color::WHITE));
        assert_eq!(engine.subscription_state("com.example.missing"), SubscriptionState::Unregistered);
    }

    #[test]
    fn undecodable_theme_value_falls_back() {
        let host = Arc::new(MemoryHost::new());
        let engine = engine(&host, MemoryStore::new(APP).with_color("accent", Color::WHITE));
        host.install(MemoryStore::new(DARK).with_corrupt(ResourceKind::Color, "accent"));
        engine.set_active_theme(DARK);

        assert_eq!(engine.color("accent"), Some(Color::WHITE));
    }

    #[test]
    fn resolve_dispatches_by_kind() {
        let host = Arc::new(MemoryHost::new());
        let engine = engine(
            &host,
            MemoryStore::new(APP)
                .with_bool("compact", true)
                .with_dimension("padding", 8.0)
                .with_color("accent", Color::WHITE),
        );

        assert_eq!(engine.resolve(ValueKind::Boolean, "compact"), Some(ResolvedValue::Boolean(true)));
        assert_eq!(engine.resolve(ValueKind::Dimension, "padding"), Some(ResolvedValue::Dimension(8.0)));
        assert_eq!(
            engine.resolve(ValueKind::ColorStateList, "accent"),
            Some(ResolvedValue::ColorStateList(ColorStateList::single(Color::WHITE)))
        );
        assert_eq!(engine.resolve(ValueKind::String, "compact"), None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let host = Arc::new(MemoryHost::new());
        let own = host.install(MemoryStore::new(APP));
        let result = ThemeEngine::builder(host.clone(), own)
            .config(ThemeConfig::default().with_cache_capacity(0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn theme_id_only_consults_theme() {
        let host = Arc::new(MemoryHost::new());
        let engine = engine(&host, MemoryStore::new(APP).with_color("accent", Color::WHITE));
        host.install(MemoryStore::new(DARK).with_color("background", Color::BLACK));
        engine.set_active_theme(DARK);

        assert!(engine.theme_id(ResourceKind::Color, "background").is_some());
        assert!(engine.theme_id(ResourceKind::Color, "accent").is_none());
    }
}
