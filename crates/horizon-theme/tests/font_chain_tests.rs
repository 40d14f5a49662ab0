//! Integration tests for font resolution through the engine.

use std::sync::Arc;

use horizon_theme::cache::{CacheKey, CacheKind};
use horizon_theme::host::memory::{MemoryHost, MemoryStore};
use horizon_theme::prelude::*;
use horizon_theme::resource::TypefaceOrigin;

const APP: &str = "com.example.app";
const DARK: &str = "com.example.dark";

/// Accepts data starting with `FONT`; the rest is the family name.
struct TestLoader;

impl TypefaceLoader for TestLoader {
    fn load_bytes(&self, data: Vec<u8>, origin: TypefaceOrigin) -> Result<Typeface> {
        let Some(family) = data.strip_prefix(b"FONT") else {
            return Err(ThemeError::InvalidFont("missing magic".into()));
        };
        let family = String::from_utf8_lossy(family).into_owned();
        Ok(Typeface::new(Some(family), origin, Some(Arc::from(data))))
    }
}

fn font_bytes(family: &str) -> Vec<u8> {
    [b"FONT".as_slice(), family.as_bytes()].concat()
}

struct Fixture {
    host: Arc<MemoryHost>,
    own: Arc<MemoryStore>,
    engine: ThemeEngine,
    dir: tempfile::TempDir,
}

fn fixture(own: MemoryStore, theme: MemoryStore) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let host = Arc::new(MemoryHost::new());
    let own = host.install(own);
    host.install(theme);

    let engine = ThemeEngine::builder(host.clone(), own.clone())
        .config(ThemeConfig::default().with_font_cache_dir(dir.path()))
        .typeface_loader(Arc::new(TestLoader))
        .events(host.events())
        .active_theme(DARK)
        .build()
        .unwrap();
    Fixture { host, own, engine, dir }
}

#[test]
fn own_asset_is_the_last_tier() {
    let f = fixture(
        MemoryStore::new(APP).with_asset("font.ttf", font_bytes("Asset Sans")),
        MemoryStore::new(DARK),
    );

    let typeface = f.engine.default_font().unwrap();
    assert_eq!(typeface.family(), Some("Asset Sans"));
    assert_eq!(
        typeface.origin(),
        &TypefaceOrigin::Asset {
            package: APP.to_string(),
            file_name: "font.ttf".to_string(),
        }
    );

    let key = CacheKey::new(APP, DARK, "font");
    assert_eq!(key.to_string(), "com.example.app_com.example.dark_font");
    assert_eq!(f.engine.cache().typeface(&key), Some(Some(typeface)));
}

#[test]
fn theme_native_font_wins() {
    let f = fixture(
        MemoryStore::new(APP)
            .with_font("font", Some("App Sans"))
            .with_asset("font.ttf", font_bytes("Asset Sans")),
        MemoryStore::new(DARK).with_font("font", Some("Dark Sans")),
    );

    let typeface = f.engine.font("font").unwrap();
    assert_eq!(typeface.family(), Some("Dark Sans"));
    assert!(matches!(typeface.origin(), TypefaceOrigin::Resource { package, .. } if package == DARK));
}

#[test]
fn served_font_beats_own_resources() {
    let f = fixture(
        MemoryStore::new(APP).with_font("headline", Some("App Sans")),
        MemoryStore::new(DARK),
    );
    let uri = f.engine.config().content_uri(DARK, "headline.ttf");
    assert_eq!(uri, "content://com.example.dark.FileProvider/headline.ttf");
    f.host.serve_content(uri, font_bytes("Served Sans"));

    let typeface = f.engine.font("headline").unwrap();
    assert_eq!(typeface.family(), Some("Served Sans"));
    assert!(f.dir.path().join(DARK).join("headline.ttf").exists());
}

#[test]
fn native_fonts_need_host_support() {
    let f = fixture(
        MemoryStore::new(APP)
            .with_font("font", Some("App Sans"))
            .with_asset("font.otf", font_bytes("Asset Sans")),
        MemoryStore::new(DARK).with_font("font", Some("Dark Sans")),
    );
    f.host.set_native_fonts(false);

    assert_eq!(f.engine.default_font().unwrap().family(), Some("Asset Sans"));
}

#[test]
fn missing_font_is_cached_as_absent() {
    let f = fixture(MemoryStore::new(APP), MemoryStore::new(DARK));

    assert!(f.engine.font("font").is_none());
    let key = CacheKey::new(APP, DARK, "font");
    assert!(f.engine.cache().contains(CacheKind::Typeface, &key));
    assert_eq!(f.engine.cache().typeface(&key), Some(None));

    // The second lookup never reaches the stores.
    let resolves = f.own.resolve_calls();
    let opens = f.host.open_calls();
    assert!(f.engine.font("font").is_none());
    assert_eq!(f.own.resolve_calls(), resolves);
    assert_eq!(f.host.open_calls(), opens);
}

#[test]
fn broken_font_data_falls_through_and_caches_absence() {
    let f = fixture(
        MemoryStore::new(APP).with_asset("font.ttf", b"not a font".to_vec()),
        MemoryStore::new(DARK).with_corrupt(ResourceKind::Font, "font"),
    );

    assert!(f.engine.default_font().is_none());
    assert_eq!(f.engine.cache().stats().typefaces.entries, 1);
}

#[test]
fn set_font_seeds_the_default_slot() {
    let f = fixture(MemoryStore::new(APP), MemoryStore::new(DARK));
    let custom = Typeface::new(Some("Custom".into()), TypefaceOrigin::Custom, None);

    f.engine.set_font(custom.clone());
    assert_eq!(f.engine.default_font(), Some(custom));
    assert_eq!(f.host.open_calls(), 0);
}

#[test]
fn font_handles_resolve_through_the_chain() {
    let f = fixture(
        MemoryStore::new(APP).with_font("body", Some("App Sans")),
        MemoryStore::new(DARK).with_font("body", Some("Dark Sans")),
    );
    let handle = f.own.resolve_id(ResourceKind::Font, "body").unwrap().get();

    let typeface = f.engine.font_by_handle(handle).unwrap();
    assert_eq!(typeface.family(), Some("Dark Sans"));
}
