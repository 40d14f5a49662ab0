//! Font resolution.
//!
//! Fonts are looked up through a longer chain than other kinds. After the
//! engine's cache, the tiers are tried in order and the first hit wins:
//!
//! 1. [`FontTier::ThemeResource`]: a native font resource in the theme
//!    package (hosts with native font support only)
//! 2. [`FontTier::ThemeContent`]: `<name>.ttf` / `<name>.otf` served by the
//!    theme's file provider, written to the font cache directory and loaded
//!    from disk
//! 3. [`FontTier::OwnResource`]: a native font resource in the consumer's
//!    own package
//! 4. [`FontTier::OwnAsset`]: `<name>.ttf` / `<name>.otf` in the consumer's
//!    asset bundle
//!
//! Each tier reports a [`TierOutcome`]. Failures are logged and the chain
//! moves on.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use horizon_theme_core::logging::targets;

use crate::config::ThemeConfig;
use crate::error::{Result, ThemeError};
use crate::host::{PackageHost, ResourceStore};
use crate::resource::{ResourceKind, Typeface, TypefaceOrigin, ValueKind};

/// Turns font bytes into a [`Typeface`].
pub trait TypefaceLoader: Send + Sync {
    /// Load a typeface from raw font data.
    fn load_bytes(&self, data: Vec<u8>, origin: TypefaceOrigin) -> Result<Typeface>;

    /// Load a typeface from a file on disk.
    fn load_file(&self, path: &Path) -> Result<Typeface> {
        let data = fs::read(path).map_err(|e| ThemeError::io(path, e))?;
        self.load_bytes(data, TypefaceOrigin::File(path.to_path_buf()))
    }
}

/// Default loader. Validates TrueType/OpenType data with `ttf-parser` and
/// reads the family name from the `name` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParsedTypefaceLoader;

impl TypefaceLoader for ParsedTypefaceLoader {
    fn load_bytes(&self, data: Vec<u8>, origin: TypefaceOrigin) -> Result<Typeface> {
        let family = {
            let face = ttf_parser::Face::parse(&data, 0)
                .map_err(|e| ThemeError::InvalidFont(e.to_string()))?;
            family_name(&face)
        };
        Ok(Typeface::new(family, origin, Some(Arc::from(data))))
    }
}

fn family_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
        .find_map(|name| name.to_string())
}

/// The tiers after the cache, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontTier {
    ThemeResource,
    ThemeContent,
    OwnResource,
    OwnAsset,
}

impl FontTier {
    /// All tiers in lookup order.
    pub const ORDER: [FontTier; 4] = [
        FontTier::ThemeResource,
        FontTier::ThemeContent,
        FontTier::OwnResource,
        FontTier::OwnAsset,
    ];

    /// Short name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            FontTier::ThemeResource => "theme-resource",
            FontTier::ThemeContent => "theme-content",
            FontTier::OwnResource => "own-resource",
            FontTier::OwnAsset => "own-asset",
        }
    }
}

/// Result of one tier.
#[derive(Debug)]
pub enum TierOutcome {
    /// The tier produced a typeface.
    Found(Typeface),
    /// The tier has nothing for this name (or cannot run on this host).
    NotApplicable,
    /// The tier found something but could not load it.
    Failed(ThemeError),
}

/// Inputs for one run of the chain.
pub(crate) struct FontChain<'a> {
    pub host: &'a dyn PackageHost,
    pub config: &'a ThemeConfig,
    pub loader: &'a dyn TypefaceLoader,
    /// Theme package id and its store, when a theme other than the consumer
    /// is active and installed.
    pub theme: Option<(&'a str, &'a dyn ResourceStore)>,
    pub own: &'a dyn ResourceStore,
}

impl FontChain<'_> {
    /// Run every tier until one succeeds.
    pub fn resolve(&self, name: &str) -> Option<(FontTier, Typeface)> {
        for tier in FontTier::ORDER {
            match self.attempt(tier, name) {
                TierOutcome::Found(typeface) => {
                    tracing::debug!(target: targets::FONT, font = name, tier = tier.as_str(), family = ?typeface.family(), "font resolved");
                    return Some((tier, typeface));
                }
                TierOutcome::NotApplicable => {
                    tracing::trace!(target: targets::FONT, font = name, tier = tier.as_str(), "tier not applicable");
                }
                TierOutcome::Failed(err) => {
                    tracing::warn!(target: targets::FONT, font = name, tier = tier.as_str(), error = %err, "font tier failed");
                }
            }
        }
        tracing::debug!(target: targets::FONT, font = name, "font not found in any tier");
        None
    }

    /// Run a single tier.
    pub fn attempt(&self, tier: FontTier, name: &str) -> TierOutcome {
        match tier {
            FontTier::ThemeResource => match self.theme {
                Some((_, store)) if self.host.supports_native_fonts() => {
                    native_font(store, name)
                }
                _ => TierOutcome::NotApplicable,
            },
            FontTier::ThemeContent => match self.theme {
                Some((theme_id, _)) => self.content_font(theme_id, name),
                None => TierOutcome::NotApplicable,
            },
            FontTier::OwnResource if self.host.supports_native_fonts() => {
                native_font(self.own, name)
            }
            FontTier::OwnResource => TierOutcome::NotApplicable,
            FontTier::OwnAsset => self.asset_font(name),
        }
    }

    fn content_font(&self, theme_id: &str, name: &str) -> TierOutcome {
        if !is_plain_file_stem(name) {
            tracing::debug!(target: targets::FONT, font = name, "font name is not a plain file name");
            return TierOutcome::NotApplicable;
        }
        let mut last_err = None;
        for ext in &self.config.font_extensions {
            let file_name = format!("{name}{ext}");
            let uri = self.config.content_uri(theme_id, &file_name);
            let reader = match self.host.open_content(&uri) {
                Ok(reader) => reader,
                Err(err) if err.is_not_found() => continue,
                Err(err) => {
                    tracing::debug!(target: targets::FONT, %uri, error = %err, "font content unreadable");
                    last_err = Some(err);
                    continue;
                }
            };

            let path = self.config.font_cache_dir.join(theme_id).join(&file_name);
            match materialize(reader, &path).and_then(|()| self.loader.load_file(&path)) {
                Ok(typeface) => return TierOutcome::Found(typeface),
                Err(err) => {
                    tracing::debug!(target: targets::FONT, path = %path.display(), error = %err, "served font unusable");
                    last_err = Some(err);
                }
            }
        }
        last_err.map_or(TierOutcome::NotApplicable, TierOutcome::Failed)
    }

    fn asset_font(&self, name: &str) -> TierOutcome {
        if !is_plain_file_stem(name) {
            tracing::debug!(target: targets::FONT, font = name, "font name is not a plain file name");
            return TierOutcome::NotApplicable;
        }
        let mut last_err = None;
        for ext in &self.config.font_extensions {
            let file_name = format!("{name}{ext}");
            let data = match self.own.open_asset(&file_name) {
                Ok(data) => data,
                Err(err) if err.is_not_found() => continue,
                Err(err) => {
                    tracing::debug!(target: targets::FONT, asset = %file_name, error = %err, "font asset unreadable");
                    last_err = Some(err);
                    continue;
                }
            };

            let origin = TypefaceOrigin::Asset {
                package: self.own.package_id().to_string(),
                file_name: file_name.clone(),
            };
            match self.loader.load_bytes(data, origin) {
                Ok(typeface) => return TierOutcome::Found(typeface),
                Err(err) => {
                    tracing::debug!(target: targets::FONT, asset = %file_name, error = %err, "font asset unusable");
                    last_err = Some(err);
                }
            }
        }
        last_err.map_or(TierOutcome::NotApplicable, TierOutcome::Failed)
    }
}

/// Font names become file names under the cache directory and the asset
/// bundle, so they must not carry separators or parent references.
fn is_plain_file_stem(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

fn native_font(store: &dyn ResourceStore, name: &str) -> TierOutcome {
    let Some(id) = store.resolve_id(ResourceKind::Font, name) else {
        return TierOutcome::NotApplicable;
    };
    match store.decode(id, ValueKind::Font) {
        Ok(value) => match value.into_typeface() {
            Some(typeface) => TierOutcome::Found(typeface),
            None => TierOutcome::Failed(ThemeError::decode(
                ResourceKind::Font,
                name,
                "store returned a non-font value",
            )),
        },
        Err(err) => TierOutcome::Failed(err),
    }
}

/// Replace `path` with the contents of `reader`.
fn materialize(mut reader: Box<dyn Read + Send>, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| ThemeError::io(dir, e))?;
    }
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ThemeError::io(path, e)),
    }
    let mut file = fs::File::create(path).map_err(|e| ThemeError::io(path, e))?;
    io::copy(&mut reader, &mut file).map_err(|e| ThemeError::io(path, e))?;
    tracing::trace!(target: targets::FONT, path = %path.display(), "font materialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryHost, MemoryStore};

    const APP: &str = "com.example.app";
    const DARK: &str = "com.example.dark";

    /// Accepts any data starting with `FONT`; the rest is the family name.
    struct FakeLoader;

    impl TypefaceLoader for FakeLoader {
        fn load_bytes(&self, data: Vec<u8>, origin: TypefaceOrigin) -> Result<Typeface> {
            let family = data
                .strip_prefix(b"FONT")
                .ok_or_else(|| ThemeError::InvalidFont("missing magic".into()))?;
            let family = String::from_utf8_lossy(family).into_owned();
            Ok(Typeface::new(Some(family), origin, Some(Arc::from(data))))
        }
    }

    fn font_bytes(family: &str) -> Vec<u8> {
        let mut data = b"FONT".to_vec();
        data.extend_from_slice(family.as_bytes());
        data
    }

    struct Fixture {
        host: MemoryHost,
        config: ThemeConfig,
        theme: MemoryStore,
        own: MemoryStore,
        _dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new(theme: MemoryStore, own: MemoryStore) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = ThemeConfig::default().with_font_cache_dir(dir.path());
            Self {
                host: MemoryHost::new(),
                config,
                theme,
                own,
                _dir: dir,
            }
        }

        fn chain(&self) -> FontChain<'_> {
            FontChain {
                host: &self.host,
                config: &self.config,
                loader: &FakeLoader,
                theme: Some((DARK, &self.theme as &dyn ResourceStore)),
                own: &self.own,
            }
        }
    }

    #[test]
    fn theme_resource_wins() {
        let fixture = Fixture::new(
            MemoryStore::new(DARK).with_font("font", Some("Dark Sans")),
            MemoryStore::new(APP).with_font("font", Some("App Sans")),
        );
        let (tier, typeface) = fixture.chain().resolve("font").unwrap();
        assert_eq!(tier, FontTier::ThemeResource);
        assert_eq!(typeface.family(), Some("Dark Sans"));
    }

    #[test]
    fn native_tiers_skipped_without_host_support() {
        let fixture = Fixture::new(
            MemoryStore::new(DARK).with_font("font", Some("Dark Sans")),
            MemoryStore::new(APP).with_asset("font.ttf", font_bytes("Asset Sans")),
        );
        fixture.host.set_native_fonts(false);

        let chain = fixture.chain();
        assert!(matches!(chain.attempt(FontTier::ThemeResource, "font"), TierOutcome::NotApplicable));
        let (tier, typeface) = chain.resolve("font").unwrap();
        assert_eq!(tier, FontTier::OwnAsset);
        assert_eq!(typeface.family(), Some("Asset Sans"));
    }

    #[test]
    fn content_font_is_materialized() {
        let fixture = Fixture::new(MemoryStore::new(DARK), MemoryStore::new(APP));
        let uri = fixture.config.content_uri(DARK, "font.otf");
        fixture.host.serve_content(uri, font_bytes("Served Sans"));

        let (tier, typeface) = fixture.chain().resolve("font").unwrap();
        assert_eq!(tier, FontTier::ThemeContent);
        assert_eq!(typeface.family(), Some("Served Sans"));

        let path = fixture.config.font_cache_dir.join(DARK).join("font.otf");
        assert!(path.exists());
        assert_eq!(typeface.origin(), &TypefaceOrigin::File(path));
    }

    #[test]
    fn content_font_overwrites_stale_file() {
        let fixture = Fixture::new(MemoryStore::new(DARK), MemoryStore::new(APP));
        let path = fixture.config.font_cache_dir.join(DARK).join("font.ttf");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, font_bytes("Stale Sans")).unwrap();

        let uri = fixture.config.content_uri(DARK, "font.ttf");
        fixture.host.serve_content(uri, font_bytes("Fresh Sans"));

        let (_, typeface) = fixture.chain().resolve("font").unwrap();
        assert_eq!(typeface.family(), Some("Fresh Sans"));
    }

    #[test]
    fn broken_tier_falls_through() {
        let fixture = Fixture::new(
            MemoryStore::new(DARK).with_corrupt(ResourceKind::Font, "font"),
            MemoryStore::new(APP).with_font("font", Some("App Sans")),
        );
        let chain = fixture.chain();
        assert!(matches!(chain.attempt(FontTier::ThemeResource, "font"), TierOutcome::Failed(_)));

        let (tier, typeface) = chain.resolve("font").unwrap();
        assert_eq!(tier, FontTier::OwnResource);
        assert_eq!(typeface.family(), Some("App Sans"));
    }

    #[test]
    fn unloadable_asset_is_a_failure() {
        let fixture = Fixture::new(
            MemoryStore::new(DARK),
            MemoryStore::new(APP).with_asset("font.ttf", b"garbage".to_vec()),
        );
        let chain = fixture.chain();
        assert!(matches!(chain.attempt(FontTier::OwnAsset, "font"), TierOutcome::Failed(ThemeError::InvalidFont(_))));
        assert!(chain.resolve("font").is_none());
    }

    #[test]
    fn broken_ttf_asset_falls_back_to_otf() {
        let fixture = Fixture::new(
            MemoryStore::new(DARK),
            MemoryStore::new(APP)
                .with_asset("font.ttf", b"garbage".to_vec())
                .with_asset("font.otf", font_bytes("Open Sans")),
        );
        let (tier, typeface) = fixture.chain().resolve("font").unwrap();
        assert_eq!(tier, FontTier::OwnAsset);
        assert_eq!(typeface.family(), Some("Open Sans"));
        assert_eq!(
            typeface.origin(),
            &TypefaceOrigin::Asset {
                package: APP.to_string(),
                file_name: "font.otf".to_string(),
            }
        );
    }

    #[test]
    fn broken_ttf_content_falls_back_to_otf() {
        let fixture = Fixture::new(MemoryStore::new(DARK), MemoryStore::new(APP));
        fixture
            .host
            .serve_content(fixture.config.content_uri(DARK, "font.ttf"), b"garbage".to_vec());
        fixture
            .host
            .serve_content(fixture.config.content_uri(DARK, "font.otf"), font_bytes("Served Sans"));

        let (tier, typeface) = fixture.chain().resolve("font").unwrap();
        assert_eq!(tier, FontTier::ThemeContent);
        assert_eq!(typeface.family(), Some("Served Sans"));
        let path = fixture.config.font_cache_dir.join(DARK).join("font.otf");
        assert_eq!(typeface.origin(), &TypefaceOrigin::File(path));
    }

    #[test]
    fn names_with_path_components_are_not_files() {
        let fixture = Fixture::new(MemoryStore::new(DARK), MemoryStore::new(APP));
        let uri = fixture.config.content_uri(DARK, "../escape.ttf");
        fixture.host.serve_content(uri, font_bytes("Escape Sans"));

        let chain = fixture.chain();
        for name in ["../escape", "sub/font", "sub\\font", ""] {
            assert!(matches!(chain.attempt(FontTier::ThemeContent, name), TierOutcome::NotApplicable));
            assert!(matches!(chain.attempt(FontTier::OwnAsset, name), TierOutcome::NotApplicable));
        }
        assert!(!fixture.config.font_cache_dir.join("escape.ttf").exists());
        assert!(is_plain_file_stem("font"));
        assert!(is_plain_file_stem("font.bold"));
    }

    #[test]
    fn without_theme_only_own_tiers_run() {
        let fixture = Fixture::new(
            MemoryStore::new(DARK).with_font("font", Some("Dark Sans")),
            MemoryStore::new(APP).with_asset("font.otf", font_bytes("Asset Sans")),
        );
        let chain = FontChain {
            theme: None,
            ..fixture.chain()
        };
        let (tier, _) = chain.resolve("font").unwrap();
        assert_eq!(tier, FontTier::OwnAsset);
    }

    #[test]
    fn parsed_loader_rejects_garbage() {
        let err = ParsedTypefaceLoader
            .load_bytes(vec![0; 16], TypefaceOrigin::Custom)
            .unwrap_err();
        assert!(matches!(err, ThemeError::InvalidFont(_)));
    }

    #[test]
    fn parsed_loader_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ParsedTypefaceLoader
            .load_file(&dir.path().join("missing.ttf"))
            .unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }
}
