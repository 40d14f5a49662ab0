//! Host style lookup.
//!
//! A theme names the host style it wants through a string resource holding a
//! dotted token such as `Theme.Material.Light`. The token is normalized to
//! `Theme_Material_Light` and looked up in a [`StyleTable`] the host fills
//! once at startup.

use std::collections::HashMap;
use std::fmt;

use horizon_theme_core::logging::targets;

/// A host style identifier. `0` means "no special styling".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(u32);

impl StyleId {
    /// The "no style" sentinel.
    pub const NONE: StyleId = StyleId(0);

    /// Wrap a raw style id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this is [`StyleId::NONE`].
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Normalize a dotted style name into a table token.
pub fn style_token(name: &str) -> String {
    name.trim().replace('.', "_")
}

/// Whether a style token names a light theme.
pub fn is_light_token(token: &str) -> bool {
    token.to_ascii_lowercase().contains("light")
}

/// Token to style id mapping.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    styles: HashMap<String, StyleId>,
}

impl StyleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, id)` pairs. Dotted names are normalized.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (name, id) in entries {
            table.insert(name.as_ref(), StyleId::new(id));
        }
        table
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: &str, id: StyleId) {
        self.styles.insert(style_token(name), id);
    }

    /// Look up a dotted or underscored name.
    ///
    /// Unknown names yield [`StyleId::NONE`].
    pub fn lookup(&self, name: &str) -> StyleId {
        let token = style_token(name);
        match self.styles.get(&token) {
            Some(id) => *id,
            None => {
                tracing::warn!(target: targets::STYLE, %token, "unknown style token");
                StyleId::NONE
            }
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
