//! Resource kinds, handles and symbolic identities.

use std::fmt;
use std::num::NonZeroU32;

/// Resource type bucket.
///
/// The string forms match the type names hosts use for their resource
/// directories (`color`, `string`, `drawable`, `raw`, `bool`, `dimen`,
/// `font`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Colors and color state lists.
    Color,
    /// Localizable strings.
    String,
    /// Images and other drawables.
    Drawable,
    /// Raw files, typically sounds.
    Raw,
    /// Boolean flags.
    Boolean,
    /// Dimensions.
    Dimension,
    /// Native font resources.
    Font,
}

impl ResourceKind {
    /// All kinds, in declaration order.
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Color,
        ResourceKind::String,
        ResourceKind::Drawable,
        ResourceKind::Raw,
        ResourceKind::Boolean,
        ResourceKind::Dimension,
        ResourceKind::Font,
    ];

    /// Get the host type name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Color => "color",
            ResourceKind::String => "string",
            ResourceKind::Drawable => "drawable",
            ResourceKind::Raw => "raw",
            ResourceKind::Boolean => "bool",
            ResourceKind::Dimension => "dimen",
            ResourceKind::Font => "font",
        }
    }

    /// Parse a host type name.
    pub fn from_type_name(s: &str) -> Option<Self> {
        match s {
            "color" => Some(ResourceKind::Color),
            "string" => Some(ResourceKind::String),
            "drawable" => Some(ResourceKind::Drawable),
            "raw" => Some(ResourceKind::Raw),
            "bool" => Some(ResourceKind::Boolean),
            "dimen" => Some(ResourceKind::Dimension),
            "font" => Some(ResourceKind::Font),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host-assigned numeric resource handle within one namespace.
///
/// The host uses `0` for "no resource"; that value cannot be represented,
/// so lookups return `Option<ResourceId>` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(NonZeroU32);

impl ResourceId {
    /// Wrap a raw handle. Returns `None` for the sentinel `0`.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw handle value.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a namespace knows about one of its handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Host type name (`color`, `drawable`, ...).
    pub type_name: String,
    /// Symbolic entry name.
    pub name: String,
}

impl ResourceEntry {
    /// Create an entry description.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// A typed, named handle to a resource.
///
/// `Res` values are immutable and carry no namespace: the engine decides
/// which namespace satisfies them at resolution time.
///
/// # Examples
///
/// ```
/// use horizon_theme::resource::{Res, ResourceKind};
///
/// let res = Res::new(ResourceKind::Color, "accent").unwrap();
/// assert_eq!(res.kind(), ResourceKind::Color);
/// assert_eq!(res.name(), "accent");
///
/// assert!(Res::new(ResourceKind::Color, "").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Res {
    kind: ResourceKind,
    name: String,
}

impl Res {
    /// Identify a resource by kind and symbolic name.
    ///
    /// Returns `None` for an empty name.
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        Some(Self { kind, name })
    }

    /// Build a `Res` from a namespace's description of one of its handles.
    ///
    /// Returns `None` when the type name is not a known kind or the name is
    /// empty.
    pub fn from_entry(entry: &ResourceEntry) -> Option<Self> {
        let kind = ResourceKind::from_type_name(&entry.type_name)?;
        Self::new(kind, entry.name.clone())
    }

    /// The resource kind.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The symbolic name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Res {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Res{{name={}, type={}}}", self.name, self.kind)
    }
}
