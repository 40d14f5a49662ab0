//! Decoded resource values.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::id::{ResourceId, ResourceKind};

/// A packed 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    /// Fully transparent.
    pub const TRANSPARENT: Color = Color(0);

    /// Create a color from a packed ARGB value.
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self(argb)
    }

    /// Create a color from components.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The packed ARGB value.
    pub const fn argb(self) -> u32 {
        self.0
    }

    /// Alpha component.
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red component.
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green component.
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue component.
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Widget states a color state list can select on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorState {
    Pressed,
    Focused,
    Selected,
    Checked,
    Activated,
    Disabled,
}

/// A color that varies with widget state.
///
/// Entries are matched in order; the first entry whose required states are
/// all present wins. If none match, the default color is used.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStateList {
    entries: Vec<(Vec<ColorState>, Color)>,
    default: Color,
}

impl ColorStateList {
    /// A list that always yields `color`.
    pub fn single(color: Color) -> Self {
        Self {
            entries: Vec::new(),
            default: color,
        }
    }

    /// Create a list with a default color.
    pub fn new(default: Color) -> Self {
        Self::single(default)
    }

    /// Add a state-specific entry.
    pub fn with_state(mut self, states: &[ColorState], color: Color) -> Self {
        self.entries.push((states.to_vec(), color));
        self
    }

    /// The fallback color.
    pub fn default_color(&self) -> Color {
        self.default
    }

    /// Pick the color for a set of active states.
    pub fn color_for(&self, active: &[ColorState]) -> Color {
        self.entries
            .iter()
            .find(|(required, _)| required.iter().all(|s| active.contains(s)))
            .map(|(_, color)| *color)
            .unwrap_or(self.default)
    }
}

/// Immutable decoded drawable data, shared between drawable instances.
#[derive(Debug, PartialEq)]
pub struct DrawableTemplate {
    package: String,
    name: String,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl DrawableTemplate {
    /// Create a template from decoded image data.
    pub fn new(
        package: impl Into<String>,
        name: impl Into<String>,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            width,
            height,
            data,
        }
    }

    /// Package the drawable was decoded from.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Symbolic resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intrinsic width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Decoded pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Per-instance mutable drawable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawableState {
    /// Opacity, 255 = opaque.
    pub alpha: u8,
    /// Optional multiply tint.
    pub tint: Option<Color>,
    /// Bounds as (left, top, right, bottom).
    pub bounds: Option<(i32, i32, i32, i32)>,
    /// Level for level-list style drawables.
    pub level: u16,
}

impl Default for DrawableState {
    fn default() -> Self {
        Self {
            alpha: 255,
            tint: None,
            bounds: None,
            level: 0,
        }
    }
}

/// A drawable instance.
///
/// Every instance owns its own [`DrawableState`]; the decoded data lives in
/// a shared [`DrawableTemplate`]. Mutating one instance never affects
/// another, even when both come from the same cached template.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    template: Arc<DrawableTemplate>,
    state: DrawableState,
}

impl Drawable {
    /// Create a fresh instance from a template.
    pub fn new(template: Arc<DrawableTemplate>) -> Self {
        Self {
            template,
            state: DrawableState::default(),
        }
    }

    /// The shared template.
    pub fn template(&self) -> &Arc<DrawableTemplate> {
        &self.template
    }

    /// Whether two instances were created from the same template.
    pub fn shares_template_with(&self, other: &Drawable) -> bool {
        Arc::ptr_eq(&self.template, &other.template)
    }

    /// Current state.
    pub fn state(&self) -> &DrawableState {
        &self.state
    }

    /// Mutable state.
    pub fn state_mut(&mut self) -> &mut DrawableState {
        &mut self.state
    }

    /// Set the opacity.
    pub fn set_alpha(&mut self, alpha: u8) {
        self.state.alpha = alpha;
    }

    /// Set or clear the tint.
    pub fn set_tint(&mut self, tint: Option<Color>) {
        self.state.tint = tint;
    }

    /// Set the bounds.
    pub fn set_bounds(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        self.state.bounds = Some((left, top, right, bottom));
    }
}

/// Where a typeface was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypefaceOrigin {
    /// A native font resource in a package.
    Resource { package: String, id: ResourceId },
    /// A font file on disk.
    File(PathBuf),
    /// A font file in a package's asset bundle.
    Asset { package: String, file_name: String },
    /// Supplied directly by the application.
    Custom,
}

/// A loaded font face.
#[derive(Debug, Clone, PartialEq)]
pub struct Typeface {
    family: Option<String>,
    origin: TypefaceOrigin,
    data: Option<Arc<[u8]>>,
}

impl Typeface {
    /// Create a typeface.
    pub fn new(family: Option<String>, origin: TypefaceOrigin, data: Option<Arc<[u8]>>) -> Self {
        Self {
            family,
            origin,
            data,
        }
    }

    /// A typeface backed by a native font resource.
    pub fn from_resource(package: impl Into<String>, id: ResourceId, family: Option<String>) -> Self {
        Self::new(
            family,
            TypefaceOrigin::Resource {
                package: package.into(),
                id,
            },
            None,
        )
    }

    /// Family name, when the font declares one.
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Where the typeface came from.
    pub fn origin(&self) -> &TypefaceOrigin {
        &self.origin
    }

    /// Raw font data, when loaded from bytes.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

/// The namespace and handle holding a raw sound resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSource {
    /// Package that owns the resource.
    pub package: String,
    /// Handle within that package.
    pub id: ResourceId,
}

impl SoundSource {
    /// Render the resource URI, `<scheme>://<package>/<id>`.
    pub fn uri(&self, scheme: &str) -> String {
        format!("{scheme}://{}/{}", self.package, self.id)
    }
}

/// The decoded form a caller asks a store for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Color,
    ColorStateList,
    Drawable,
    Boolean,
    Dimension,
    Font,
}

impl ValueKind {
    /// The resource bucket this value is looked up in.
    pub fn resource_kind(self) -> ResourceKind {
        match self {
            ValueKind::String => ResourceKind::String,
            ValueKind::Color | ValueKind::ColorStateList => ResourceKind::Color,
            ValueKind::Drawable => ResourceKind::Drawable,
            ValueKind::Boolean => ResourceKind::Boolean,
            ValueKind::Dimension => ResourceKind::Dimension,
            ValueKind::Font => ResourceKind::Font,
        }
    }
}

/// A resolved resource value.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    String(String),
    Color(Color),
    ColorStateList(ColorStateList),
    Drawable(Drawable),
    Dimension(f32),
    Boolean(bool),
    Font(Typeface),
    /// A numeric resource handle.
    Id(ResourceId),
}

impl ResolvedValue {
    /// Take the string, if this is one.
    pub fn into_string(self) -> Option<String> {
        match self {
            ResolvedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The color, if this is one. A state list yields its default color.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            ResolvedValue::Color(c) => Some(*c),
            ResolvedValue::ColorStateList(list) => Some(list.default_color()),
            _ => None,
        }
    }

    /// Take the color state list. A plain color becomes a single-entry list.
    pub fn into_color_state_list(self) -> Option<ColorStateList> {
        match self {
            ResolvedValue::ColorStateList(list) => Some(list),
            ResolvedValue::Color(c) => Some(ColorStateList::single(c)),
            _ => None,
        }
    }

    /// Take the drawable, if this is one.
    pub fn into_drawable(self) -> Option<Drawable> {
        match self {
            ResolvedValue::Drawable(d) => Some(d),
            _ => None,
        }
    }

    /// The dimension, if this is one.
    pub fn as_dimension(&self) -> Option<f32> {
        match self {
            ResolvedValue::Dimension(d) => Some(*d),
            _ => None,
        }
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ResolvedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Take the typeface, if this is one.
    pub fn into_typeface(self) -> Option<Typeface> {
        match self {
            ResolvedValue::Font(t) => Some(t),
            _ => None,
        }
    }
}
