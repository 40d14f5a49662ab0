//! Resource identity and resolved values.
//!
//! - [`Res`]: a typed, named handle to a resource (kind + symbolic name)
//! - [`ResourceId`]: a host-assigned numeric handle within one namespace
//! - [`ResolvedValue`]: the decoded value a lookup produces
//!
//! Resource names are symbolic and unique within a kind and namespace, so
//! the same `Res` can be resolved against the theme package and the
//! consumer's own package.

mod id;
mod value;

pub use id::{Res, ResourceEntry, ResourceId, ResourceKind};
pub use value::{
    Color, ColorState, ColorStateList, Drawable, DrawableState, DrawableTemplate, ResolvedValue,
    SoundSource, Typeface, TypefaceOrigin, ValueKind,
};
