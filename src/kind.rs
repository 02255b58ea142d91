//! Type kinds understood by the codec.
//!
//! Every convertible field type maps to exactly one [`FieldKind`]. Scalar
//! fields carry a [`ScalarKind`], sequence fields carry the [`ElementKind`]
//! of their items. Adding a kind means extending these enums; every
//! conversion is an exhaustive `match` over them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which metadata dictionary a field is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// The annotations dictionary. Takes precedence over labels.
    Annotation,
    /// The labels dictionary.
    Label,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Annotation => write!(f, "annotations"),
            Self::Label => write!(f, "labels"),
        }
    }
}

/// Single-value field types.
///
/// `Int` and `Uint` are the pointer-sized integers (`isize`/`usize`); they
/// are parsed with 32-bit bounds so stored values stay portable. The complex
/// kinds are named after the width of each component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `String`, stored verbatim
    Text,
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `isize`, parsed with 32-bit bounds
    Int,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `usize`, parsed with 32-bit bounds
    Uint,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `Complex<f32>`
    Complex32,
    /// `Complex<f64>`
    Complex64,
    /// Signed nanosecond duration written as `1h30m`, `500ms`, ...
    Duration,
}

impl ScalarKind {
    /// Rust spelling of the kind, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "String",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::Int => "isize",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::Uint => "usize",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Complex32 => "Complex32",
            Self::Complex64 => "Complex64",
            Self::Duration => "TimeDelta",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Item types allowed inside a sequence field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `Vec<String>`
    Text,
    /// `Vec<bool>`
    Bool,
    /// `Vec<i32>`
    I32,
    /// `Vec<u32>`
    U32,
    /// `Vec<i64>`
    I64,
    /// `Vec<u64>`
    U64,
    /// `Vec<f32>`
    F32,
    /// `Vec<f64>`
    F64,
    /// `Vec<TimeDelta>`, items in duration syntax
    Duration,
}

impl ElementKind {
    /// The scalar conversion applied to each item.
    pub const fn scalar(self) -> ScalarKind {
        match self {
            Self::Text => ScalarKind::Text,
            Self::Bool => ScalarKind::Bool,
            Self::I32 => ScalarKind::I32,
            Self::U32 => ScalarKind::U32,
            Self::I64 => ScalarKind::I64,
            Self::U64 => ScalarKind::U64,
            Self::F32 => ScalarKind::F32,
            Self::F64 => ScalarKind::F64,
            Self::Duration => ScalarKind::Duration,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec<{}>", self.scalar())
    }
}

/// Shape of a record field as seen by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A single value
    Scalar(ScalarKind),
    /// A comma-separated list
    Sequence(ElementKind),
    /// A type the codec cannot convert. Holds the type as written.
    Unsupported(&'static str),
}

impl FieldKind {
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => kind.fmt(f),
            Self::Sequence(kind) => kind.fmt(f),
            Self::Unsupported(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_kinds_map_to_scalars() {
        assert_eq!(ElementKind::Text.scalar(), ScalarKind::Text);
        assert_eq!(ElementKind::U32.scalar(), ScalarKind::U32);
        assert_eq!(ElementKind::Duration.scalar(), ScalarKind::Duration);
    }

    #[test]
    fn display_names() {
        assert_eq!(TagKind::Annotation.to_string(), "annotations");
        assert_eq!(ScalarKind::Int.to_string(), "isize");
        assert_eq!(ElementKind::F64.to_string(), "Vec<f64>");
        assert_eq!(FieldKind::Unsupported("Inner").to_string(), "Inner");
    }

    #[test]
    fn unsupported_is_not_supported() {
        assert!(FieldKind::Scalar(ScalarKind::Bool).is_supported());
        assert!(FieldKind::Sequence(ElementKind::Bool).is_supported());
        assert!(!FieldKind::Unsupported("Inner").is_supported());
    }
}
