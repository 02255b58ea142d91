//! Field descriptors and typed field conversion.
//!
//! A record exposes its tagged fields as a static table of [`FieldSpec`]s.
//! [`FieldSpec::descriptor`] resolves which dictionary and key a field maps
//! to; [`FieldValue`] converts the field's Rust value to and from text.

use chrono::TimeDelta;

use crate::complex::{Complex32, Complex64};
use crate::error::{Error, Result};
use crate::kind::{FieldKind, TagKind};
use crate::scalar::Scalar;
use crate::sequence::{self, Element, DEFAULT_SEPARATOR};

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Rust field name
    pub name: &'static str,
    /// `#[meta(annotation = "...")]` tag
    pub annotation: Option<&'static str>,
    /// `#[meta(label = "...")]` tag
    pub label: Option<&'static str>,
    /// Conversion the field's type maps to
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Resolve the field's tag.
    ///
    /// The annotation tag is checked first; the label tag is only consulted
    /// when there is no annotation. `None` means the field is not stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use objmeta::{FieldKind, FieldSpec, ScalarKind, TagKind};
    ///
    /// let spec = FieldSpec {
    ///     name: "id",
    ///     annotation: Some("x"),
    ///     label: Some("y"),
    ///     kind: FieldKind::Scalar(ScalarKind::I32),
    /// };
    /// let descriptor = spec.descriptor().unwrap();
    /// assert_eq!(descriptor.tag_kind, TagKind::Annotation);
    /// assert_eq!(descriptor.key("prefix"), "prefix/x");
    /// ```
    pub fn descriptor(&self) -> Option<FieldDescriptor> {
        let (tag_kind, tag_name) = match (self.annotation, self.label) {
            (Some(name), _) => (TagKind::Annotation, name),
            (None, Some(name)) => (TagKind::Label, name),
            (None, None) => return None,
        };

        Some(FieldDescriptor {
            field: self.name,
            kind: self.kind,
            tag_kind,
            tag_name,
        })
    }
}

/// Resolved view of a tagged field. Built fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust field name
    pub field: &'static str,
    /// Conversion the field's type maps to
    pub kind: FieldKind,
    /// Dictionary the field is stored in
    pub tag_kind: TagKind,
    /// Key name inside the dictionary, before the prefix is joined
    pub tag_name: &'static str,
}

impl FieldDescriptor {
    /// Dictionary key, `{prefix}/{tag_name}`. Nothing is escaped.
    pub fn key(&self, prefix: &str) -> String {
        format!("{prefix}/{}", self.tag_name)
    }
}

/// A Rust type that can be stored in a metadata field.
///
/// Implemented for every supported scalar and for `Vec<T>` of every
/// supported element type. `#[derive(Record)]` calls these for each tagged
/// field.
pub trait FieldValue: Sized {
    const KIND: FieldKind;

    fn decode(text: &str) -> Result<Self>;

    fn encode(&self) -> Result<String>;
}

macro_rules! impl_scalar_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Scalar(<$ty as Scalar>::KIND);

                fn decode(text: &str) -> Result<Self> {
                    Self::parse_scalar(text)
                }

                fn encode(&self) -> Result<String> {
                    self.to_scalar().encode()
                }
            }
        )*
    };
}

impl_scalar_field! {
    String, bool,
    i8, i16, i32, isize, i64,
    u8, u16, u32, usize, u64,
    f32, f64,
    Complex32, Complex64,
    TimeDelta,
}

impl<T: Element> FieldValue for Vec<T> {
    const KIND: FieldKind = FieldKind::Sequence(T::ELEMENT);

    fn decode(text: &str) -> Result<Self> {
        sequence::decode(text, DEFAULT_SEPARATOR, T::ELEMENT)?
            .into_iter()
            .map(|value| {
                let kind = value.kind();
                T::from_scalar(value).ok_or_else(|| Error::conversion(kind, text))
            })
            .collect()
    }

    fn encode(&self) -> Result<String> {
        let values: Vec<_> = self.iter().map(Scalar::to_scalar).collect();
        sequence::encode(&values)
    }
}
