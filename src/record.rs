//! The [`Record`] trait: a struct whose fields can live in metadata.

use crate::error::Result;
use crate::field::FieldSpec;

/// A struct whose tagged fields are stored in metadata dictionaries.
///
/// Usually derived with `#[derive(Record)]`. Implementing it by hand is the
/// explicit registration path: list the tagged fields in declaration order
/// and dispatch on field name in the accessors.
///
/// # Examples
///
/// ```
/// use objmeta::{Error, FieldSpec, FieldValue, ObjectMeta, Record, Result};
///
/// #[derive(Default)]
/// struct Replicas {
///     count: u32,
/// }
///
/// impl Record for Replicas {
///     fn fields() -> &'static [FieldSpec] {
///         const FIELDS: &[FieldSpec] = &[FieldSpec {
///             name: "count",
///             annotation: None,
///             label: Some("replicas"),
///             kind: <u32 as FieldValue>::KIND,
///         }];
///         FIELDS
///     }
///
///     fn decode_field(&mut self, field: &str, text: &str) -> Result<()> {
///         match field {
///             "count" => self.count = FieldValue::decode(text)?,
///             other => return Err(Error::UnknownField { field: other.to_string() }),
///         }
///         Ok(())
///     }
///
///     fn check_field(field: &str, text: &str) -> Result<()> {
///         match field {
///             "count" => <u32 as FieldValue>::decode(text).map(drop),
///             other => Err(Error::UnknownField { field: other.to_string() }),
///         }
///     }
///
///     fn encode_field(&self, field: &str) -> Result<String> {
///         match field {
///             "count" => self.count.encode(),
///             other => Err(Error::UnknownField { field: other.to_string() }),
///         }
///     }
/// }
///
/// let mut meta = ObjectMeta::new();
/// objmeta::encode(&Replicas { count: 3 }, &mut meta, "app").unwrap();
/// assert_eq!(meta.label("app/replicas"), Some("3"));
/// ```
pub trait Record {
    /// Tagged fields in declaration order.
    fn fields() -> &'static [FieldSpec]
    where
        Self: Sized;

    /// Parse `text` and store it in `field`.
    fn decode_field(&mut self, field: &str, text: &str) -> Result<()>;

    /// Check that `text` would decode into `field` without storing it.
    fn check_field(field: &str, text: &str) -> Result<()>
    where
        Self: Sized;

    /// Format the current value of `field`.
    fn encode_field(&self, field: &str) -> Result<String>;
}
