//! # objmeta
//!
//! Typed records stored as plain strings in object metadata.
//!
//! A record is a struct whose fields are tagged with a key name and a
//! dictionary: `annotation` or `label`. Decoding reads each tagged field from
//! `{prefix}/{tag}` in the matching dictionary and parses it into the field's
//! type; encoding formats each field back into that key.
//!
//! Supported field types are `String`, `bool`, every signed and unsigned
//! integer width, `f32`, `f64`, [`Complex32`], [`Complex64`],
//! [`chrono::TimeDelta`] (written like `1h30m`), and `Vec<T>` of `String`,
//! `bool`, `i32`, `u32`, `i64`, `u64`, `f32`, `f64` or `TimeDelta` (written
//! comma-separated).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "macros")]
//! # fn main() -> objmeta::Result<()> {
//! use objmeta::{ObjectMeta, Record};
//!
//! #[derive(Debug, Default, Record)]
//! struct Data {
//!     #[meta(annotation = "id")]
//!     id: i32,
//!     #[meta(label = "age")]
//!     age: u32,
//!     #[meta(label = "skills")]
//!     skills: Vec<String>,
//! }
//!
//! let meta = ObjectMeta::new()
//!     .with_annotation("prefix/id", "1")
//!     .with_label("prefix/age", "30")
//!     .with_label("prefix/skills", "cooking,swimming");
//!
//! let mut data = Data::default();
//! objmeta::decode(&meta, &mut data, "prefix")?;
//! assert_eq!(data.age, 30);
//! assert_eq!(data.skills, ["cooking", "swimming"]);
//!
//! let mut out = ObjectMeta::new();
//! objmeta::encode(&data, &mut out, "prefix")?;
//! assert_eq!(out, meta);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "macros"))]
//! # fn main() {}
//! ```

// Lets `#[derive(Record)]` output, which names `::objmeta`, expand inside
// this crate's own tests.
extern crate self as objmeta;

pub mod codec;
pub mod complex;
pub mod config;
pub mod duration;
pub mod error;
pub mod field;
pub mod kind;
pub mod meta;
pub mod record;
pub mod scalar;
pub mod sequence;

pub use codec::{decode, encode, Codec};
pub use complex::{Complex, Complex32, Complex64};
pub use config::{CodecConfig, Commit};
pub use error::{ConfigError, Error, Result};
pub use field::{FieldDescriptor, FieldSpec, FieldValue};
pub use kind::{ElementKind, FieldKind, ScalarKind, TagKind};
pub use meta::{Dictionary, MetadataSink, MetadataSource, ObjectMeta};
pub use record::Record;
pub use scalar::{Scalar, ScalarValue};
pub use sequence::Element;

/// Derives [`Record`] for a struct with named fields.
#[cfg(feature = "macros")]
pub use objmeta_macros::Record;
