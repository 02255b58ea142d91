//! Procedural macros for objmeta.
//!
//! Provides `#[derive(Record)]`, which turns a struct with named fields into
//! an `objmeta::Record`: an ordered table of tagged fields plus typed
//! accessors the codec drives to move values in and out of object metadata.
//!
//! ```ignore
//! use objmeta::Record;
//!
//! #[derive(Debug, Default, Record)]
//! struct Data {
//!     #[meta(annotation = "id")]
//!     id: i32,
//!     #[meta(label = "skills")]
//!     skills: Vec<String>,
//!     // No tag: ignored by the codec.
//!     cache: Option<String>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod record;

/// Derives `objmeta::Record` for a struct with named fields.
///
/// Field attributes:
/// - `#[meta(annotation = "name")]` stores the field under `{prefix}/name`
///   in the annotations dictionary.
/// - `#[meta(label = "name")]` stores it in the labels dictionary.
///
/// When both are present the annotation wins. Fields without either are
/// skipped. Fields whose type the codec cannot convert still compile and
/// fail at run time with `Error::UnsupportedType`. That includes types named
/// like a supported one but living elsewhere, such as `std::time::Duration`;
/// a bare `Duration` is taken to be `chrono::Duration`.
#[proc_macro_derive(Record, attributes(meta))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let expanded = record::expand_record(input).unwrap_or_else(syn::Error::into_compile_error);

    #[cfg(feature = "debug")]
    eprintln!("{expanded}");

    expanded.into()
}
