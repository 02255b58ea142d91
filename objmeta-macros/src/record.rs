//! Record derive implementation
//!
//! Expands `#[derive(Record)]` into an `objmeta::Record` impl. Only fields
//! carrying a `#[meta(...)]` tag end up in the generated field table; the
//! table keeps declaration order because the codec walks it front to back.
//!
//! Whether a field type is convertible is decided from its spelling, the
//! same way attribute macros usually sniff `Option<T>` or `Result<T, E>`. A
//! bare name must be one of the supported types; a qualified path must also
//! sit under the module that type lives in, so `std::time::Duration` or
//! `num_complex::Complex64` are reported as unsupported. Supported spellings
//! defer to `objmeta::FieldValue` for the actual conversion, so a type alias
//! that hides a supported type is reported as unsupported rather than
//! miscompiled.

use darling::FromField;
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericArgument, PathArguments, PathSegment, Type};

/// Message shared with `objmeta::Error::NotStructPointer`.
const NOT_STRUCT: &str = "passed data isn't a struct with named fields";

/// Scalar types with a `FieldValue` impl.
const SCALARS: &[&str] = &[
    "String",
    "bool",
    "i8",
    "i16",
    "i32",
    "isize",
    "i64",
    "u8",
    "u16",
    "u32",
    "usize",
    "u64",
    "f32",
    "f64",
    "Complex32",
    "Complex64",
    "TimeDelta",
    "Duration",
];

/// Element types accepted inside `Vec<_>`.
const ELEMENTS: &[&str] = &[
    "String",
    "bool",
    "i32",
    "u32",
    "i64",
    "u64",
    "f32",
    "f64",
    "TimeDelta",
    "Duration",
];

/// Per-field `#[meta(...)]` arguments
#[derive(Debug, FromField)]
#[darling(attributes(meta))]
struct FieldArgs {
    ident: Option<Ident>,
    ty: Type,

    /// Key name in the annotations dictionary
    #[darling(default)]
    annotation: Option<String>,

    /// Key name in the labels dictionary
    #[darling(default)]
    label: Option<String>,
}

/// A field that carries at least one tag
struct TaggedField {
    ident: Ident,
    ty: Type,
    annotation: Option<String>,
    label: Option<String>,
    supported: bool,
}

impl TaggedField {
    fn name(&self) -> String {
        self.ident.to_string()
    }

    fn type_name(&self) -> String {
        let ty = &self.ty;
        quote!(#ty).to_string().replace(' ', "")
    }
}

/// Expands the `#[derive(Record)]` macro
pub fn expand_record(input: DeriveInput) -> syn::Result<TokenStream> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => return Err(syn::Error::new_spanned(&input.ident, NOT_STRUCT)),
        },
        _ => return Err(syn::Error::new_spanned(&input.ident, NOT_STRUCT)),
    };

    let mut tagged = Vec::new();
    for field in named {
        let args = FieldArgs::from_field(field)
            .map_err(|e| syn::Error::new_spanned(field, e.to_string()))?;

        if args.annotation.is_none() && args.label.is_none() {
            continue;
        }

        let Some(ident) = args.ident else {
            return Err(syn::Error::new_spanned(field, NOT_STRUCT));
        };

        tagged.push(TaggedField {
            supported: is_supported(&args.ty),
            ident,
            ty: args.ty,
            annotation: args.annotation,
            label: args.label,
        });
    }

    let record = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let specs = tagged.iter().map(generate_spec);
    let decode_arms = tagged.iter().map(generate_decode_arm);
    let check_arms = tagged.iter().map(generate_check_arm);
    let encode_arms = tagged.iter().map(generate_encode_arm);

    Ok(quote! {
        impl #impl_generics ::objmeta::Record for #record #ty_generics #where_clause {
            fn fields() -> &'static [::objmeta::FieldSpec] {
                const FIELDS: &[::objmeta::FieldSpec] = &[#(#specs),*];
                FIELDS
            }

            #[allow(unused_variables)]
            fn decode_field(&mut self, field: &str, text: &str) -> ::objmeta::Result<()> {
                match field {
                    #(#decode_arms)*
                    other => Err(::objmeta::Error::UnknownField {
                        field: other.to_string(),
                    }),
                }
            }

            #[allow(unused_variables)]
            fn check_field(field: &str, text: &str) -> ::objmeta::Result<()> {
                match field {
                    #(#check_arms)*
                    other => Err(::objmeta::Error::UnknownField {
                        field: other.to_string(),
                    }),
                }
            }

            fn encode_field(&self, field: &str) -> ::objmeta::Result<String> {
                match field {
                    #(#encode_arms)*
                    other => Err(::objmeta::Error::UnknownField {
                        field: other.to_string(),
                    }),
                }
            }
        }
    })
}

/// Generate the static `FieldSpec` entry for one field
fn generate_spec(field: &TaggedField) -> TokenStream {
    let name = field.name();
    let annotation = optional_str(field.annotation.as_deref());
    let label = optional_str(field.label.as_deref());
    let ty = &field.ty;

    let kind = if field.supported {
        quote!(<#ty as ::objmeta::FieldValue>::KIND)
    } else {
        let type_name = field.type_name();
        quote!(::objmeta::FieldKind::Unsupported(#type_name))
    };

    quote! {
        ::objmeta::FieldSpec {
            name: #name,
            annotation: #annotation,
            label: #label,
            kind: #kind,
        }
    }
}

fn generate_decode_arm(field: &TaggedField) -> TokenStream {
    let name = field.name();
    if !field.supported {
        return unsupported_arm(field);
    }

    let ident = &field.ident;
    let ty = &field.ty;
    quote! {
        #name => {
            self.#ident = <#ty as ::objmeta::FieldValue>::decode(text)?;
            Ok(())
        },
    }
}

fn generate_check_arm(field: &TaggedField) -> TokenStream {
    let name = field.name();
    if !field.supported {
        return unsupported_arm(field);
    }

    let ty = &field.ty;
    quote! {
        #name => <#ty as ::objmeta::FieldValue>::decode(text).map(drop),
    }
}

fn generate_encode_arm(field: &TaggedField) -> TokenStream {
    let name = field.name();
    if !field.supported {
        return unsupported_arm(field);
    }

    let ident = &field.ident;
    quote! {
        #name => ::objmeta::FieldValue::encode(&self.#ident),
    }
}

fn unsupported_arm(field: &TaggedField) -> TokenStream {
    let name = field.name();
    let type_name = field.type_name();
    quote! {
        #name => Err(::objmeta::Error::UnsupportedType {
            field: #name.to_string(),
            type_name: #type_name.to_string(),
        }),
    }
}

fn optional_str(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    }
}

/// Check whether the codec can convert a field of this type
fn is_supported(ty: &Type) -> bool {
    let Some(segment) = known_segment(ty) else {
        return false;
    };

    if segment.ident == "Vec" {
        return single_type_argument(segment)
            .and_then(known_segment)
            .is_some_and(|inner| is_plain(inner, ELEMENTS));
    }

    is_plain(segment, SCALARS)
}

/// Modules a supported type may be qualified with
fn module_paths(name: &str) -> &'static [&'static str] {
    match name {
        "String" => &["std::string", "alloc::string"],
        "Vec" => &["std::vec", "alloc::vec"],
        "TimeDelta" | "Duration" => &["chrono"],
        "Complex32" | "Complex64" => &["objmeta", "objmeta::complex"],
        _ => &["std::primitive", "core::primitive"],
    }
}

/// Last path segment of `ty`, if any module path in front of it is where
/// that type name is expected to come from
fn known_segment(ty: &Type) -> Option<&PathSegment> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    let segments: Vec<&PathSegment> = path.path.segments.iter().collect();
    let (last, modules) = segments.split_last()?;
    if modules.is_empty() {
        return Some(*last);
    }

    if modules.iter().any(|segment| !segment.arguments.is_empty()) {
        return None;
    }

    let module = modules
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");

    module_paths(&last.ident.to_string())
        .iter()
        .any(|candidate| *candidate == module)
        .then_some(*last)
}

/// A bare name from `names`, without generic arguments
fn is_plain(segment: &PathSegment, names: &[&str]) -> bool {
    segment.arguments.is_empty() && names.iter().any(|name| segment.ident == name)
}

fn single_type_argument(segment: &PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });

    match (types.next(), types.next()) {
        (Some(ty), None) => Some(ty),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    #[test]
    fn test_is_supported_scalars() {
        let cases: Vec<Type> = vec![
            parse_quote!(String),
            parse_quote!(std::string::String),
            parse_quote!(bool),
            parse_quote!(isize),
            parse_quote!(u64),
            parse_quote!(f32),
            parse_quote!(objmeta::Complex64),
            parse_quote!(chrono::TimeDelta),
            parse_quote!(chrono::Duration),
            parse_quote!(::chrono::TimeDelta),
            parse_quote!(objmeta::complex::Complex32),
            parse_quote!(core::primitive::u8),
        ];
        for ty in cases {
            assert!(is_supported(&ty), "{}", quote!(#ty));
        }
    }

    #[test]
    fn test_is_supported_checks_module_path() {
        let cases: Vec<Type> = vec![
            parse_quote!(std::time::Duration),
            parse_quote!(core::time::Duration),
            parse_quote!(time::Duration),
            parse_quote!(num_complex::Complex64),
            parse_quote!(my::String),
            parse_quote!(chrono::String),
            parse_quote!(chrono::u64),
            parse_quote!(smallvec::Vec<String>),
            parse_quote!(Vec<std::time::Duration>),
        ];
        for ty in cases {
            assert!(!is_supported(&ty), "{}", quote!(#ty));
        }

        let ok: Type = parse_quote!(std::vec::Vec<chrono::TimeDelta>);
        assert!(is_supported(&ok));
    }

    #[test]
    fn test_is_supported_sequences() {
        let ok: Type = parse_quote!(Vec<String>);
        assert!(is_supported(&ok));

        let durations: Type = parse_quote!(Vec<chrono::TimeDelta>);
        assert!(is_supported(&durations));

        // i8 is a scalar but not a sequence element
        let narrow: Type = parse_quote!(Vec<i8>);
        assert!(!is_supported(&narrow));

        let nested: Type = parse_quote!(Vec<Vec<String>>);
        assert!(!is_supported(&nested));
    }

    #[test]
    fn test_is_supported_rejects_composites() {
        let cases: Vec<Type> = vec![
            parse_quote!(Inner),
            parse_quote!(Option<String>),
            parse_quote!(HashMap<String, String>),
            parse_quote!(&'static str),
            parse_quote!((i32, i32)),
            parse_quote!(Box<dyn Fn()>),
        ];
        for ty in cases {
            assert!(!is_supported(&ty), "{}", quote!(#ty));
        }
    }

    #[test]
    fn test_rejects_enum() {
        let input: DeriveInput = parse_quote! {
            enum Shape {
                Circle,
                Square,
            }
        };
        let err = expand_record(input).unwrap_err();
        assert_eq!(err.to_string(), NOT_STRUCT);
    }

    #[test]
    fn test_rejects_tuple_struct() {
        let input: DeriveInput = parse_quote! {
            struct Pair(#[meta(label = "a")] i32, i32);
        };
        let err = expand_record(input).unwrap_err();
        assert_eq!(err.to_string(), NOT_STRUCT);
    }

    #[test]
    fn test_expansion_skips_untagged_fields() {
        let input: DeriveInput = parse_quote! {
            struct Data {
                #[meta(annotation = "id")]
                id: i32,
                scratch: Inner,
                #[meta(label = "skills")]
                skills: Vec<String>,
            }
        };
        let expanded = expand_record(input).unwrap().to_string();

        assert!(expanded.contains("\"id\""));
        assert!(expanded.contains("\"skills\""));
        assert!(!expanded.contains("scratch"));
    }

    #[test]
    fn test_expansion_marks_unsupported_type() {
        let input: DeriveInput = parse_quote! {
            struct Data {
                #[meta(label = "inner")]
                inner: Inner,
            }
        };
        let expanded = expand_record(input).unwrap().to_string();

        assert!(expanded.contains("Unsupported"));
        assert!(expanded.contains("UnsupportedType"));
        assert!(!expanded.contains("FieldValue > :: decode"));
    }

    #[test]
    fn test_expansion_marks_foreign_duration_unsupported() {
        let input: DeriveInput = parse_quote! {
            struct Data {
                #[meta(annotation = "grace")]
                grace: std::time::Duration,
            }
        };
        let expanded = expand_record(input).unwrap().to_string();

        assert!(expanded.contains("\"std::time::Duration\""));
        assert!(!expanded.contains("FieldValue"));
    }

    #[test]
    fn test_type_name_is_compact() {
        let field = TaggedField {
            ident: parse_quote!(inner),
            ty: parse_quote!(Vec<Inner>),
            annotation: None,
            label: Some("inner".to_string()),
            supported: false,
        };
        assert_eq!(field.type_name(), "Vec<Inner>");
    }
}
