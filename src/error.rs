//! Error types for metadata encoding and decoding

use thiserror::Error;

use crate::kind::{ScalarKind, TagKind};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`decode`](crate::decode) and [`encode`](crate::encode).
///
/// The codec never logs these. The first error aborts the call and is handed
/// back as-is; nothing is aggregated or retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The record is not a struct with named fields.
    ///
    /// `#[derive(Record)]` reports this at compile time; hand-written
    /// [`Record`](crate::Record) impls return it from their accessors.
    #[error("passed data isn't a struct with named fields")]
    NotStructPointer,

    /// The key a field maps to is absent from its dictionary
    #[error("couldn't extract value from metadata: '{key}' is missing from {dictionary}")]
    ValueMissing {
        /// Full key, `{prefix}/{tag}`
        key: String,
        /// Dictionary that was searched
        dictionary: TagKind,
    },

    /// A string could not be parsed into the target type
    #[error("couldn't convert '{value}' to {kind}")]
    Conversion {
        /// Target scalar (or sequence element) type
        kind: ScalarKind,
        /// The offending text
        value: String,
    },

    /// A tagged field's type is outside the supported set
    #[error("field '{field}' has unsupported type '{type_name}'")]
    UnsupportedType {
        /// Field name
        field: String,
        /// Field type as written
        type_name: String,
    },

    /// The field table names a field the record's accessors don't handle
    #[error("record has no accessor for field '{field}'")]
    UnknownField {
        /// Field name from the table
        field: String,
    },
}

impl Error {
    pub(crate) fn conversion(kind: ScalarKind, value: &str) -> Self {
        Self::Conversion {
            kind,
            value: value.to_string(),
        }
    }
}

/// Errors loading a [`CodecConfig`](crate::CodecConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file '{path}': {error}")]
    Io {
        /// Path to the configuration file
        path: String,
        /// Error message
        error: String,
    },

    /// Malformed TOML
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A setting had a value outside its allowed set
    #[error("Invalid value '{value}' for {setting}")]
    InvalidValue {
        /// Setting name
        setting: &'static str,
        /// Rejected value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_missing_message() {
        let err = Error::ValueMissing {
            key: "prefix/id".to_string(),
            dictionary: TagKind::Annotation,
        };
        let msg = err.to_string();
        assert!(msg.contains("prefix/id"));
        assert!(msg.contains("annotations"));
    }

    #[test]
    fn test_conversion_message() {
        let err = Error::conversion(ScalarKind::I32, "abc");
        assert_eq!(err.to_string(), "couldn't convert 'abc' to i32");
    }

    #[test]
    fn test_unsupported_type_message() {
        let err = Error::UnsupportedType {
            field: "inner".to_string(),
            type_name: "Inner".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("inner"));
        assert!(msg.contains("Inner"));
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::InvalidValue {
            setting: "commit",
            value: "sometimes".to_string(),
        };
        assert!(err.to_string().contains("sometimes"));

        let err = ConfigError::Parse("bad".to_string());
        assert_eq!(err.to_string(), "Failed to parse config: bad");
    }
}
