//! Moving records in and out of metadata.
//!
//! [`decode`] and [`encode`] walk a record's field table in declaration
//! order. Each tagged field maps to the key `{prefix}/{tag}` in either the
//! annotations or the labels dictionary. The first failure stops the walk
//! and is returned unchanged.

use tracing::{debug, trace};

use crate::config::{CodecConfig, Commit};
use crate::error::{Error, Result};
use crate::field::FieldDescriptor;
use crate::meta::{MetadataSink, MetadataSource};
use crate::record::Record;

/// Populate `record` from the dictionaries in `meta`.
///
/// Fields are written as they are decoded. If a key is missing or a value
/// does not parse, fields earlier in declaration order keep their new values
/// and the rest are left alone. Use a [`Codec`] with [`Commit::Atomic`] to
/// leave the record untouched on failure.
///
/// # Errors
///
/// - [`Error::ValueMissing`] when a tagged field's key is absent, including
///   when the whole dictionary is absent.
/// - [`Error::Conversion`] when a value does not parse as the field type.
/// - [`Error::UnsupportedType`] when a tagged field's type is not
///   convertible and its key is present.
pub fn decode<M, R>(meta: &M, record: &mut R, prefix: &str) -> Result<()>
where
    M: MetadataSource + ?Sized,
    R: Record,
{
    let mut decoded = 0usize;
    for descriptor in R::fields().iter().filter_map(|spec| spec.descriptor()) {
        let (key, text) = lookup(meta, &descriptor, prefix)?;
        trace!(field = descriptor.field, key = %key, "Decoding field");
        record.decode_field(descriptor.field, text)?;
        decoded += 1;
    }

    debug!(prefix = %prefix, fields = decoded, "Decoded record from metadata");
    Ok(())
}

/// Write every tagged field of `record` into `meta`.
///
/// Both dictionaries are created if absent, even when the record has no
/// field for one of them. Existing keys are overwritten; keys the record
/// doesn't own are kept. On error, fields earlier in declaration order have
/// already been written.
///
/// # Errors
///
/// - [`Error::UnsupportedType`] when a tagged field's type is not
///   convertible.
/// - [`Error::Conversion`] when a duration doesn't fit in 64-bit
///   nanoseconds.
pub fn encode<R, M>(record: &R, meta: &mut M, prefix: &str) -> Result<()>
where
    R: Record,
    M: MetadataSink + ?Sized,
{
    meta.labels_mut();
    meta.annotations_mut();

    let mut encoded = 0usize;
    for descriptor in R::fields().iter().filter_map(|spec| spec.descriptor()) {
        let key = descriptor.key(prefix);
        let text = record.encode_field(descriptor.field)?;
        trace!(field = descriptor.field, key = %key, "Encoding field");
        meta.dictionary_mut(descriptor.tag_kind).insert(key, text);
        encoded += 1;
    }

    debug!(prefix = %prefix, fields = encoded, "Encoded record into metadata");
    Ok(())
}

fn lookup<'m, M>(
    meta: &'m M,
    descriptor: &FieldDescriptor,
    prefix: &str,
) -> Result<(String, &'m str)>
where
    M: MetadataSource + ?Sized,
{
    let key = descriptor.key(prefix);
    let text = meta
        .dictionary(descriptor.tag_kind)
        .and_then(|dictionary| dictionary.get(&key));

    match text {
        Some(text) => Ok((key, text.as_str())),
        None => Err(Error::ValueMissing {
            key,
            dictionary: descriptor.tag_kind,
        }),
    }
}

/// A prefix and commit strategy bound together.
///
/// # Examples
///
/// ```
/// use objmeta::{Codec, Commit};
///
/// let codec = Codec::new("example.com").with_commit(Commit::Atomic);
/// assert_eq!(codec.prefix(), "example.com");
/// assert_eq!(codec.commit(), Commit::Atomic);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codec {
    prefix: String,
    commit: Commit,
}

impl Codec {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            commit: Commit::default(),
        }
    }

    pub fn from_config(config: CodecConfig) -> Self {
        Self {
            prefix: config.prefix,
            commit: config.commit,
        }
    }

    pub fn with_commit(mut self, commit: Commit) -> Self {
        self.commit = commit;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn commit(&self) -> Commit {
        self.commit
    }

    /// Populate `record` from `meta` using this codec's commit strategy.
    ///
    /// With [`Commit::Atomic`] every key is looked up and every value parsed
    /// before the first field is written, so a failing call leaves `record`
    /// exactly as it was. Errors are the same as for [`decode`].
    pub fn decode<M, R>(&self, meta: &M, record: &mut R) -> Result<()>
    where
        M: MetadataSource + ?Sized,
        R: Record,
    {
        match self.commit {
            Commit::InPlace => decode(meta, record, &self.prefix),
            Commit::Atomic => self.decode_atomic(meta, record),
        }
    }

    /// Write `record` into `meta`. See [`encode`].
    pub fn encode<R, M>(&self, record: &R, meta: &mut M) -> Result<()>
    where
        R: Record,
        M: MetadataSink + ?Sized,
    {
        encode(record, meta, &self.prefix)
    }

    fn decode_atomic<M, R>(&self, meta: &M, record: &mut R) -> Result<()>
    where
        M: MetadataSource + ?Sized,
        R: Record,
    {
        let mut staged = Vec::new();
        for descriptor in R::fields().iter().filter_map(|spec| spec.descriptor()) {
            let (key, text) = lookup(meta, &descriptor, &self.prefix)?;
            R::check_field(descriptor.field, text)?;
            trace!(field = descriptor.field, key = %key, "Staged field");
            staged.push((descriptor.field, text));
        }

        for (field, text) in &staged {
            record.decode_field(field, text)?;
        }

        debug!(
            prefix = %self.prefix,
            fields = staged.len(),
            "Decoded record from metadata"
        );
        Ok(())
    }
}

impl From<CodecConfig> for Codec {
    fn from(config: CodecConfig) -> Self {
        Self::from_config(config)
    }
}
