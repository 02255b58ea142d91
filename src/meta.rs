//! Metadata containers.
//!
//! The codec only ever sees two string-to-string dictionaries. [`ObjectMeta`]
//! is a ready-made container with the same shape as a Kubernetes object's
//! `metadata` block; any other type can take part by implementing
//! [`MetadataSource`] (for decoding) and [`MetadataSink`] (for encoding).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kind::TagKind;

/// One metadata dictionary.
pub type Dictionary = BTreeMap<String, String>;

/// Read access to a container's labels and annotations.
pub trait MetadataSource {
    fn labels(&self) -> Option<&Dictionary>;

    fn annotations(&self) -> Option<&Dictionary>;

    fn dictionary(&self, kind: TagKind) -> Option<&Dictionary> {
        match kind {
            TagKind::Annotation => self.annotations(),
            TagKind::Label => self.labels(),
        }
    }
}

/// Write access to a container's labels and annotations.
///
/// The accessors create an empty dictionary when the container has none.
pub trait MetadataSink {
    fn labels_mut(&mut self) -> &mut Dictionary;

    fn annotations_mut(&mut self) -> &mut Dictionary;

    fn dictionary_mut(&mut self, kind: TagKind) -> &mut Dictionary {
        match kind {
            TagKind::Annotation => self.annotations_mut(),
            TagKind::Label => self.labels_mut(),
        }
    }
}

/// Object metadata with optional labels and annotations.
///
/// # Examples
///
/// ```
/// use objmeta::ObjectMeta;
///
/// let meta = ObjectMeta::default()
///     .with_label("prefix/age", "30")
///     .with_annotation("prefix/id", "1");
///
/// assert_eq!(meta.label("prefix/age"), Some("30"));
/// assert_eq!(meta.annotation("prefix/id"), Some("1"));
/// assert_eq!(meta.annotation("prefix/age"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Dictionary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Dictionary>,
}

impl ObjectMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label, creating the dictionary if needed.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels_mut().insert(key.into(), value.into());
        self
    }

    /// Add an annotation, creating the dictionary if needed.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations_mut().insert(key.into(), value.into());
        self
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.as_ref()?.get(key).map(String::as_str)
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.as_ref()?.get(key).map(String::as_str)
    }
}

impl MetadataSource for ObjectMeta {
    fn labels(&self) -> Option<&Dictionary> {
        self.labels.as_ref()
    }

    fn annotations(&self) -> Option<&Dictionary> {
        self.annotations.as_ref()
    }
}

impl MetadataSink for ObjectMeta {
    fn labels_mut(&mut self) -> &mut Dictionary {
        self.labels.get_or_insert_with(Dictionary::new)
    }

    fn annotations_mut(&mut self) -> &mut Dictionary {
        self.annotations.get_or_insert_with(Dictionary::new)
    }
}

impl<M: MetadataSource + ?Sized> MetadataSource for &M {
    fn labels(&self) -> Option<&Dictionary> {
        (**self).labels()
    }

    fn annotations(&self) -> Option<&Dictionary> {
        (**self).annotations()
    }
}

impl<M: MetadataSink + ?Sized> MetadataSink for &mut M {
    fn labels_mut(&mut self) -> &mut Dictionary {
        (**self).labels_mut()
    }

    fn annotations_mut(&mut self) -> &mut Dictionary {
        (**self).annotations_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn sink_initializes_missing_dictionaries() {
        let mut meta = ObjectMeta::new();
        assert!(meta.labels.is_none());

        meta.dictionary_mut(TagKind::Label)
            .insert("k".to_string(), "v".to_string());

        assert_eq!(meta.label("k"), Some("v"));
        assert!(meta.annotations.is_none());
    }

    #[test]
    fn source_selects_dictionary() {
        let meta = ObjectMeta::new()
            .with_label("a", "label")
            .with_annotation("a", "annotation");

        let labels = meta.dictionary(TagKind::Label).unwrap();
        let annotations = meta.dictionary(TagKind::Annotation).unwrap();
        assert_eq!(labels["a"], "label");
        assert_eq!(annotations["a"], "annotation");
    }

    #[test]
    fn serializes_like_object_metadata() {
        let meta = ObjectMeta::new().with_label("app", "web");
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value, json!({ "labels": { "app": "web" } }));

        let parsed: ObjectMeta = serde_json::from_value(json!({
            "annotations": { "prefix/id": "1" }
        }))
        .unwrap();
        assert_eq!(parsed.annotation("prefix/id"), Some("1"));
        assert!(parsed.labels.is_none());
    }

    #[test]
    fn references_forward() {
        fn annotate<M: MetadataSink>(mut sink: M) {
            sink.annotations_mut()
                .insert("k".to_string(), "v".to_string());
        }

        fn lookup<M: MetadataSource>(source: M) -> Option<String> {
            source.annotations()?.get("k").cloned()
        }

        let mut meta = ObjectMeta::new();
        annotate(&mut meta);
        assert_eq!(lookup(&meta), Some("v".to_string()));
    }
}
