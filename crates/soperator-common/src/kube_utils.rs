//! Shared Kubernetes object metadata

use std::collections::BTreeMap;

// =============================================================================
// ObjectMeta - Canonical Kubernetes metadata for all rendered resources
// =============================================================================

/// Standard Kubernetes ObjectMeta for rendered resources.
///
/// Labels are supplied by the caller; construction adds none.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name
    pub name: String,
    /// Resource namespace
    pub namespace: String,
    /// Labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Create new metadata without labels or annotations
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Merge a label set, later keys overwriting earlier ones
    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels.extend(labels);
        self
    }

    /// Add an annotation
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_no_labels() {
        let meta = ObjectMeta::new("c1-ssh-configs", "ns1");
        assert_eq!(meta.name, "c1-ssh-configs");
        assert_eq!(meta.namespace, "ns1");
        assert!(meta.labels.is_empty());
        assert!(meta.annotations.is_empty());
    }

    #[test]
    fn with_labels_merges() {
        let meta = ObjectMeta::new("a", "b")
            .with_label("x", "1")
            .with_labels(BTreeMap::from([
                ("x".to_string(), "2".to_string()),
                ("y".to_string(), "3".to_string()),
            ]))
            .with_annotation("note", "kept");

        assert_eq!(meta.labels.get("x").map(String::as_str), Some("2"));
        assert_eq!(meta.labels.get("y").map(String::as_str), Some("3"));
        assert_eq!(meta.annotations.get("note").map(String::as_str), Some("kept"));
    }

    #[test]
    fn empty_maps_are_not_serialized() {
        let json = serde_json::to_value(ObjectMeta::new("a", "b")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "a", "namespace": "b"}));
    }
}
