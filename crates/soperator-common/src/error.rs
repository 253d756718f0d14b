//! Error types for soperator rendering
//!
//! Errors are structured with fields so a failed render can be traced back to
//! the cluster, field, or input value that caused it.

use thiserror::Error;

/// Main error type for rendering operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed resource quantity
    #[error("invalid quantity {value:?}: {message}")]
    Quantity {
        /// The rejected input
        value: String,
        /// Description of what's malformed
        message: String,
    },

    /// Validation error for cluster values
    #[error("validation error for {cluster}: {message}")]
    Validation {
        /// Name of the cluster with invalid values
        cluster: String,
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g., "nodeWorker.maxGpu")
        field: Option<String>,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The resource kind being serialized (if known)
        kind: Option<String>,
    },

    /// Cluster spec file could not be loaded
    #[error("config error [{path}]: {message}")]
    Config {
        /// Path of the spec file
        path: String,
        /// Description of what failed
        message: String,
    },
}

impl Error {
    /// Create a quantity error for the rejected input
    pub fn quantity(value: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Quantity {
            value: value.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error with cluster context and field path
    pub fn validation_for_field(
        cluster: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Validation {
            cluster: cluster.into(),
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: None,
        }
    }

    /// Create a serialization error for a specific resource kind
    pub fn serialization_for(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Create a config error for the given spec file
    pub fn config(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: msg.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_error_names_value() {
        let err = Error::quantity("12xyz", "unknown suffix");
        assert_eq!(
            err.to_string(),
            "invalid quantity \"12xyz\": unknown suffix"
        );
    }

    #[test]
    fn validation_for_field_keeps_field_path() {
        match Error::validation_for_field("c1", "namespace", "must not be empty") {
            Error::Validation { cluster, field, message } => {
                assert_eq!(cluster, "c1");
                assert_eq!(field.as_deref(), Some("namespace"));
                assert_eq!(message, "must not be empty");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn serialization_for_records_kind() {
        match Error::serialization_for("ConfigMap", "boom") {
            Error::Serialization { kind, message } => {
                assert_eq!(kind.as_deref(), Some("ConfigMap"));
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn config_error_names_path() {
        let err = Error::config("/tmp/cluster.yaml", "not found");
        assert_eq!(err.to_string(), "config error [/tmp/cluster.yaml]: not found");
    }

    #[test]
    fn serde_json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Serialization { kind: None, .. }));
    }
}
