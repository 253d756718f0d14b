//! Common types for soperator rendering: Kubernetes objects, the cluster
//! values model, naming helpers, and errors

#![deny(missing_docs)]

pub mod consts;
pub mod error;
pub mod k8s;
pub mod kube_utils;
pub mod naming;
pub mod telemetry;
pub mod values;
pub mod yaml;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
