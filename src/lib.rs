//! soperator-render - render Slurm cluster node manifests from a cluster spec
//!
//! # Modules
//!
//! - [`config`] - Loading cluster values from YAML or JSON spec files
//! - [`output`] - Encoding rendered objects as YAML or JSON streams
//!
//! The renderers themselves live in the `soperator-render` crate; shared
//! types in `soperator-common`.

#![deny(missing_docs)]

pub mod config;
pub mod output;

pub use soperator_common::{Error, Result};

/// Default service name used in logs
pub const SERVICE_NAME: &str = "soperator-render";
