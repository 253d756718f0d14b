//! Renderers for Slurm cluster node manifests
//!
//! Pure functions from [`SlurmCluster`](soperator_common::values::SlurmCluster)
//! values to Kubernetes objects: login ConfigMaps (sshd config, security
//! limits) and worker containers (toolkit validation, slurmd). Renderers do no
//! I/O and keep no state, so they can be called from anywhere, concurrently.
//!
//! # Usage
//!
//! ```rust,ignore
//! let ssh = soperator_render::login::render_config_map_ssh_configs(&cluster)?;
//! let all = soperator_render::render_cluster(&cluster)?;
//! ```

#![deny(missing_docs)]

mod bundle;
pub mod common;
pub mod config_file;
pub mod login;
pub mod worker;

pub use bundle::{render_cluster, RenderedCluster};
pub use config_file::RawConfig;
