//! Cluster values consumed by the renderers
//!
//! The values are the already-validated, defaulted view of a Slurm cluster.
//! Renderers read them and never write back.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SLURMD_PORT, DEFAULT_SSHD_PORT};
use crate::k8s::Quantity;

/// Desired state of one Slurm cluster
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlurmCluster {
    /// Cluster name, used as prefix for every rendered object
    pub name: String,
    /// Namespace all objects are rendered into
    pub namespace: String,
    /// Login node settings
    #[serde(default)]
    pub node_login: NodeLogin,
    /// Worker node settings
    #[serde(default)]
    pub node_worker: NodeWorker,
}

/// Login node settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeLogin {
    /// sshd container
    pub container_sshd: ContainerValues,
}

impl Default for NodeLogin {
    fn default() -> Self {
        Self {
            container_sshd: ContainerValues::named("sshd", DEFAULT_SSHD_PORT),
        }
    }
}

/// Worker node settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeWorker {
    /// slurmd container
    pub container_slurmd: ContainerValues,
    /// Init container waiting for the NVIDIA toolkit
    pub container_toolkit_validation: ContainerValues,
    /// GPUs slurmd may allocate on one node
    pub max_gpu: i32,
    /// Extra volumes grafted into the jail
    pub jail_sub_mounts: Vec<JailSubMount>,
}

impl Default for NodeWorker {
    fn default() -> Self {
        Self {
            container_slurmd: ContainerValues::named("slurmd", DEFAULT_SLURMD_PORT),
            container_toolkit_validation: ContainerValues::named("toolkit-validation", 0),
            max_gpu: 0,
            jail_sub_mounts: Vec::new(),
        }
    }
}

/// Per-container settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerValues {
    /// Port name; an empty name leaves the port unnamed
    #[serde(default)]
    pub name: String,
    /// Image reference
    #[serde(default)]
    pub image: String,
    /// Listening port
    #[serde(default)]
    pub port: i32,
    /// Resource limits
    #[serde(default)]
    pub resources: ContainerResources,
}

impl ContainerValues {
    fn named(name: &str, port: i32) -> Self {
        Self {
            name: name.to_string(),
            image: String::new(),
            port,
            resources: ContainerResources::default(),
        }
    }
}

/// Resource quantities copied verbatim into container limits
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerResources {
    /// CPU
    #[serde(default)]
    pub cpu: Quantity,
    /// Memory
    #[serde(default)]
    pub memory: Quantity,
    /// Ephemeral storage
    #[serde(default)]
    pub ephemeral_storage: Quantity,
}

/// Volume mounted inside the jail
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JailSubMount {
    /// Volume name
    pub name: String,
    /// Path relative to the jail root
    pub mount_path: String,
}
