//! All objects rendered for one cluster

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use soperator_common::k8s::{ConfigMap, Container};
use soperator_common::values::SlurmCluster;
use soperator_common::Result;

use crate::{login, worker};

/// Objects rendered for one cluster, grouped by kind.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCluster {
    /// Login ConfigMaps: sshd config, then security limits
    pub config_maps: Vec<ConfigMap>,
    /// Worker init containers
    pub worker_init_containers: Vec<Container>,
    /// Worker containers
    pub worker_containers: Vec<Container>,
}

impl RenderedCluster {
    /// Total number of rendered objects
    pub fn len(&self) -> usize {
        self.config_maps.len() + self.worker_init_containers.len() + self.worker_containers.len()
    }

    /// Whether nothing was rendered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Only the login objects
    pub fn login_only(self) -> Self {
        Self {
            worker_init_containers: Vec::new(),
            worker_containers: Vec::new(),
            ..self
        }
    }

    /// Only the worker objects
    pub fn worker_only(self) -> Self {
        Self {
            config_maps: Vec::new(),
            ..self
        }
    }

    /// Every object as JSON, ConfigMaps first, then init containers, then containers
    pub fn to_values(&self) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(self.len());
        for cm in &self.config_maps {
            values.push(serde_json::to_value(cm)?);
        }
        for c in self
            .worker_init_containers
            .iter()
            .chain(&self.worker_containers)
        {
            values.push(serde_json::to_value(c)?);
        }
        Ok(values)
    }
}

/// Render every object of `cluster`.
///
/// Each renderer runs once, independently of the others.
pub fn render_cluster(cluster: &SlurmCluster) -> Result<RenderedCluster> {
    let worker = &cluster.node_worker;

    let rendered = RenderedCluster {
        config_maps: vec![
            login::render_config_map_ssh_configs(cluster)?,
            login::render_config_map_security_limits(cluster)?,
        ],
        worker_init_containers: vec![worker::render_container_toolkit_validation(
            &worker.container_toolkit_validation,
        )?],
        worker_containers: vec![worker::render_container_slurmd(
            &worker.container_slurmd,
            worker.max_gpu,
            &worker.jail_sub_mounts,
        )?],
    };

    debug!(
        cluster = %cluster.name,
        namespace = %cluster.namespace,
        config_maps = rendered.config_maps.len(),
        containers = rendered.worker_init_containers.len() + rendered.worker_containers.len(),
        "rendered cluster"
    );

    Ok(rendered)
}
