//! Cluster spec file loading

use std::path::Path;

use soperator_common::values::SlurmCluster;
use soperator_common::{yaml, Error, Result};
use tracing::debug;

/// Parse cluster values from YAML or JSON text.
///
/// `source` names the input in errors (usually the file path). The cluster
/// name and namespace prefix and scope every rendered object, so both must be
/// non-empty.
pub fn parse_cluster(source: &str, content: &str) -> Result<SlurmCluster> {
    if content.trim().is_empty() {
        return Err(Error::config(source, "spec is empty"));
    }
    let cluster: SlurmCluster =
        yaml::from_yaml(content).map_err(|e| Error::config(source, e.to_string()))?;

    if cluster.name.is_empty() {
        return Err(Error::validation_for_field(source, "name", "must not be empty"));
    }
    if cluster.namespace.is_empty() {
        return Err(Error::validation_for_field(
            &cluster.name,
            "namespace",
            "must not be empty",
        ));
    }
    Ok(cluster)
}

/// Read and parse the cluster spec file at `path`
pub fn load_cluster(path: &Path) -> Result<SlurmCluster> {
    let source = path.display().to_string();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(source.clone(), format!("failed to read: {e}")))?;

    let cluster = parse_cluster(&source, &content)?;
    debug!(path = %source, cluster = %cluster.name, "loaded cluster spec");
    Ok(cluster)
}
