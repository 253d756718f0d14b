//! Labels and volume mounts shared by several node kinds

use std::collections::BTreeMap;

use soperator_common::consts::{
    ComponentType, LABEL_COMPONENT, LABEL_INSTANCE, LABEL_MANAGED_BY, LABEL_MANAGED_BY_VALUE,
    LABEL_NAME, LABEL_NAME_VALUE, LABEL_PART_OF, LABEL_PART_OF_VALUE, VOLUME_MOUNT_PATH_JAIL,
    VOLUME_MOUNT_PATH_MUNGE_SOCKET, VOLUME_MOUNT_PATH_SLURM_CONFIGS, VOLUME_MOUNT_PATH_SPOOL,
    VOLUME_NAME_JAIL, VOLUME_NAME_MUNGE_SOCKET, VOLUME_NAME_SLURM_CONFIGS,
};
use soperator_common::k8s::VolumeMount;
use soperator_common::naming;
use soperator_common::values::JailSubMount;

/// Standard label set for an object of `component` in cluster `cluster_name`
pub fn render_labels(component: ComponentType, cluster_name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (LABEL_NAME.to_string(), LABEL_NAME_VALUE.to_string()),
        (LABEL_INSTANCE.to_string(), cluster_name.to_string()),
        (LABEL_COMPONENT.to_string(), component.to_string()),
        (LABEL_PART_OF.to_string(), LABEL_PART_OF_VALUE.to_string()),
        (
            LABEL_MANAGED_BY.to_string(),
            LABEL_MANAGED_BY_VALUE.to_string(),
        ),
    ])
}

/// Slurm configs directory, read-only
pub fn render_volume_mount_slurm_configs() -> VolumeMount {
    VolumeMount::readonly(VOLUME_NAME_SLURM_CONFIGS, VOLUME_MOUNT_PATH_SLURM_CONFIGS)
}

/// Spool directory of daemon `daemon_name`, on the spool volume of `component`
pub fn render_volume_mount_spool(component: ComponentType, daemon_name: &str) -> VolumeMount {
    VolumeMount::new(
        naming::volume_name_spool(component),
        join_path(VOLUME_MOUNT_PATH_SPOOL, daemon_name),
    )
}

/// Jail root filesystem
pub fn render_volume_mount_jail() -> VolumeMount {
    VolumeMount::new(VOLUME_NAME_JAIL, VOLUME_MOUNT_PATH_JAIL)
}

/// munge socket directory
pub fn render_volume_mount_munge_socket() -> VolumeMount {
    VolumeMount::new(VOLUME_NAME_MUNGE_SOCKET, VOLUME_MOUNT_PATH_MUNGE_SOCKET)
}

/// One mount per jail submount, placed under the jail root, in input order.
///
/// Duplicate paths are passed through; the API server reports them on apply.
pub fn render_volume_mounts_for_jail_sub_mounts(sub_mounts: &[JailSubMount]) -> Vec<VolumeMount> {
    sub_mounts
        .iter()
        .map(|m| {
            VolumeMount::new(
                m.name.clone(),
                join_path(VOLUME_MOUNT_PATH_JAIL, &m.mount_path),
            )
        })
        .collect()
}

/// Join `rel` onto `base` with exactly one `/` between them and none trailing
pub(crate) fn join_path(base: &str, rel: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = rel.trim_matches('/');
    if rel.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{rel}")
    }
}
