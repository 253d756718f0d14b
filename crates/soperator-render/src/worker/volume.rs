//! Volume mounts only worker pods use

use soperator_common::consts::{
    VOLUME_MOUNT_PATH_BOOT, VOLUME_MOUNT_PATH_NCCL_TOPOLOGY, VOLUME_MOUNT_PATH_NVIDIA,
    VOLUME_MOUNT_PATH_SHARED_MEMORY, VOLUME_MOUNT_PATH_SYSCTL, VOLUME_NAME_BOOT,
    VOLUME_NAME_NCCL_TOPOLOGY, VOLUME_NAME_NVIDIA, VOLUME_NAME_SHARED_MEMORY, VOLUME_NAME_SYSCTL,
};
use soperator_common::k8s::VolumeMount;

pub(crate) fn render_volume_mount_nvidia() -> VolumeMount {
    VolumeMount::new(VOLUME_NAME_NVIDIA, VOLUME_MOUNT_PATH_NVIDIA)
}

pub(crate) fn render_volume_mount_boot() -> VolumeMount {
    VolumeMount::readonly(VOLUME_NAME_BOOT, VOLUME_MOUNT_PATH_BOOT)
}

pub(crate) fn render_volume_mount_nccl_topology() -> VolumeMount {
    VolumeMount::readonly(VOLUME_NAME_NCCL_TOPOLOGY, VOLUME_MOUNT_PATH_NCCL_TOPOLOGY)
}

pub(crate) fn render_volume_mount_shared_memory() -> VolumeMount {
    VolumeMount::new(VOLUME_NAME_SHARED_MEMORY, VOLUME_MOUNT_PATH_SHARED_MEMORY)
}

pub(crate) fn render_volume_mount_sysctl() -> VolumeMount {
    VolumeMount::readonly(VOLUME_NAME_SYSCTL, VOLUME_MOUNT_PATH_SYSCTL)
}
