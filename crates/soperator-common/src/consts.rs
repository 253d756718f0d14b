//! Fixed names, keys, and paths shared between rendered objects and the
//! images that consume them
//!
//! Changing any of these breaks running clusters: the login and worker images
//! look for files, mounts, and env vars by exactly these names.

// =============================================================================
// Components
// =============================================================================

/// Kind of Slurm node a rendered object belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// slurmctld node
    Controller,
    /// slurmd node
    Worker,
    /// sshd node users log into
    Login,
}

impl ComponentType {
    /// Value used in the `app.kubernetes.io/component` label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Worker => "worker",
            Self::Login => "login",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Labels
// =============================================================================

/// Recommended label: application name
pub const LABEL_NAME: &str = "app.kubernetes.io/name";
/// Recommended label: instance (cluster name)
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";
/// Recommended label: component (login, worker, ...)
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";
/// Recommended label: higher-level application
pub const LABEL_PART_OF: &str = "app.kubernetes.io/part-of";
/// Recommended label: managing tool
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Value of [`LABEL_NAME`] on every rendered object
pub const LABEL_NAME_VALUE: &str = "slurmcluster";
/// Value of [`LABEL_PART_OF`] on every rendered object
pub const LABEL_PART_OF_VALUE: &str = "slurm-operator";
/// Value of [`LABEL_MANAGED_BY`] on every rendered object
pub const LABEL_MANAGED_BY_VALUE: &str = "soperator";

// =============================================================================
// ConfigMaps
// =============================================================================

/// ConfigMap name suffix for sshd configs
pub const CONFIG_MAP_NAME_SSH_CONFIGS: &str = "ssh-configs";
/// ConfigMap name suffix for security limits
pub const CONFIG_MAP_NAME_SECURITY_LIMITS: &str = "security-limits";

/// Data key holding the sshd config file
pub const CONFIG_MAP_KEY_SSHD_CONFIG: &str = "sshd_config";
/// Data key holding the security limits file
pub const CONFIG_MAP_KEY_SECURITY_LIMITS: &str = "limits.conf";

// =============================================================================
// Containers
// =============================================================================

/// Name of the slurmd container
pub const CONTAINER_NAME_SLURMD: &str = "slurmd";
/// Name of the init container waiting on the NVIDIA toolkit
pub const CONTAINER_NAME_TOOLKIT_VALIDATION: &str = "toolkit-validation";

/// slurmd daemon name, used for its spool directory
pub const SLURMD_NAME: &str = "slurmd";

/// Protocol of every declared container port
pub const PROTOCOL_TCP: &str = "TCP";

/// Capability added to the slurmd container
pub const CAPABILITY_SYS_ADMIN: &str = "SYS_ADMIN";
/// Seccomp profile type disabling syscall filtering
pub const SECCOMP_PROFILE_UNCONFINED: &str = "Unconfined";
/// Proc mount type exposing the full `/proc`
pub const PROC_MOUNT_UNMASKED: &str = "Unmasked";

/// Termination message policy reading the termination message file
pub const TERMINATION_MESSAGE_READ_FILE: &str = "File";
/// Default termination message file
pub const TERMINATION_MESSAGE_PATH: &str = "/dev/termination-log";

/// Env var holding the pod name
pub const ENV_POD_NAME: &str = "K8S_POD_NAME";
/// Env var holding the pod namespace
pub const ENV_POD_NAMESPACE: &str = "K8S_POD_NAMESPACE";
/// Downward API field path of the pod name
pub const FIELD_PATH_POD_NAME: &str = "metadata.name";
/// Downward API field path of the pod namespace
pub const FIELD_PATH_POD_NAMESPACE: &str = "metadata.namespace";

/// Command checking that slurmctld answers; readiness fails otherwise
pub const SLURMD_READINESS_COMMAND: &str = "/usr/bin/sinfo > /dev/null && exit 0 || exit 1";
/// Seconds between slurmd readiness checks
pub const SLURMD_READINESS_PERIOD_SECONDS: i32 = 30;

/// Seconds the toolkit-validation loop sleeps between checks
pub const TOOLKIT_VALIDATION_SLEEP_SECONDS: u32 = 5;

// =============================================================================
// Resources
// =============================================================================

/// Resource key: CPU
pub const RESOURCE_CPU: &str = "cpu";
/// Resource key: memory
pub const RESOURCE_MEMORY: &str = "memory";
/// Resource key: ephemeral storage
pub const RESOURCE_EPHEMERAL_STORAGE: &str = "ephemeral-storage";
/// Resource key: maximum GPUs slurmd may hand out
pub const RESOURCE_MAX_GPU: &str = "slurm.nebius.ai/max-gpu";

// =============================================================================
// Volumes
// =============================================================================

/// Volume holding slurm.conf and friends
pub const VOLUME_NAME_SLURM_CONFIGS: &str = "slurm-configs";
/// Mount path of [`VOLUME_NAME_SLURM_CONFIGS`]
pub const VOLUME_MOUNT_PATH_SLURM_CONFIGS: &str = "/mnt/slurm-configs";

/// Suffix of the per-role volume holding daemon spool directories
pub const VOLUME_NAME_SPOOL: &str = "spool";
/// Parent of per-daemon spool directories
pub const VOLUME_MOUNT_PATH_SPOOL: &str = "/var/spool";

/// Volume holding the shared jail root filesystem
pub const VOLUME_NAME_JAIL: &str = "jail";
/// Mount path of the jail; also the sshd chroot directory
pub const VOLUME_MOUNT_PATH_JAIL: &str = "/mnt/jail";

/// Volume holding the munge socket
pub const VOLUME_NAME_MUNGE_SOCKET: &str = "munge-socket";
/// Mount path of [`VOLUME_NAME_MUNGE_SOCKET`]
pub const VOLUME_MOUNT_PATH_MUNGE_SOCKET: &str = "/run/munge";

/// Volume holding the NVIDIA container toolkit
pub const VOLUME_NAME_NVIDIA: &str = "nvidia";
/// Mount path of [`VOLUME_NAME_NVIDIA`]
pub const VOLUME_MOUNT_PATH_NVIDIA: &str = "/run/nvidia";

/// Volume exposing the host `/boot`
pub const VOLUME_NAME_BOOT: &str = "boot";
/// Mount path of [`VOLUME_NAME_BOOT`]
pub const VOLUME_MOUNT_PATH_BOOT: &str = "/boot";

/// Volume holding the NCCL topology file
pub const VOLUME_NAME_NCCL_TOPOLOGY: &str = "nccl-topology";
/// Mount path of [`VOLUME_NAME_NCCL_TOPOLOGY`]
pub const VOLUME_MOUNT_PATH_NCCL_TOPOLOGY: &str = "/run/nccl-topology";

/// Memory-backed volume for `/dev/shm`
pub const VOLUME_NAME_SHARED_MEMORY: &str = "dev-shm";
/// Mount path of [`VOLUME_NAME_SHARED_MEMORY`]
pub const VOLUME_MOUNT_PATH_SHARED_MEMORY: &str = "/dev/shm";

/// Volume holding the sysctl config
pub const VOLUME_NAME_SYSCTL: &str = "sysctl";
/// Mount path of [`VOLUME_NAME_SYSCTL`]
pub const VOLUME_MOUNT_PATH_SYSCTL: &str = "/etc/sysctl.conf";

// =============================================================================
// Defaults
// =============================================================================

/// Default sshd port
pub const DEFAULT_SSHD_PORT: i32 = 22;
/// Default slurmd port
pub const DEFAULT_SLURMD_PORT: i32 = 6818;
