//! Object names derived from the cluster name

use crate::consts::{
    ComponentType, CONFIG_MAP_NAME_SECURITY_LIMITS, CONFIG_MAP_NAME_SSH_CONFIGS, VOLUME_NAME_SPOOL,
};

fn build_prefixed_name(prefix: &str, suffix: &str) -> String {
    format!("{prefix}-{suffix}")
}

/// Name of the ConfigMap holding the login sshd config
pub fn config_map_ssh_configs_name(cluster_name: &str) -> String {
    build_prefixed_name(cluster_name, CONFIG_MAP_NAME_SSH_CONFIGS)
}

/// Name of the ConfigMap holding the login security limits
pub fn config_map_security_limits_name(cluster_name: &str) -> String {
    build_prefixed_name(cluster_name, CONFIG_MAP_NAME_SECURITY_LIMITS)
}

/// Name of the spool volume of `component` pods
pub fn volume_name_spool(component: ComponentType) -> String {
    build_prefixed_name(component.as_str(), VOLUME_NAME_SPOOL)
}
