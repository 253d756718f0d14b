//! ConfigMaps mounted into login pods

use soperator_common::consts::{
    ComponentType, CONFIG_MAP_KEY_SECURITY_LIMITS, CONFIG_MAP_KEY_SSHD_CONFIG,
    VOLUME_MOUNT_PATH_JAIL,
};
use soperator_common::k8s::ConfigMap;
use soperator_common::kube_utils::ObjectMeta;
use soperator_common::naming;
use soperator_common::values::SlurmCluster;
use soperator_common::Result;

use crate::common::render_labels;
use crate::config_file::RawConfig;

// =============================================================================
// SSH config
// =============================================================================

/// Render the ConfigMap holding the login sshd config
pub fn render_config_map_ssh_configs(cluster: &SlurmCluster) -> Result<ConfigMap> {
    Ok(login_config_map(
        naming::config_map_ssh_configs_name(&cluster.name),
        cluster,
    )
    .with_data(CONFIG_MAP_KEY_SSHD_CONFIG, generate_sshd_config(cluster).render()))
}

fn generate_sshd_config(cluster: &SlurmCluster) -> RawConfig {
    let mut res = RawConfig::new();
    res.add_line("LogLevel DEBUG3");
    res.add_line(format!("Port {}", cluster.node_login.container_sshd.port));
    res.add_line("PermitRootLogin yes");
    res.add_line("PasswordAuthentication no");
    res.add_line("ChallengeResponseAuthentication no");
    res.add_line("UsePAM yes");
    res.add_line("AcceptEnv LANG LC_*");
    res.add_line("X11Forwarding no");
    res.add_line("AllowTcpForwarding no");
    res.add_line("Subsystem sftp /usr/lib/openssh/sftp-server");
    // Must stay last: everything after a Match line is scoped to it
    res.add_line("Match User *");
    res.add_line(format!("    ChrootDirectory {VOLUME_MOUNT_PATH_JAIL}"));
    res
}

// =============================================================================
// Security limits
// =============================================================================

/// Render the ConfigMap holding the login security limits
pub fn render_config_map_security_limits(cluster: &SlurmCluster) -> Result<ConfigMap> {
    Ok(login_config_map(
        naming::config_map_security_limits_name(&cluster.name),
        cluster,
    )
    .with_data(
        CONFIG_MAP_KEY_SECURITY_LIMITS,
        generate_security_limits_config().render(),
    ))
}

fn generate_security_limits_config() -> RawConfig {
    let mut res = RawConfig::new();
    res.add_line("*       soft    memlock     unlimited");
    res.add_line("*       hard    memlock     unlimited");
    res.add_line("*       soft    nofile      1048576");
    res.add_line("*       hard    nofile      1048576");
    res.add_line("root    soft    memlock     unlimited");
    res.add_line("root    hard    memlock     unlimited");
    res.add_line("root    soft    nofile      1048576");
    res.add_line("root    hard    nofile      1048576");
    res
}

fn login_config_map(name: String, cluster: &SlurmCluster) -> ConfigMap {
    ConfigMap::from_metadata(
        ObjectMeta::new(name, cluster.namespace.clone())
            .with_labels(render_labels(ComponentType::Login, &cluster.name)),
    )
}
