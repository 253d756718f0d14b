//! Login node objects

mod configmap;

pub use configmap::{render_config_map_security_limits, render_config_map_ssh_configs};
