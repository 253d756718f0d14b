//! Containers of the worker pod
//!
//! The toolkit-validation init container blocks until the NVIDIA container
//! stack has written its readiness marker; slurmd starts after it.

use std::collections::BTreeMap;

use soperator_common::consts::{
    ComponentType, CAPABILITY_SYS_ADMIN, CONTAINER_NAME_SLURMD, CONTAINER_NAME_TOOLKIT_VALIDATION,
    ENV_POD_NAME, ENV_POD_NAMESPACE, FIELD_PATH_POD_NAME, FIELD_PATH_POD_NAMESPACE,
    PROC_MOUNT_UNMASKED, PROTOCOL_TCP, RESOURCE_CPU, RESOURCE_EPHEMERAL_STORAGE, RESOURCE_MAX_GPU,
    RESOURCE_MEMORY, SECCOMP_PROFILE_UNCONFINED, SLURMD_NAME, SLURMD_READINESS_COMMAND,
    SLURMD_READINESS_PERIOD_SECONDS, TERMINATION_MESSAGE_PATH, TERMINATION_MESSAGE_READ_FILE,
    TOOLKIT_VALIDATION_SLEEP_SECONDS, VOLUME_MOUNT_PATH_NVIDIA,
};
use soperator_common::k8s::{
    Capabilities, Container, ContainerPort, EnvVar, Probe, PullPolicy, Quantity,
    ResourceRequirements, SeccompProfile, SecurityContext,
};
use soperator_common::values::{ContainerValues, JailSubMount};
use soperator_common::Result;

use super::volume::{
    render_volume_mount_boot, render_volume_mount_nccl_topology, render_volume_mount_nvidia,
    render_volume_mount_shared_memory, render_volume_mount_sysctl,
};
use crate::common;

/// Render the init container waiting for the NVIDIA toolkit to be ready.
///
/// The wait has no timeout; the pod stays in init until the marker appears.
pub fn render_container_toolkit_validation(container: &ContainerValues) -> Result<Container> {
    let script = [
        format!("until [ -f {VOLUME_MOUNT_PATH_NVIDIA}/validations/toolkit-ready ]; do"),
        "echo 'waiting for nvidia container stack to be setup';".to_string(),
        format!("sleep {TOOLKIT_VALIDATION_SLEEP_SECONDS};"),
        "done".to_string(),
    ]
    .join(" ");

    Ok(Container {
        image_pull_policy: Some(PullPolicy::IfNotPresent),
        command: Some(vec!["sh".to_string()]),
        args: Some(vec!["-c".to_string(), script]),
        volume_mounts: vec![render_volume_mount_nvidia()],
        termination_message_policy: Some(TERMINATION_MESSAGE_READ_FILE.to_string()),
        termination_message_path: Some(TERMINATION_MESSAGE_PATH.to_string()),
        ..Container::new(CONTAINER_NAME_TOOLKIT_VALIDATION, container.image.clone())
    })
}

/// Render the slurmd container.
///
/// Mounts are the fixed base set followed by `jail_sub_mounts` in the given
/// order. `max_gpu` becomes the `slurm.nebius.ai/max-gpu` limit, zero included.
pub fn render_container_slurmd(
    container: &ContainerValues,
    max_gpu: i32,
    jail_sub_mounts: &[JailSubMount],
) -> Result<Container> {
    let mut volume_mounts = vec![
        common::render_volume_mount_slurm_configs(),
        common::render_volume_mount_spool(ComponentType::Worker, SLURMD_NAME),
        common::render_volume_mount_jail(),
        common::render_volume_mount_munge_socket(),
        render_volume_mount_nvidia(),
        render_volume_mount_boot(),
        render_volume_mount_nccl_topology(),
        render_volume_mount_shared_memory(),
        render_volume_mount_sysctl(),
    ];
    volume_mounts.extend(common::render_volume_mounts_for_jail_sub_mounts(
        jail_sub_mounts,
    ));

    Ok(Container {
        // TODO: pin images by digest and switch to IfNotPresent
        image_pull_policy: Some(PullPolicy::Always),
        env: vec![
            EnvVar::from_field(ENV_POD_NAME, FIELD_PATH_POD_NAME),
            EnvVar::from_field(ENV_POD_NAMESPACE, FIELD_PATH_POD_NAMESPACE),
        ],
        ports: vec![ContainerPort {
            name: (!container.name.is_empty()).then(|| container.name.clone()),
            container_port: container.port,
            protocol: Some(PROTOCOL_TCP.to_string()),
        }],
        volume_mounts,
        readiness_probe: Some(Probe::exec(
            vec![
                "/bin/sh".to_string(),
                "-c".to_string(),
                SLURMD_READINESS_COMMAND.to_string(),
            ],
            SLURMD_READINESS_PERIOD_SECONDS,
        )),
        security_context: Some(slurmd_security_context()),
        resources: Some(ResourceRequirements {
            requests: None,
            limits: Some(BTreeMap::from([
                (RESOURCE_CPU.to_string(), container.resources.cpu.clone()),
                (RESOURCE_MEMORY.to_string(), container.resources.memory.clone()),
                (
                    RESOURCE_EPHEMERAL_STORAGE.to_string(),
                    container.resources.ephemeral_storage.clone(),
                ),
                (
                    RESOURCE_MAX_GPU.to_string(),
                    Quantity::from_count(i64::from(max_gpu))?,
                ),
            ])),
        }),
        ..Container::new(CONTAINER_NAME_SLURMD, container.image.clone())
    })
}

// slurmd manages host devices and cgroups
fn slurmd_security_context() -> SecurityContext {
    SecurityContext {
        privileged: Some(true),
        capabilities: Some(Capabilities {
            add: Some(vec![CAPABILITY_SYS_ADMIN.to_string()]),
            drop: None,
        }),
        seccomp_profile: Some(SeccompProfile {
            type_: SECCOMP_PROFILE_UNCONFINED.to_string(),
            localhost_profile: None,
        }),
        proc_mount: Some(PROC_MOUNT_UNMASKED.to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use soperator_common::values::ContainerResources;

    fn slurmd_values() -> ContainerValues {
        ContainerValues {
            name: "slurmd".to_string(),
            image: "cr.example.com/slurmd:24.05".to_string(),
            port: 6818,
            resources: ContainerResources {
                cpu: Quantity::from("8"),
                memory: Quantity::from("32Gi"),
                ephemeral_storage: Quantity::from("20Gi"),
            },
        }
    }

    fn sub_mounts(n: usize) -> Vec<JailSubMount> {
        (0..n)
            .map(|i| JailSubMount {
                name: format!("sub-{i}"),
                mount_path: format!("/data/{i}"),
            })
            .collect()
    }

    // =========================================================================
    // toolkit-validation
    // =========================================================================

    #[test]
    fn toolkit_validation_waits_on_marker() {
        let c = render_container_toolkit_validation(&slurmd_values()).unwrap();
        assert_eq!(c.name, "toolkit-validation");
        assert_eq!(c.image, "cr.example.com/slurmd:24.05");
        assert_eq!(c.image_pull_policy, Some(PullPolicy::IfNotPresent));
        assert_eq!(c.command, Some(vec!["sh".to_string()]));

        let args = c.args.unwrap();
        assert_eq!(args[0], "-c");
        assert_eq!(
            args[1],
            "until [ -f /run/nvidia/validations/toolkit-ready ]; do \
             echo 'waiting for nvidia container stack to be setup'; sleep 5; done"
        );
    }

    #[test]
    fn toolkit_validation_mounts_only_nvidia() {
        let c = render_container_toolkit_validation(&slurmd_values()).unwrap();
        assert_eq!(c.volume_mounts.len(), 1);
        assert_eq!(c.volume_mounts[0].name, "nvidia");

        let args = c.args.unwrap();
        let script = &args[1];
        assert_eq!(script.matches(VOLUME_MOUNT_PATH_NVIDIA).count(), 1);
        for other in ["/mnt/jail", "/mnt/slurm-configs", "/run/munge", "/boot"] {
            assert!(!script.contains(other), "{other}");
        }
    }

    #[test]
    fn toolkit_validation_termination_message() {
        let c = render_container_toolkit_validation(&slurmd_values()).unwrap();
        assert_eq!(c.termination_message_policy.as_deref(), Some("File"));
        assert_eq!(
            c.termination_message_path.as_deref(),
            Some("/dev/termination-log")
        );
        assert!(c.resources.is_none());
        assert!(c.readiness_probe.is_none());
    }

    // =========================================================================
    // slurmd
    // =========================================================================

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5)]
    fn slurmd_mounts_base_then_sub_mounts(#[case] n: usize) {
        let subs = sub_mounts(n);
        let c = render_container_slurmd(&slurmd_values(), 8, &subs).unwrap();
        assert_eq!(c.volume_mounts.len(), 9 + n);

        let base: Vec<_> = c.volume_mounts[..9].iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            base,
            [
                "slurm-configs",
                "worker-spool",
                "jail",
                "munge-socket",
                "nvidia",
                "boot",
                "nccl-topology",
                "dev-shm",
                "sysctl",
            ]
        );
        for (i, m) in c.volume_mounts[9..].iter().enumerate() {
            assert_eq!(m.name, format!("sub-{i}"));
            assert_eq!(m.mount_path, format!("/mnt/jail/data/{i}"));
        }
    }

    #[test]
    fn slurmd_passes_duplicate_sub_mounts_through() {
        let mut subs = sub_mounts(1);
        subs.push(subs[0].clone());
        let c = render_container_slurmd(&slurmd_values(), 0, &subs).unwrap();
        assert_eq!(c.volume_mounts.len(), 11);
        assert_eq!(c.volume_mounts[9], c.volume_mounts[10]);
    }

    #[test]
    fn slurmd_env_from_pod_identity() {
        let c = render_container_slurmd(&slurmd_values(), 0, &[]).unwrap();
        assert_eq!(c.env.len(), 2);
        let fields: Vec<_> = c
            .env
            .iter()
            .map(|e| {
                assert!(e.value.is_none());
                let field = e.value_from.as_ref().unwrap().field_ref.as_ref().unwrap();
                (e.name.as_str(), field.field_path.as_str())
            })
            .collect();
        assert_eq!(
            fields,
            [
                ("K8S_POD_NAME", "metadata.name"),
                ("K8S_POD_NAMESPACE", "metadata.namespace"),
            ]
        );
    }

    #[test]
    fn slurmd_single_port_from_values() {
        let c = render_container_slurmd(&slurmd_values(), 0, &[]).unwrap();
        assert_eq!(
            c.ports,
            vec![ContainerPort {
                name: Some("slurmd".to_string()),
                container_port: 6818,
                protocol: Some("TCP".to_string()),
            }]
        );
        assert_eq!(c.image_pull_policy, Some(PullPolicy::Always));
    }

    #[test]
    fn slurmd_port_without_name_is_unnamed() {
        let mut values = slurmd_values();
        values.name = String::new();
        let c = render_container_slurmd(&values, 0, &[]).unwrap();
        assert_eq!(c.ports.len(), 1);
        assert_eq!(c.ports[0].name, None);
        assert_eq!(c.ports[0].container_port, 6818);
    }

    #[test]
    fn slurmd_readiness_probe() {
        let c = render_container_slurmd(&slurmd_values(), 0, &[]).unwrap();
        let probe = c.readiness_probe.unwrap();
        assert_eq!(probe.period_seconds, Some(30));
        assert_eq!(
            probe.exec.unwrap().command,
            vec![
                "/bin/sh",
                "-c",
                "/usr/bin/sinfo > /dev/null && exit 0 || exit 1"
            ]
        );
    }

    #[test]
    fn slurmd_security_context_is_privileged() {
        let c = render_container_slurmd(&slurmd_values(), 0, &[]).unwrap();
        let sc = c.security_context.unwrap();
        assert_eq!(sc.privileged, Some(true));
        assert_eq!(
            sc.capabilities.unwrap().add,
            Some(vec!["SYS_ADMIN".to_string()])
        );
        assert_eq!(sc.seccomp_profile.unwrap().type_, "Unconfined");
        assert_eq!(sc.proc_mount.as_deref(), Some("Unmasked"));
    }

    #[rstest]
    #[case(0, "0")]
    #[case(8, "8")]
    #[case(-1, "-1")]
    fn slurmd_limits(#[case] max_gpu: i32, #[case] expected_gpu: &str) {
        let c = render_container_slurmd(&slurmd_values(), max_gpu, &[]).unwrap();
        let resources = c.resources.unwrap();
        assert!(resources.requests.is_none());

        let limits = resources.limits.unwrap();
        assert_eq!(limits.len(), 4);
        assert_eq!(limits["cpu"].as_str(), "8");
        assert_eq!(limits["memory"].as_str(), "32Gi");
        assert_eq!(limits["ephemeral-storage"].as_str(), "20Gi");
        assert_eq!(limits["slurm.nebius.ai/max-gpu"].as_str(), expected_gpu);
    }

    #[test]
    fn slurmd_passes_unvalidated_values_through() {
        let mut values = slurmd_values();
        values.image = String::new();
        values.port = -5;
        values.resources.memory = Quantity::from("not-a-quantity");

        let c = render_container_slurmd(&values, 0, &[]).unwrap();
        assert_eq!(c.image, "");
        assert_eq!(c.ports[0].container_port, -5);
        assert_eq!(
            c.resources.unwrap().limits.unwrap()["memory"].as_str(),
            "not-a-quantity"
        );
    }

    #[test]
    fn slurmd_serializes_limit_keys() {
        let c = render_container_slurmd(&slurmd_values(), 4, &[]).unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["resources"]["limits"]["slurm.nebius.ai/max-gpu"], "4");
        assert_eq!(json["resources"]["limits"]["ephemeral-storage"], "20Gi");
        assert_eq!(json["volumeMounts"][0]["readOnly"], true);
        assert_eq!(json["env"][1]["valueFrom"]["fieldRef"]["fieldPath"], "metadata.namespace");
    }
}
