//! Kubernetes resource types for rendered manifests
//!
//! Plain serde mirrors of the core/v1 schema, trimmed to the fields the
//! renderers populate. Field names serialize exactly as the API server expects
//! so the objects can be applied with server-side apply as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kube_utils::ObjectMeta;
use crate::{Error, Result};

// =============================================================================
// ConfigMap
// =============================================================================

/// Kubernetes ConfigMap for non-sensitive configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    /// API version
    pub api_version: String,
    /// Kind
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// String data
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl ConfigMap {
    /// Create a new ConfigMap
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::from_metadata(ObjectMeta::new(name, namespace))
    }

    /// Create a new ConfigMap with prepared metadata
    pub fn from_metadata(metadata: ObjectMeta) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "ConfigMap".to_string(),
            metadata,
            data: BTreeMap::new(),
        }
    }

    /// Add a data entry
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Resource quantity in the API server's format (`500m`, `16Gi`, `8`, `1e3`)
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Quantity(pub String);

// Unquoted YAML numbers (`cpu: 4`) arrive as integers or floats
impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(i) => Self(i.to_string()),
            Raw::Float(f) => Self(f.to_string()),
        })
    }
}

const QUANTITY_SUFFIXES: &[&str] = &[
    "", "n", "u", "m", "k", "M", "G", "T", "P", "E", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei",
];

impl Quantity {
    /// Parse a quantity string, checking it against the API server grammar.
    ///
    /// Only syntax is checked; range (e.g. negative memory) is left to admission.
    pub fn parse(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::quantity(value, "empty quantity"));
        }

        let unsigned = value.strip_prefix(&['+', '-'][..]).unwrap_or(value);
        let number_end = unsigned
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(unsigned.len());
        let (number, suffix) = unsigned.split_at(number_end);

        if !is_valid_number(number) {
            return Err(Error::quantity(value, "missing or malformed numeric part"));
        }
        if !is_valid_suffix(suffix) {
            return Err(Error::quantity(value, format!("unknown suffix {suffix:?}")));
        }

        Ok(Self(value.to_string()))
    }

    /// Quantity for a plain integer count (GPUs, devices)
    pub fn from_count(count: i64) -> Result<Self> {
        Self::parse(&count.to_string())
    }

    /// The quantity as written
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_number(number: &str) -> bool {
    let (whole, frac) = match number.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (number, ""),
    };
    !frac.contains('.') && !(whole.is_empty() && frac.is_empty())
}

fn is_valid_suffix(suffix: &str) -> bool {
    if QUANTITY_SUFFIXES.contains(&suffix) {
        return true;
    }
    // Decimal exponent: e3, E-2, e+6
    suffix
        .strip_prefix(&['e', 'E'][..])
        .map(|exp| exp.strip_prefix(&['+', '-'][..]).unwrap_or(exp))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Resource name to quantity, e.g. `cpu: 4`
pub type ResourceList = BTreeMap<String, Quantity>;

/// Resource requirements
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    /// Requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<ResourceList>,
    /// Limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceList>,
}

// =============================================================================
// Container
// =============================================================================

/// Image pull policy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PullPolicy {
    /// Pull on every start
    Always,
    /// Pull only when missing from the node
    IfNotPresent,
    /// Never pull
    Never,
}

/// Container spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container name
    pub name: String,
    /// Image
    pub image: String,
    /// Image pull policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<PullPolicy>,
    /// Command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Args
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// Environment variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    /// Ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
    /// Volume mounts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    /// Readiness probe - removes from service endpoints when it fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,
    /// Security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<SecurityContext>,
    /// Resource requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    /// Where the termination message is read from (File, FallbackToLogsOnError)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_message_policy: Option<String>,
    /// Path of the termination message file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_message_path: Option<String>,
}

impl Container {
    /// Create a container with only name and image set
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            image_pull_policy: None,
            command: None,
            args: None,
            env: Vec::new(),
            ports: Vec::new(),
            volume_mounts: Vec::new(),
            readiness_probe: None,
            security_context: None,
            resources: None,
            termination_message_policy: None,
            termination_message_path: None,
        }
    }
}

/// Environment variable -- either a literal value or a reference to a pod field
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    /// Variable name
    pub name: String,
    /// Literal value (mutually exclusive with `value_from`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Reference to a pod field (mutually exclusive with `value`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<EnvVarSource>,
}

impl EnvVar {
    /// Create an env var with a literal value
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            value_from: None,
        }
    }

    /// Create an env var resolved from the running pod's own fields
    /// (downward API), e.g. `metadata.name`
    pub fn from_field(name: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_from: Some(EnvVarSource {
                field_ref: Some(ObjectFieldSelector {
                    field_path: field_path.into(),
                }),
            }),
        }
    }
}

/// Source for an environment variable value
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    /// Reference to a field of the pod
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_ref: Option<ObjectFieldSelector>,
}

/// Selector for a field of the pod
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFieldSelector {
    /// Field path, e.g. `metadata.namespace`
    pub field_path: String,
}

/// Container port
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    /// Port name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Port number
    pub container_port: i32,
    /// Protocol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

// =============================================================================
// Probes
// =============================================================================

/// Probe specification
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    /// Exec probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecAction>,
    /// Seconds after container start before probes begin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<i32>,
    /// Seconds between probe attempts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i32>,
    /// Seconds before the probe times out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    /// Consecutive failures before marking unhealthy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<i32>,
}

impl Probe {
    /// Exec probe running `command` every `period_seconds`
    pub fn exec(command: Vec<String>, period_seconds: i32) -> Self {
        Self {
            exec: Some(ExecAction { command }),
            initial_delay_seconds: None,
            period_seconds: Some(period_seconds),
            timeout_seconds: None,
            failure_threshold: None,
        }
    }
}

/// Exec action for probe
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecAction {
    /// Command
    pub command: Vec<String>,
}

// =============================================================================
// Security context
// =============================================================================

/// Kubernetes container security context
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    /// Capabilities to add/drop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,
    /// Run container in privileged mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    /// Allow privilege escalation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_privilege_escalation: Option<bool>,
    /// Seccomp profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seccomp_profile: Option<SeccompProfile>,
    /// `/proc` masking: Default or Unmasked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proc_mount: Option<String>,
}

/// Seccomp profile for container security context
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeccompProfile {
    /// Profile type: RuntimeDefault, Unconfined, or Localhost
    #[serde(rename = "type")]
    pub type_: String,
    /// Localhost profile path (only for Localhost type)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localhost_profile: Option<String>,
}

/// Linux capabilities for containers
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Capabilities to add
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<String>>,
    /// Capabilities to drop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop: Option<Vec<String>>,
}

// =============================================================================
// Volumes
// =============================================================================

/// Volume mount
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Volume name
    pub name: String,
    /// Mount path
    pub mount_path: String,
    /// Sub path within the volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
    /// Read only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

impl VolumeMount {
    /// Create a read-write mount
    pub fn new(name: impl Into<String>, mount_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mount_path: mount_path.into(),
            sub_path: None,
            read_only: None,
        }
    }

    /// Create a read-only mount
    pub fn readonly(name: impl Into<String>, mount_path: impl Into<String>) -> Self {
        Self {
            read_only: Some(true),
            ..Self::new(name, mount_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0")]
    #[case("8")]
    #[case("-1")]
    #[case("+3")]
    #[case("500m")]
    #[case("1.5")]
    #[case(".5Gi")]
    #[case("2.")]
    #[case("16Gi")]
    #[case("100M")]
    #[case("1e3")]
    #[case("1E-2")]
    #[case("4Ei")]
    fn quantity_accepts_valid(#[case] input: &str) {
        let q = Quantity::parse(input).unwrap();
        assert_eq!(q.as_str(), input);
    }

    #[rstest]
    #[case("")]
    #[case("Gi")]
    #[case("-")]
    #[case(".")]
    #[case("1.2.3")]
    #[case("12xyz")]
    #[case("1 Gi")]
    #[case("1e")]
    #[case("1KI")]
    fn quantity_rejects_malformed(#[case] input: &str) {
        let err = Quantity::parse(input).unwrap_err();
        assert!(matches!(err, Error::Quantity { .. }), "{input}: {err}");
    }

    #[test]
    fn quantity_from_count_keeps_zero_and_negative() {
        assert_eq!(Quantity::from_count(0).unwrap().as_str(), "0");
        assert_eq!(Quantity::from_count(-2).unwrap().as_str(), "-2");
        assert_eq!(Quantity::from_count(8).unwrap().to_string(), "8");
    }

    #[test]
    fn quantity_serializes_as_plain_string() {
        let json = serde_json::to_value(Quantity::from("16Gi")).unwrap();
        assert_eq!(json, serde_json::json!("16Gi"));
    }

    #[test]
    fn quantity_deserializes_from_numbers() {
        let q: Quantity = serde_json::from_value(serde_json::json!(4)).unwrap();
        assert_eq!(q.as_str(), "4");
        let q: Quantity = serde_json::from_value(serde_json::json!(0.5)).unwrap();
        assert_eq!(q.as_str(), "0.5");
        let q: Quantity = serde_json::from_value(serde_json::json!("500m")).unwrap();
        assert_eq!(q.as_str(), "500m");
    }

    #[test]
    fn config_map_serialization() {
        let cm = ConfigMap::new("c1-ssh-configs", "ns1").with_data("sshd_config", "Port 22");
        let json = serde_json::to_value(&cm).unwrap();
        assert_eq!(json["apiVersion"], "v1");
        assert_eq!(json["kind"], "ConfigMap");
        assert_eq!(json["metadata"]["name"], "c1-ssh-configs");
        assert_eq!(json["data"]["sshd_config"], "Port 22");
    }

    #[test]
    fn env_from_field_serialization() {
        let env = EnvVar::from_field("K8S_POD_NAME", "metadata.name");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "K8S_POD_NAME",
                "valueFrom": {"fieldRef": {"fieldPath": "metadata.name"}}
            })
        );
    }

    #[test]
    fn literal_env_has_no_value_from() {
        let env = EnvVar::literal("FOO", "bar");
        assert_eq!(env.value.as_deref(), Some("bar"));
        assert!(env.value_from.is_none());
    }

    #[test]
    fn container_field_names() {
        let mut c = Container::new("slurmd", "slurmd:1");
        c.image_pull_policy = Some(PullPolicy::IfNotPresent);
        c.readiness_probe = Some(Probe::exec(vec!["true".to_string()], 30));
        c.security_context = Some(SecurityContext {
            proc_mount: Some("Unmasked".to_string()),
            seccomp_profile: Some(SeccompProfile {
                type_: "Unconfined".to_string(),
                localhost_profile: None,
            }),
            ..Default::default()
        });
        c.termination_message_policy = Some("File".to_string());

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["imagePullPolicy"], "IfNotPresent");
        assert_eq!(json["readinessProbe"]["periodSeconds"], 30);
        assert_eq!(json["readinessProbe"]["exec"]["command"][0], "true");
        assert_eq!(json["securityContext"]["procMount"], "Unmasked");
        assert_eq!(json["securityContext"]["seccompProfile"]["type"], "Unconfined");
        assert_eq!(json["terminationMessagePolicy"], "File");
        assert!(json.get("env").is_none());
        assert!(json.get("resources").is_none());
    }

    #[test]
    fn readonly_mount() {
        let m = VolumeMount::readonly("boot", "/boot");
        assert_eq!(m.read_only, Some(true));
        assert_eq!(VolumeMount::new("jail", "/mnt/jail").read_only, None);
    }
}
