//! Encoding rendered objects for stdout

use serde_json::Value;
use soperator_common::{Error, Result};

/// Output encoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Multi-document YAML stream
    #[default]
    Yaml,
    /// Pretty-printed JSON array
    Json,
}

/// Encode `objects` in `format`
pub fn encode(objects: &[Value], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => to_yaml(objects),
        OutputFormat::Json => to_json(objects),
    }
}

/// Multi-document YAML, documents separated by `---`
pub fn to_yaml(objects: &[Value]) -> Result<String> {
    let docs = objects
        .iter()
        .map(|o| {
            serde_yaml::to_string(o).map_err(|e| Error::serialization_for("yaml", e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(docs
        .iter()
        .map(|d| format!("---\n{d}"))
        .collect::<String>())
}

/// Pretty-printed JSON array
pub fn to_json(objects: &[Value]) -> Result<String> {
    serde_json::to_string_pretty(objects)
        .map_err(|e| Error::serialization_for("json", e.to_string()))
}
