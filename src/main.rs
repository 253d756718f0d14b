//! soperator-render - print the manifests rendered for a Slurm cluster spec

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use soperator_common::telemetry::{init_logging, TelemetryConfig};
use soperator_render::render_cluster;
use soperator_render_cli::config::load_cluster;
use soperator_render_cli::output::{encode, OutputFormat};

/// Render login ConfigMaps and worker containers for a Slurm cluster
#[derive(Parser, Debug)]
#[command(name = "soperator-render", version, about, long_about = None)]
struct Cli {
    /// Path to the cluster spec (YAML or JSON)
    #[arg(short = 'f', long = "config", env = "SOPERATOR_CLUSTER_SPEC")]
    config_file: PathBuf,

    /// Which node objects to render
    #[arg(long, value_enum, default_value_t = Component::All)]
    component: Component,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,

    /// Log as JSON lines
    #[arg(long, env = "SOPERATOR_LOG_JSON")]
    log_json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Component {
    All,
    Login,
    Worker,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(TelemetryConfig { json: cli.log_json })?;

    let cluster = load_cluster(&cli.config_file)?;
    let rendered = render_cluster(&cluster)?;
    let rendered = match cli.component {
        Component::All => rendered,
        Component::Login => rendered.login_only(),
        Component::Worker => rendered.worker_only(),
    };

    let out = encode(&rendered.to_values()?, cli.output)?;
    info!(
        service = soperator_render_cli::SERVICE_NAME,
        cluster = %cluster.name,
        objects = rendered.len(),
        "rendered manifests"
    );

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    if !out.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}
