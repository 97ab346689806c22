use anyhow::{Context, Result};
use chembl_client::{BioactivitySource, ChemblClient};
use chembl_export::{ConfigOverrides, ExportConfig, FetchExportPipeline};
use clap::Parser;
use shared_types::ResolutionPolicy;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "chembl-export",
    version,
    about = "Export ChEMBL bioactivity records for a target to CSV"
)]
struct Cli {
    /// Target to look up: protein name, UniProt accession or ChEMBL id
    accession: Option<String>,

    /// Measurement type to keep (e.g. Ki, IC50)
    #[arg(long)]
    standard_type: Option<String>,

    /// Directory the CSV is written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Only accept a search hit that names the accession exactly
    #[arg(long)]
    exact: bool,

    /// Print the candidate targets and exit without exporting
    #[arg(long)]
    list_targets: bool,

    /// Config file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the ChEMBL API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Activities requested per page
    #[arg(long)]
    page_size: Option<usize>,

    #[arg(long)]
    log_file_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file_path.as_deref());

    let (mut config, config_path) =
        ExportConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    match &config_path {
        Some(path) => tracing::debug!("Loaded config from {:?}", path),
        None => tracing::debug!("No config file found, using defaults"),
    }

    config.apply_overrides(ConfigOverrides {
        accession: cli.accession,
        standard_type: cli.standard_type,
        output_dir: cli.output_dir,
        resolution: cli.exact.then_some(ResolutionPolicy::Exact),
        base_url: cli.base_url,
        page_size: cli.page_size,
    });

    let accession = config.accession().context("Invalid accession")?;
    let options = config.pipeline_options().context("Invalid export settings")?;

    let client: Arc<dyn BioactivitySource> = Arc::new(
        ChemblClient::new(config.client_options()).context("Failed to build ChEMBL client")?,
    );
    let pipeline = FetchExportPipeline::new(client, options);

    if cli.list_targets {
        let candidates = pipeline
            .list_candidates(&accession)
            .await
            .with_context(|| format!("Target search failed for {}", accession))?;
        if candidates.is_empty() {
            println!("No targets found for {}", accession);
        }
        for target in candidates {
            println!(
                "{}\t{}\t{}\t{}",
                target.target_chembl_id,
                target.pref_name.as_deref().unwrap_or("-"),
                target.organism.as_deref().unwrap_or("-"),
                target.target_type.as_deref().unwrap_or("-"),
            );
        }
        return Ok(());
    }

    let summary = pipeline
        .run(&accession)
        .await
        .with_context(|| format!("Export failed for {}", accession))?;

    println!(
        "Wrote {} {} activities for {} ({}) to {}",
        summary.row_count,
        summary.standard_type,
        summary.target.target_chembl_id,
        summary.target.display_name(),
        summary.output_path.display()
    );
    Ok(())
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("chembl-export.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
