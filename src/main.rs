// Main entry point - Configuration, sink wiring and the compile run
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_sink::DashboardSink;
use crate::application::publish_service::PublishService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::definition::{discover_definitions, load_definitions};
use crate::infrastructure::file_sink::FileSink;
use crate::infrastructure::grafana_sink::GrafanaSink;
use crate::presentation::cli::Cli;
use crate::presentation::report::print_report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dashgen=info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let app_config = load_app_config(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config))?;

    // Collect definitions
    let paths = if cli.definitions.is_empty() {
        discover_definitions(&app_config.definitions.directory)?
    } else {
        cli.definitions.clone()
    };
    let sources = load_definitions(&paths)?;

    // Create sinks (infrastructure layer)
    let mut sinks: Vec<Arc<dyn DashboardSink>> = Vec::new();
    if !cli.check {
        let file_sink = FileSink::new(
            app_config.output.directory.clone(),
            app_config.output.pretty,
        );
        tracing::info!("Writing dashboards to {}", file_sink.directory().display());
        sinks.push(Arc::new(file_sink));
    }
    if cli.push {
        let grafana = app_config
            .grafana
            .clone()
            .context("--push needs a [grafana] section in the configuration")?;
        tracing::info!("Pushing dashboards to {}", grafana.url);
        sinks.push(Arc::new(GrafanaSink::new(
            grafana.url,
            grafana.token,
            grafana.folder_uid,
            grafana.overwrite,
        )));
    }

    // Assemble and publish (application layer)
    let service = PublishService::new(sinks);
    let outcomes = service.publish_all(sources).await;

    let failed = print_report(&outcomes);
    if failed > 0 {
        anyhow::bail!("{} of {} dashboards failed", failed, outcomes.len());
    }

    Ok(())
}
