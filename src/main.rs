use chrono::Local;
use clap::Parser;
use integrity_monitor::config::AppConfig;
use integrity_monitor::error::{MonitorError, Result};
use integrity_monitor::monitor::{CompletionPoller, IntegrityService, MappingPipeline, PollerConfig};
use integrity_monitor::DhisClient;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// One-shot monitor: run the configured integrity checks to completion and
/// republish the monitored results as data values.
#[derive(Parser)]
#[command(name = "integrity-monitor", version, about)]
struct Cli {
    /// Directory containing default.toml
    #[arg(long, default_value = "config")]
    config: PathBuf,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,integrity_monitor=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = AppConfig::load_from(&cli.config)?;
    let client = DhisClient::new(
        &config.server.base_url,
        &config.server.username,
        &config.server.password,
    )?;

    info!(server = %config.server.base_url, "Starting integrity monitor run");

    let catalog = client.fetch_integrity_checks().await?;
    info!(checks = catalog.len(), "Fetched integrity check catalog");

    let poller = CompletionPoller::new(PollerConfig {
        settle: config.poller.settle(),
        interval: config.poller.interval(),
        max_attempts: config.poller.max_attempts,
    });
    let summaries = poller.run(&client).await?;

    let org_units = client.fetch_level1_org_units().await?;
    let org_unit = org_units.first().ok_or_else(|| {
        MonitorError::UnexpectedResponse("no level-1 organisation unit returned".to_string())
    })?;

    let period = Local::now().format("%Y%m%d").to_string();

    let pipeline = MappingPipeline::new(config.checks.monitored_names());
    let report = pipeline
        .run(&client, &summaries, &catalog, &period, &org_unit.id)
        .await;

    info!(
        published = report.published,
        missing_summary = report.missing_summary,
        missing_data_element = report.missing_data_element,
        publish_failures = report.publish_failures,
        period = %period,
        org_unit = %org_unit.id,
        "Run complete"
    );

    Ok(())
}
