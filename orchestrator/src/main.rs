//! Main entry point for the orchestrator binary
//!
//! Runs a single deal lookup around a coordinate with the production
//! collaborators and prints the merged records as JSON.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use orchestrator::{
    services::{live_orchestrator, Credentials},
    OrchestratorResult,
};
use shared::{logging, process_debug, process_info, PipelineConfig, ProcessId};

/// Deal lookup for the businesses around a coordinate
#[derive(Parser)]
#[command(name = "orchestrator")]
#[command(about = "Finds current deals for nearby businesses and prints them as JSON")]
pub struct Args {
    /// Latitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Maximum number of business lanes running at once
    #[arg(long)]
    pub max_lanes: Option<usize>,

    /// Per-business deadline in seconds
    #[arg(long)]
    pub lane_timeout_secs: Option<u64>,

    /// Read credentials from this file instead of the default .env lookup
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    fn pipeline_config(&self) -> OrchestratorResult<PipelineConfig> {
        let mut config = PipelineConfig::from_env()?;
        if let Some(max_lanes) = self.max_lanes {
            config.max_lanes = max_lanes;
        }
        if let Some(secs) = self.lane_timeout_secs {
            config.lane_timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }

    fn credentials(&self) -> OrchestratorResult<Credentials> {
        match &self.env_file {
            Some(path) => Credentials::from_env_file(path),
            None => Credentials::from_env(),
        }
    }
}

#[tokio::main]
async fn main() -> OrchestratorResult<()> {
    let args = Args::parse();

    ProcessId::init_orchestrator();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), "deal lookup (CLI mode)");

    let credentials = args.credentials().map_err(|e| {
        logging::log_error(ProcessId::current(), "Loading credentials", &e);
        e
    })?;
    let config = args.pipeline_config()?;
    process_debug!(
        ProcessId::current(),
        max_lanes = config.max_lanes,
        lane_timeout_secs = config.lane_timeout.as_secs(),
        "Pipeline configured"
    );

    let orchestrator = live_orchestrator(credentials, config).await?;
    let records = orchestrator.aggregate(args.lat, args.lng).await.map_err(|e| {
        logging::log_error(ProcessId::current(), "Deal lookup", &e);
        e
    })?;

    let with_deals = records.iter().filter(|record| !record.deals.is_empty()).count();
    process_info!(ProcessId::current(), businesses = records.len(), with_deals, "Lookup complete");

    let rendered = serde_json::to_string_pretty(&records)?;
    println!("{rendered}");

    logging::log_success(ProcessId::current(), "Lookup finished");
    Ok(())
}
