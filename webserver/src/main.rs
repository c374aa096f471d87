//! WebServer entry point
//!
//! Loads credentials and pipeline settings, connects the production
//! collaborators and serves the deal lookup over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use orchestrator::services::{live_orchestrator, Credentials};
use shared::{logging, process_info, PipelineConfig, ProcessId};

use webserver::{WebServer, WebServerResult, DEFAULT_ALLOWED_ORIGIN};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Serves nearby business deals to the browser client")]
struct Args {
    /// Port for HTTP server (browser connections)
    #[arg(long, default_value = "5000")]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Frontend origin allowed by CORS
    #[arg(long, default_value = DEFAULT_ALLOWED_ORIGIN)]
    allowed_origin: String,

    /// Maximum number of business lanes running at once
    #[arg(long)]
    max_lanes: Option<usize>,

    /// Per-business deadline in seconds
    #[arg(long)]
    lane_timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), "deal lookup web server");

    let mut config = PipelineConfig::from_env()?;
    if let Some(max_lanes) = args.max_lanes {
        config.max_lanes = max_lanes;
    }
    if let Some(secs) = args.lane_timeout_secs {
        config.lane_timeout = Duration::from_secs(secs);
    }
    config.validate()?;

    let credentials = Credentials::from_env()?;
    let lookup = live_orchestrator(credentials, config).await?;

    let bind_address: SocketAddr = format!("{}:{}", args.host, args.port).parse().map_err(|_| {
        webserver::WebServerError::ServerStartupFailed {
            address: format!("{}:{}", args.host, args.port),
            message: "invalid bind address".to_string(),
        }
    })?;
    process_info!(ProcessId::current(), allowed_origin = %args.allowed_origin, "CORS configured");

    let server = WebServer::new(lookup, bind_address, &args.allowed_origin)?;
    server.run().await?;

    logging::log_success(ProcessId::current(), "Web server stopped gracefully");
    Ok(())
}
