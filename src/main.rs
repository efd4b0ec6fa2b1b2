// Main entry point - Command line parsing, dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::{Args, Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::profile_service::{ConversionTarget, ProfileService};
use crate::domain::interval::Interval;
use crate::domain::unit::EnergyUnit;
use crate::infrastructure::config::{load_settings, Settings};
use crate::infrastructure::file_store::FileProfileStore;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{convert_profile, health_check};

#[derive(Parser)]
#[command(name = "epc", version, about = "Resample energy profiles and convert their units")]
struct Cli {
    /// Settings file, defaults to config/converter.{toml,yaml,json} when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a profile file to another interval and unit
    Convert(ConvertArgs),
    /// Serve conversions over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Path of source file to read from
    #[arg(short, long = "in", value_name = "PATH")]
    input: PathBuf,

    /// Path of destination file to write converted data to
    #[arg(short, long = "out", value_name = "PATH")]
    output: PathBuf,

    /// Target interval in minutes (1, 5, 15, 30, 60, 1440)
    #[arg(long, value_parser = parse_interval)]
    interval: Interval,

    /// Target unit (kWh, Wh, KJ, J)
    #[arg(long, value_parser = parse_unit)]
    unit: EnergyUnit,
}

fn parse_interval(s: &str) -> Result<Interval, String> {
    s.parse().map_err(|e: domain::error::ConversionError| e.to_string())
}

fn parse_unit(s: &str) -> Result<EnergyUnit, String> {
    s.parse().map_err(|e: domain::error::ConversionError| e.to_string())
}

fn init_tracing(settings: &Settings, verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = load_settings(cli.config.as_deref())?;
    init_tracing(&settings, cli.verbose);

    // Create store (infrastructure layer) and service (application layer)
    let store = Arc::new(FileProfileStore::new(&settings.output));
    let profile_service = ProfileService::new(store);

    match cli.command {
        Commands::Convert(args) => {
            let target = ConversionTarget {
                interval: args.interval,
                unit: args.unit,
            };
            let summary = profile_service
                .convert_file(&args.input, &args.output, target)
                .await?;
            tracing::info!(
                "Converted {} samples into {} (window size {}, padding {})",
                summary.input_len,
                summary.output_len,
                summary.plan.window_size,
                summary.plan.padding
            );
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(settings.server.host);
            let port = port.unwrap_or(settings.server.port);
            serve(profile_service, &host, port).await?;
        }
    }

    Ok(())
}

async fn serve(profile_service: ProfileService, host: &str, port: u16) -> anyhow::Result<()> {
    let state = Arc::new(AppState { profile_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/convert", post(convert_profile))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {host}:{port}"))?;
    tracing::info!("Starting energy profile converter on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
