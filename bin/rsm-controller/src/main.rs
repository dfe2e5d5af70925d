//! RAN slice management controller
//!
//! Serves the RSM northbound API, turns each request into an E2SM-RSM control
//! message and hands it to the control channel of the addressed E2 node.
//!
//! # Usage
//!
//! ```bash
//! # Defaults (listen on 0.0.0.0:5150, empty topology)
//! rsm-controller
//!
//! # With a configuration file
//! rsm-controller --config rsm.yaml
//!
//! # Write an example configuration
//! rsm-controller gen-config --output rsm.yaml
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::tokio::TokioIo;
use rsm_core::{RequestRouter, RequestValidator};
use rsm_northbound::{RsmMetrics, RsmService};
use rsm_topo::{InMemoryTopo, RnibClient};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod e2_connections;

use config::ControllerConfig;
use e2_connections::E2ConnectionManager;

const CONNECTION_EVENT_BUFFER: usize = 64;

/// RSM xApp controller
#[derive(Parser, Debug)]
#[command(name = "rsm-controller")]
#[command(about = "RAN slice management controller")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address for the northbound API (overrides the config file)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate example configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "rsm.yaml")]
        output: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::GenConfig { output } => cmd_gen_config(output),
            Commands::Validate { config } => cmd_validate(config),
        };
    }

    let mut config = ControllerConfig::load(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }
    config.validate()?;

    init_tracing(&config.log_level, config.json_logs);
    info!("Starting rsm-controller...");

    let topo = Arc::new(InMemoryTopo::new());
    for object in config.topology.objects() {
        topo.create(object).await?;
    }
    info!("Topology seeded with {} e2 nodes", config.topology.nodes.len());

    let router = Arc::new(RequestRouter::new(
        config.channel_capacity,
        config.send_timeout(),
    ));
    info!(
        "Request router initialized (capacity {}, send timeout {:?})",
        config.channel_capacity,
        config.send_timeout()
    );

    let rnib = RnibClient::new(topo.clone());
    let (events_tx, events_rx) = mpsc::channel(CONNECTION_EVENT_BUFFER);
    rnib.watch_e2_connections(events_tx).await?;
    let connections = E2ConnectionManager::new(rnib, router.clone());
    tokio::spawn(connections.run(events_rx));

    let metrics = RsmMetrics::new()?;
    let service = Arc::new(RsmService::new(
        RequestValidator::new(config.enum_policy),
        router,
        metrics,
    ));
    info!("Enum policy: {:?}", config.enum_policy);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("Northbound API listening on {}", config.listen_addr);

    tokio::select! {
        result = serve(listener, service) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received, exiting..."),
    }

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Accept HTTP connections in a loop
async fn serve(listener: TcpListener, service: Arc<RsmService>) -> Result<()> {
    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let service = service.clone();

        tokio::task::spawn(async move {
            let handler = service_fn(move |req| rsm_northbound::handle(service.clone(), req));

            if let Err(e) = http1::Builder::new().serve_connection(io, handler).await {
                debug!("Error serving HTTP connection from {}: {}", peer_addr, e);
            }
        });
    }
}

fn cmd_gen_config(output: PathBuf) -> Result<()> {
    let yaml = ControllerConfig::example().to_yaml()?;
    std::fs::write(&output, yaml)?;
    println!("Configuration written to {}", output.display());
    Ok(())
}

fn cmd_validate(path: PathBuf) -> Result<()> {
    let config = ControllerConfig::from_file(&path)?;
    config.validate()?;
    println!("Configuration is valid");
    println!("  Listen address: {}", config.listen_addr);
    println!("  Channel capacity: {}", config.channel_capacity);
    println!("  Send timeout: {} ms", config.send_timeout_ms);
    println!("  E2 nodes: {}", config.topology.nodes.len());
    Ok(())
}
