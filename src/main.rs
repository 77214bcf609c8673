use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use topomon::config::MonitorConfig;
use topomon::duration::format_offline_duration;
use topomon::graph::Graph;
use topomon::layout::{LayoutOptions, apply_layout};
use topomon::status::{DeviceStatus, OfflineTracker};

#[derive(Parser, Debug)]
#[command(name = "topomon")]
#[command(about = "Topology layout and offline-duration tools for network monitoring")]
struct Args {
    /// Configuration file (TOML); TOPOMON_* environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Position the nodes of a `{ nodes, edges }` JSON graph
    Layout {
        /// Input graph JSON
        input: PathBuf,
        /// Layout strategy (bus, ring, star, extended-star, hierarchical,
        /// mesh, grid, circular, force-directed)
        #[arg(short, long)]
        strategy: Option<String>,
        /// Layout options as JSON, e.g. '{"radius": 250, "hub": "core"}'
        #[arg(long)]
        options: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Format a number of offline minutes
    Duration {
        #[arg(allow_negative_numbers = true)]
        minutes: Option<f64>,
    },
    /// Replay timestamped status observations for one device and print
    /// the resulting events as JSON lines
    Replay {
        /// JSON array of observations
        input: PathBuf,
        #[arg(long, default_value = "device")]
        name: String,
        #[arg(long)]
        address: Option<String>,
    },
}

/// One recorded check. Either `status` is given directly, or it is derived
/// from `reachable` and `response_time_ms`.
#[derive(Debug, Deserialize)]
struct Observation {
    at: DateTime<Utc>,
    status: Option<DeviceStatus>,
    #[serde(default)]
    reachable: bool,
    response_time_ms: Option<f64>,
    #[serde(default)]
    acknowledge: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = MonitorConfig::load(args.config.as_deref()).context("Failed to load config")?;

    match args.command {
        Command::Layout {
            input,
            strategy,
            options,
            output,
        } => run_layout(&config, input, strategy, options, output),
        Command::Duration { minutes } => {
            println!("{}", format_offline_duration(minutes));
            Ok(())
        }
        Command::Replay {
            input,
            name,
            address,
        } => run_replay(&config, input, name, address),
    }
}

fn run_layout(
    config: &MonitorConfig,
    input: PathBuf,
    strategy: Option<String>,
    options: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let source = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let graph = Graph::from_json(&source)
        .with_context(|| format!("Invalid graph in {}", input.display()))?;

    let strategy = strategy.unwrap_or_else(|| config.layout.strategy.as_str().to_string());
    let options = match options {
        Some(json) => LayoutOptions::from_json(&json).context("Invalid --options JSON")?,
        None => config.layout.options.clone(),
    };

    let Graph { nodes, edges } = graph;
    tracing::info!(
        strategy = %strategy,
        nodes = nodes.len(),
        edges = edges.len(),
        "laying out graph"
    );
    let nodes = apply_layout(nodes, &edges, &strategy, options);
    let rendered = Graph { nodes, edges }.to_json()?;

    match output {
        Some(path) => fs::write(&path, &rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}

fn run_replay(
    config: &MonitorConfig,
    input: PathBuf,
    name: String,
    address: Option<String>,
) -> Result<()> {
    let source = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let mut observations: Vec<Observation> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid observations in {}", input.display()))?;
    observations.sort_by_key(|o| o.at);

    let policy = config.alerts;
    let mut tracker = OfflineTracker::new(name, address);

    for observation in &observations {
        let status = observation.status.unwrap_or_else(|| {
            policy.classify(observation.reachable, observation.response_time_ms)
        });
        for event in tracker.observe(status, observation.at, &policy) {
            println!("{}", serde_json::to_string(&event)?);
        }
        if observation.acknowledge && tracker.acknowledge() {
            tracing::info!(device = %tracker.name, "outage acknowledged");
        }
    }

    if let Some(last) = observations.last() {
        tracing::info!(
            device = %tracker.name,
            status = tracker.status().as_str(),
            downtime = %tracker.downtime(last.at),
            "replay finished"
        );
    }
    Ok(())
}
