//! Waypath CLI - shortest paths on small weighted graphs, with an animated reveal.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::*;
use config::WaypathConfig;
use output::OutputFormat;

/// Find the cheapest route between two nodes and watch it unfold.
#[derive(Parser)]
#[command(name = "waypath")]
#[command(author, version)]
#[command(about = "Shortest paths on weighted graphs, with an animated reveal")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  waypath graph                       List the nodes and edges
  waypath path afrodite hermes        Shortest path and its distance
  waypath animate afrodite hermes     Play back the path over time
  waypath randomize --seed 42         Draw new edge weights")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Graph file (JSON with `nodes` and `edges`); defaults to the built-in sample graph
    #[arg(short, long, global = true, env = "WAYPATH_GRAPH")]
    graph: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the shortest path between two nodes
    #[command(visible_alias = "p")]
    Path {
        /// Origin node id
        from: String,

        /// Destination node id
        to: String,
    },

    /// Compute the shortest path and play back its reveal
    #[command(visible_alias = "a")]
    Animate {
        /// Origin node id
        from: String,

        /// Destination node id
        to: String,

        /// Reveal duration in milliseconds (overrides config)
        #[arg(short, long)]
        duration_ms: Option<u64>,

        /// Frames sampled per second (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
        fps: Option<u32>,

        /// Step a simulated clock instead of waiting in real time
        #[arg(long)]
        instant: bool,
    },

    /// List nodes and edges
    #[command(visible_alias = "g")]
    Graph,

    /// Redraw every edge weight from the configured range
    Randomize {
        /// Seed for reproducible weights (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the new graph as JSON to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = WaypathConfig::load(Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    colored::control::set_override(config.use_color().unwrap_or_else(output::is_tty));

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    let graph = load_graph(cli.graph.as_deref())?;
    let settings = config.session_settings();

    match command {
        Commands::Path { from, to } => path::run(graph, &from, &to, format).await,
        Commands::Animate {
            from,
            to,
            duration_ms,
            fps,
            instant,
        } => {
            let options = animate::AnimateOptions {
                duration_ms: duration_ms.unwrap_or(config.animation.duration_ms),
                fps: fps.unwrap_or(config.animation.fps),
                instant,
            };
            animate::run(graph, &from, &to, settings, options, format).await
        }
        Commands::Graph => graph::run(&graph, format).await,
        Commands::Randomize { seed, output } => {
            let seed = seed.or(config.weights.seed);
            randomize::run(graph, settings, seed, output.as_deref(), format).await
        }
    }
}
