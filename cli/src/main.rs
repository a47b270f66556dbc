//! stream: extract the up/down-stream paths of nodes from a SIF network.
//!
//! Two modes over the same input conventions: `walk` samples upstream
//! paths with bounded random walks, `reach` computes the exact closure in
//! one direction. Both write the discovered edges as a SIF subnetwork.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod sif;
mod texts;

use commands::{reach::ReachArgs, walk::WalkArgs};
use config::StreamConfig;

/// Network traversal from source nodes along the up- or down-stream.
///
/// Networks are SIF files (source, label, target separated by tabs) without
/// multi-edges; node files list one node per line.
#[derive(Parser)]
#[command(name = "stream")]
#[command(author, version)]
#[command(about = "Extract up/down-stream paths of nodes from a SIF network")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  stream walk network.sif sources.txt 10 1000   Sample upstream paths (writes sources.sif)
  stream reach network.sif roots.txt up         Exact upstream closure (writes roots-up.sif)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress progress logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (defaults to ./stream.toml when present)
    #[arg(long, global = true, env = "STREAM_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample upstream paths of source nodes with bounded random walks
    Walk {
        /// Network encoded in a .sif file
        network_file: PathBuf,

        /// Source nodes, one per line, in a .txt file
        source_file: PathBuf,

        /// Maximum number of steps per random walk (>0)
        #[arg(allow_negative_numbers = true)]
        max_step: i64,

        /// Maximum number of random walks per source node (>0)
        #[arg(allow_negative_numbers = true)]
        max_walk: i64,

        /// Seed for the random generator (overrides the config file)
        #[arg(long, env = "STREAM_SEED")]
        seed: Option<u64>,

        /// Result file (default: <sourceFile stem>.sif)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract the exact up- or down-stream closure of root nodes
    Reach {
        /// Network encoded in a .sif file
        network_file: PathBuf,

        /// Root nodes, one per line, in a .txt file
        root_file: PathBuf,

        /// Traversal direction: up or down
        direction: String,

        /// Result file (default: <rootFile stem>-<direction>.sif)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print usage lines
    Usage,

    /// Print the license
    License,
}

fn setup_logging(verbose: bool, quiet: bool, configured: Option<&str>) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured.unwrap_or("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match StreamConfig::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (StreamConfig::default(), Some(e)),
    };

    setup_logging(cli.verbose, cli.quiet, config.log.filter.as_deref());

    if let Some(e) = config_error {
        commands::warning(format!("{}, using defaults", e));
    }

    match cli.command {
        Commands::Walk {
            network_file,
            source_file,
            max_step,
            max_walk,
            seed,
            output,
        } => commands::walk::run(
            WalkArgs {
                network_file,
                source_file,
                max_step,
                max_walk,
                seed,
                output,
            },
            &config,
        ),
        Commands::Reach {
            network_file,
            root_file,
            direction,
            output,
        } => commands::reach::run(
            ReachArgs {
                network_file,
                root_file,
                direction,
                output,
            },
            &config,
        ),
        Commands::Usage => {
            println!("{}", texts::USAGE);
            Ok(())
        }
        Commands::License => {
            println!("{}", texts::LICENSE);
            Ok(())
        }
    }
}
