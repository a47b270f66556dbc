use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use stream_core::{paths_to_edges, sample_all, to_records};
use tracing::debug;

use super::{check_extension, error, load_network, load_nodes, output_path, stem, warning};
use crate::config::StreamConfig;

pub struct WalkArgs {
    pub network_file: PathBuf,
    pub source_file: PathBuf,
    pub max_step: i64,
    pub max_walk: i64,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
}

/// Random-walk mode: sample upstream paths of every source and write the
/// edges they use to `<sourceFile stem>.sif`.
pub fn run(args: WalkArgs, config: &StreamConfig) -> anyhow::Result<()> {
    if !check_extension(&args.network_file, "sif") || !check_extension(&args.source_file, "txt") {
        return Ok(());
    }
    if args.max_step < 1 {
        error("maxStep must be 1 or more");
        return Ok(());
    }
    if args.max_walk < 1 {
        error("maxWalk must be 1 or more");
        return Ok(());
    }

    let Some(graph) = load_network(&args.network_file) else {
        return Ok(());
    };
    let sources = load_nodes(&args.source_file, &graph);
    if sources.is_empty() {
        return Ok(());
    }

    let mut rng = match args.seed.or(config.walk.seed) {
        Some(seed) => {
            debug!(seed, "seeded generator");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let paths = sample_all(
        &graph,
        &sources,
        args.max_step as usize,
        args.max_walk as usize,
        &mut rng,
    );
    let edges = paths_to_edges(&graph, &paths);
    if edges.is_empty() {
        warning("no paths found");
        return Ok(());
    }

    let out = output_path(
        args.output,
        config,
        &args.source_file,
        format!("{}.sif", stem(&args.source_file)),
    );
    super::write_output(&out, &to_records(&graph, &edges))
}
