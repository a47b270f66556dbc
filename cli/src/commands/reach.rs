use std::path::PathBuf;

use stream_core::{propagate, to_records, Direction, TwoHopIndex};
use tracing::debug;

use super::{check_extension, error, load_network, load_nodes, output_path, stem, warning};
use crate::config::StreamConfig;

pub struct ReachArgs {
    pub network_file: PathBuf,
    pub root_file: PathBuf,
    pub direction: String,
    pub output: Option<PathBuf>,
}

/// Exact mode: the full up- or down-stream edge closure of the roots,
/// written to `<rootFile stem>-<direction>.sif`.
pub fn run(args: ReachArgs, config: &StreamConfig) -> anyhow::Result<()> {
    if !check_extension(&args.network_file, "sif") || !check_extension(&args.root_file, "txt") {
        return Ok(());
    }
    let direction: Direction = match args.direction.parse() {
        Ok(d) => d,
        Err(e) => {
            error(e);
            return Ok(());
        }
    };

    let Some(graph) = load_network(&args.network_file) else {
        return Ok(());
    };
    let roots = load_nodes(&args.root_file, &graph);
    if roots.is_empty() {
        return Ok(());
    }

    let index = TwoHopIndex::build(&graph, direction);
    debug!(bytes = index.memory_usage(), "index ready");

    let closure = propagate(&graph, &index, &roots);
    if closure.is_empty() {
        warning("no paths found");
        return Ok(());
    }

    let out = output_path(
        args.output,
        config,
        &args.root_file,
        format!("{}-{}.sif", stem(&args.root_file), direction),
    );
    super::write_output(&out, &to_records(&graph, &closure.edges))
}
