//! Subcommand pipelines: read inputs, run one traversal, write the result.
//!
//! Input problems are reported as `ERROR:` / `WARNING:` lines on stdout and
//! end the run normally. Only failures to write the result propagate.

pub mod reach;
pub mod walk;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::Context;
use stream_core::{EdgeRecord, Graph, NodeId};
use tracing::info;

use crate::config::StreamConfig;
use crate::sif;

pub fn error(msg: impl Display) {
    println!("ERROR: {}", msg);
}

pub fn warning(msg: impl Display) {
    println!("WARNING: {}", msg);
}

/// True when `path` ends in `.ext`; reports an error otherwise.
pub fn check_extension(path: &Path, ext: &str) -> bool {
    let ok = path.extension().is_some_and(|e| e == ext);
    if !ok {
        error(format!("{} must have the .{} file extension", path.display(), ext));
    }
    ok
}

/// Read and build the network. Unreadable, malformed or multi-edge input
/// counts as an empty network; `None` means nothing is left to traverse.
pub fn load_network(path: &Path) -> Option<Graph> {
    info!("reading {}", path.display());

    let records = sif::read_network(path).unwrap_or_else(|e| {
        error(e);
        Vec::new()
    });
    let graph = Graph::from_records(records).unwrap_or_else(|e| {
        error(e);
        Graph::new()
    });

    if graph.is_empty() {
        error(format!("{} is empty after reading", path.display()));
        return None;
    }
    Some(graph)
}

/// Read a node list and keep the nodes present in `graph`, deduplicated in
/// file order. Unknown names are reported and dropped.
pub fn load_nodes(path: &Path, graph: &Graph) -> Vec<NodeId> {
    info!("reading {}", path.display());

    let names = sif::read_nodes(path).unwrap_or_else(|e| {
        error(e);
        Vec::new()
    });
    let resolved = graph.resolve_nodes(&names);
    for name in &resolved.unknown {
        warning(format!("{} not in network", name));
    }

    if resolved.nodes.is_empty() {
        error(format!("{} is empty after reading", path.display()));
    }
    resolved.nodes
}

/// Where the result goes: `--output` if given, else `file_name` in the
/// configured output directory, else next to `node_file`.
pub fn output_path(
    explicit: Option<PathBuf>,
    config: &StreamConfig,
    node_file: &Path,
    file_name: String,
) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    match &config.output.directory {
        Some(dir) => dir.join(file_name),
        None => node_file.with_file_name(file_name),
    }
}

pub fn write_output(path: &Path, records: &[EdgeRecord]) -> anyhow::Result<()> {
    info!("writing {}", path.display());
    sif::write_network(path, records)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// File stem of the node file, for naming results.
pub fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stream".to_string())
}
