//! stream-core: upstream/downstream path discovery in directed networks.
//!
//! A pure Rust library that holds a labeled directed graph (no multi-edges)
//! and extracts the part of it reachable from a set of nodes, either by
//! bounded random walks upstream or by an exact breadth-first closure over
//! a precomputed two-hop edge index. Results are flattened into labeled
//! edge records ready to be written back as SIF.
//!
//! No file or terminal I/O happens here; the `stream` binary wraps it.

mod assemble;
mod error;
mod graph;
mod index;
mod propagate;
mod walk;

pub use assemble::{paths_to_edges, to_records};
pub use error::{GraphError, ParseDirectionError};
pub use graph::{Direction, Edge, EdgeId, EdgeRecord, Graph, LabelId, NodeId, ResolvedNodes};
pub use index::TwoHopIndex;
pub use propagate::{propagate, Closure};
pub use walk::{random_walk, sample_all, sample_paths, Path};
