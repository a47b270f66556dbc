use std::collections::VecDeque;

use tracing::{debug, info};

use crate::graph::{EdgeId, Graph, NodeId};
use crate::index::TwoHopIndex;

/// Exact closure of edges reachable from a root set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Closure {
    /// Reached edges, deduplicated, in discovery order.
    pub edges: Vec<EdgeId>,
    /// Edges first reached from each root, parallel to the root slice.
    pub new_per_root: Vec<usize>,
}

impl Closure {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Breadth-first closure over the two-hop index, in the index's direction.
///
/// Each root seeds the queue with the edges touching it (outgoing for
/// `Down`, incoming for `Up`); every queued edge then enqueues the edges one
/// hop beyond it that have not been reached yet. An edge enters the queue at
/// most once, so cycles terminate and the result is the full fixed point,
/// without any step limit. Roots are processed in order and edges reached
/// from an earlier root are never expanded again.
pub fn propagate(graph: &Graph, index: &TwoHopIndex, roots: &[NodeId]) -> Closure {
    debug_assert_eq!(index.len(), graph.edge_count(), "index built for another graph");

    let direction = index.direction();
    let mut reached = vec![false; graph.edge_count()];
    let mut closure = Closure {
        edges: Vec::new(),
        new_per_root: Vec::with_capacity(roots.len()),
    };
    let mut queue: VecDeque<EdgeId> = VecDeque::new();

    for (i, &root) in roots.iter().enumerate() {
        if root as usize >= graph.node_count() {
            debug!(root, "skipping root outside the graph");
            closure.new_per_root.push(0);
            continue;
        }
        info!("streaming {} ({}/{})", graph.node_name(root), i + 1, roots.len());

        let before = closure.edges.len();
        for &seed in graph.adjacent(root, direction) {
            if !reached[seed as usize] {
                reached[seed as usize] = true;
                closure.edges.push(seed);
                queue.push_back(seed);
            }
        }

        while let Some(edge) = queue.pop_front() {
            for &next in index.next(edge) {
                if !reached[next as usize] {
                    reached[next as usize] = true;
                    closure.edges.push(next);
                    queue.push_back(next);
                }
            }
        }

        closure.new_per_root.push(closure.edges.len() - before);
    }

    debug!(%direction, roots = roots.len(), edges = closure.edges.len(), "closure complete");
    closure
}
