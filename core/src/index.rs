use tracing::debug;

use crate::graph::{Direction, EdgeId, Graph};

/// Edge-to-edge adjacency one hop further in a fixed direction.
///
/// For `Down`, edge (a→b) maps to every edge (b→c): the successors of its
/// target. For `Up`, edge (a→b) maps to every edge (c→a): the predecessors
/// of its source. Entries keep the graph's input order.
///
/// Built once per run and read-only afterwards; the propagator advances
/// through it one edge-hop at a time.
#[derive(Debug, Clone)]
pub struct TwoHopIndex {
    direction: Direction,
    next: Vec<Vec<EdgeId>>,
}

impl TwoHopIndex {
    pub fn build(graph: &Graph, direction: Direction) -> Self {
        let next: Vec<Vec<EdgeId>> = graph
            .edges()
            .map(|(_, edge)| {
                let pivot = match direction {
                    Direction::Down => edge.target,
                    Direction::Up => edge.source,
                };
                graph.adjacent(pivot, direction).to_vec()
            })
            .collect();

        let index = Self { direction, next };
        debug!(
            %direction,
            edges = index.next.len(),
            entries = index.entry_count(),
            "two-hop index built"
        );
        index
    }

    /// Successor index: edge (a→b) to edges (b→c).
    pub fn successors(graph: &Graph) -> Self {
        Self::build(graph, Direction::Down)
    }

    /// Predecessor index: edge (a→b) to edges (c→a).
    pub fn predecessors(graph: &Graph) -> Self {
        Self::build(graph, Direction::Up)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Edges one hop beyond `edge`. Empty for ids outside the indexed graph.
    pub fn next(&self, edge: EdgeId) -> &[EdgeId] {
        self.next
            .get(edge as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of indexed edges.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Total number of (edge, next edge) pairs stored.
    pub fn entry_count(&self) -> usize {
        self.next.iter().map(|v| v.len()).sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        self.next.len() * size_of::<Vec<EdgeId>>() + self.entry_count() * size_of::<EdgeId>()
    }
}
