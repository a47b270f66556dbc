use tracing::debug;

use crate::graph::{EdgeId, EdgeRecord, Graph};
use crate::walk::Path;

/// Flatten sampled upstream paths into a deduplicated edge list.
///
/// A path `[n0, n1, ..., nk]` was walked against edge direction, so each
/// step (n[i], n[i+1]) is the stored edge n[i+1]→n[i]. Edges keep the order
/// in which they first appear across the paths.
pub fn paths_to_edges(graph: &Graph, paths: &[Path]) -> Vec<EdgeId> {
    let mut emitted = vec![false; graph.edge_count()];
    let mut edges = Vec::new();

    for path in paths {
        for step in path.windows(2) {
            let (to, from) = (step[0], step[1]);
            let Some(id) = graph.edge_between(from, to) else {
                debug!(from, to, "path step without a stored edge");
                continue;
            };
            if !emitted[id as usize] {
                emitted[id as usize] = true;
                edges.push(id);
            }
        }
    }

    edges
}

/// Attach endpoint names and labels to edge ids, in stored orientation.
///
/// The order of `edges` is kept; no further deduplication happens here.
pub fn to_records(graph: &Graph, edges: &[EdgeId]) -> Vec<EdgeRecord> {
    edges
        .iter()
        .map(|&id| {
            let edge = graph.edge(id);
            EdgeRecord::new(
                graph.node_name(edge.source),
                graph.label(id),
                graph.node_name(edge.target),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signaling() -> Graph {
        Graph::from_records(vec![
            EdgeRecord::new("A", "act", "B"),
            EdgeRecord::new("B", "act", "C"),
            EdgeRecord::new("B", "inh", "D"),
        ])
        .unwrap()
    }

    fn path(g: &Graph, names: &[&str]) -> Path {
        names.iter().map(|n| g.node_id(n).unwrap()).collect()
    }

    #[test]
    fn test_path_reversed_into_stored_edges() {
        let g = signaling();
        let edges = paths_to_edges(&g, &[path(&g, &["D", "B", "A"])]);
        assert_eq!(
            to_records(&g, &edges),
            vec![
                EdgeRecord::new("B", "inh", "D"),
                EdgeRecord::new("A", "act", "B"),
            ]
        );
    }

    #[test]
    fn test_path_of_length_k_gives_k_minus_one_edges() {
        let g = signaling();
        assert_eq!(paths_to_edges(&g, &[path(&g, &["C", "B", "A"])]).len(), 2);
        assert_eq!(paths_to_edges(&g, &[path(&g, &["C", "B"])]).len(), 1);
        assert!(paths_to_edges(&g, &[path(&g, &["C"])]).is_empty());
    }

    #[test]
    fn test_shared_edges_emitted_once() {
        let g = signaling();
        let edges = paths_to_edges(
            &g,
            &[path(&g, &["C", "B", "A"]), path(&g, &["D", "B", "A"])],
        );
        let records = to_records(&g, &edges);
        assert_eq!(
            records,
            vec![
                EdgeRecord::new("B", "act", "C"),
                EdgeRecord::new("A", "act", "B"),
                EdgeRecord::new("B", "inh", "D"),
            ]
        );
    }

    #[test]
    fn test_cycle_closing_step_included() {
        let g = Graph::from_records(vec![
            EdgeRecord::new("A", "act", "B"),
            EdgeRecord::new("B", "inh", "A"),
        ])
        .unwrap();
        let edges = paths_to_edges(&g, &[path(&g, &["A", "B", "A"])]);
        assert_eq!(
            to_records(&g, &edges),
            vec![
                EdgeRecord::new("B", "inh", "A"),
                EdgeRecord::new("A", "act", "B"),
            ]
        );
    }

    #[test]
    fn test_unknown_step_skipped() {
        let g = signaling();
        let c = g.node_id("C").unwrap();
        let d = g.node_id("D").unwrap();
        assert!(paths_to_edges(&g, &[vec![c, d]]).is_empty());
    }

    #[test]
    fn test_records_keep_given_order() {
        let g = signaling();
        let records = to_records(&g, &[2, 0]);
        assert_eq!(records[0], EdgeRecord::new("B", "inh", "D"));
        assert_eq!(records[1], EdgeRecord::new("A", "act", "B"));
    }
}
