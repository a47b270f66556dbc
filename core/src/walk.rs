use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::graph::{Graph, NodeId};

/// Node sequence recorded by an upstream walk, starting at the source.
/// Consecutive entries (n[i], n[i+1]) mean n[i+1] is a predecessor of n[i].
pub type Path = Vec<NodeId>;

/// One random walk upstream from `source`.
///
/// Returns an empty path when `source` has no predecessors. Otherwise each
/// step moves to a uniformly chosen predecessor of the current node and
/// appends it. The walk stops after appending a node that has no
/// predecessors or that already occurs in the path, or once `max_step`
/// steps were taken; in every case the accumulated path is returned, so a
/// path holds at most `max_step + 1` nodes.
pub fn random_walk<R>(graph: &Graph, source: NodeId, max_step: usize, rng: &mut R) -> Path
where
    R: Rng + ?Sized,
{
    if !graph.has_predecessors(source) {
        return Vec::new();
    }

    let mut path = Vec::with_capacity(max_step.min(graph.node_count()) + 1);
    path.push(source);
    let mut current = source;

    for _ in 0..max_step {
        let Some(&edge) = graph.incoming(current).choose(rng) else {
            break;
        };
        let next = graph.edge(edge).source;
        let closed = !graph.has_predecessors(next) || path.contains(&next);
        path.push(next);
        if closed {
            break;
        }
        current = next;
    }

    trace!(source, len = path.len(), "walk finished");
    path
}

/// Up to `max_walk` random walks from `source`, keeping the non-empty,
/// mutually distinct paths in the order they were first found.
///
/// Empty or repeated walks are dropped without retry, so more walks only
/// raise the odds of covering every upstream path within `max_step` hops.
pub fn sample_paths<R>(
    graph: &Graph,
    source: NodeId,
    max_step: usize,
    max_walk: usize,
    rng: &mut R,
) -> Vec<Path>
where
    R: Rng + ?Sized,
{
    let mut seen: HashSet<Path> = HashSet::new();
    let mut paths = Vec::new();

    for _ in 0..max_walk {
        let path = random_walk(graph, source, max_step, rng);
        if !path.is_empty() && seen.insert(path.clone()) {
            paths.push(path);
        }
    }

    debug!(source, walks = max_walk, distinct = paths.len(), "sampling finished");
    paths
}

/// [`sample_paths`] for every source in order, merged into one
/// deduplicated collection.
pub fn sample_all<R>(
    graph: &Graph,
    sources: &[NodeId],
    max_step: usize,
    max_walk: usize,
    rng: &mut R,
) -> Vec<Path>
where
    R: Rng + ?Sized,
{
    let mut seen: HashSet<Path> = HashSet::new();
    let mut all = Vec::new();

    for (i, &source) in sources.iter().enumerate() {
        if source as usize >= graph.node_count() {
            debug!(source, "skipping source outside the graph");
            continue;
        }
        info!("streaming {} ({}/{})", graph.node_name(source), i + 1, sources.len());

        for path in sample_paths(graph, source, max_step, max_walk, rng) {
            if seen.insert(path.clone()) {
                all.push(path);
            }
        }
    }

    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn graph(edges: &[(&str, &str)]) -> Graph {
        Graph::from_records(edges.iter().map(|&(a, b)| EdgeRecord::new(a, "act", b))).unwrap()
    }

    fn names<'g>(g: &'g Graph, path: &[NodeId]) -> Vec<&'g str> {
        path.iter().map(|&n| g.node_name(n)).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_walk_without_predecessors_is_empty() {
        let g = graph(&[("A", "B")]);
        let a = g.node_id("A").unwrap();
        assert!(random_walk(&g, a, 10, &mut rng()).is_empty());
    }

    #[test]
    fn test_walk_stops_at_upstream_root() {
        let g = graph(&[("A", "B"), ("B", "C")]);
        let c = g.node_id("C").unwrap();
        let path = random_walk(&g, c, 10, &mut rng());
        assert_eq!(names(&g, &path), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_walk_budget_exhausted_keeps_prefix() {
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let d = g.node_id("D").unwrap();
        let path = random_walk(&g, d, 1, &mut rng());
        assert_eq!(names(&g, &path), vec!["D", "C"]);
    }

    #[test]
    fn test_walk_zero_steps() {
        let g = graph(&[("A", "B")]);
        let b = g.node_id("B").unwrap();
        assert_eq!(random_walk(&g, b, 0, &mut rng()), vec![b]);
    }

    #[test]
    fn test_walk_closes_cycle() {
        let g = graph(&[("A", "B"), ("B", "A")]);
        let a = g.node_id("A").unwrap();
        let path = random_walk(&g, a, 100, &mut rng());
        assert_eq!(names(&g, &path), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_walk_self_loop() {
        let g = graph(&[("A", "A")]);
        let a = g.node_id("A").unwrap();
        assert_eq!(random_walk(&g, a, 5, &mut rng()), vec![a, a]);
    }

    #[test]
    fn test_walk_length_bounded() {
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "A"), ("D", "A"), ("C", "D")]);
        let mut r = rng();
        for max_step in 1..6 {
            for _ in 0..50 {
                let path = random_walk(&g, 0, max_step, &mut r);
                assert!(path.len() <= max_step + 1);
                // only the last node may repeat an earlier one
                let body = &path[..path.len() - 1];
                let unique: HashSet<_> = body.iter().collect();
                assert_eq!(unique.len(), body.len());
            }
        }
    }

    #[test]
    fn test_sample_finds_both_branches() {
        let g = graph(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        let d = g.node_id("D").unwrap();
        let paths = sample_paths(&g, d, 5, 200, &mut rng());
        let mut found: Vec<Vec<&str>> = paths.iter().map(|p| names(&g, p)).collect();
        found.sort();
        assert_eq!(found, vec![vec!["D", "B", "A"], vec!["D", "C", "A"]]);
    }

    #[test]
    fn test_sample_no_duplicates() {
        let g = graph(&[("A", "B"), ("B", "C")]);
        let c = g.node_id("C").unwrap();
        let paths = sample_paths(&g, c, 5, 50, &mut rng());
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_sample_source_without_predecessors() {
        let g = graph(&[("A", "B")]);
        let a = g.node_id("A").unwrap();
        assert!(sample_paths(&g, a, 5, 50, &mut rng()).is_empty());
    }

    #[test]
    fn test_sample_all_merges_sources() {
        let g = graph(&[("A", "B"), ("B", "C")]);
        let b = g.node_id("B").unwrap();
        let c = g.node_id("C").unwrap();
        let paths = sample_all(&g, &[c, b, c], 5, 20, &mut rng());
        let found: Vec<Vec<&str>> = paths.iter().map(|p| names(&g, p)).collect();
        assert_eq!(found, vec![vec!["C", "B", "A"], vec!["B", "A"]]);
    }
}
