use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{GraphError, ParseDirectionError};

/// Dense internal node index, assigned in first-seen input order.
pub type NodeId = u32;

/// Dense internal edge index, assigned in input order.
pub type EdgeId = u32;

/// Interned edge label index (avoids storing duplicate strings per edge).
pub type LabelId = u32;

/// One (source, label, target) triple as read from or written to a SIF file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeRecord {
    pub source: String,
    pub label: String,
    pub target: String,
}

impl EdgeRecord {
    pub fn new(
        source: impl Into<String>,
        label: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            label: label.into(),
            target: target.into(),
        }
    }
}

/// A stored directed edge. Orientation is always the one from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub label: LabelId,
}

/// Traversal direction: `Up` follows edges backward (toward predecessors),
/// `Down` follows them forward (toward successors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Outcome of resolving external node names against a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedNodes {
    /// Known nodes, deduplicated, in first-occurrence order.
    pub nodes: Vec<NodeId>,
    /// Names absent from the graph, in input order.
    pub unknown: Vec<String>,
}

/// In-memory directed graph: interned node names, edge table, adjacency
/// lists in both directions and interned labels.
///
/// Built once with [`Graph::from_records`] and immutable afterwards.
/// `outgoing[a]` holds the ids of edges leaving a, `incoming[b]` the ids of
/// edges entering b, both in input order. At most one edge exists per
/// ordered (source, target) pair.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    names: Vec<String>,
    name_index: HashMap<String, NodeId>,
    edges: Vec<Edge>,
    pair_index: HashMap<(NodeId, NodeId), EdgeId>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    labels: Vec<String>,
    label_index: HashMap<String, LabelId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            names: Vec::with_capacity(node_count),
            name_index: HashMap::with_capacity(node_count),
            edges: Vec::with_capacity(edge_count),
            pair_index: HashMap::with_capacity(edge_count),
            outgoing: Vec::with_capacity(node_count),
            incoming: Vec::with_capacity(node_count),
            labels: Vec::new(),
            label_index: HashMap::new(),
        }
    }

    /// Build a graph from edge records in input order.
    ///
    /// The graph is assembled in a local value and only returned once every
    /// record has been accepted. A repeated (source, target) pair aborts the
    /// build with [`GraphError::MultiEdge`]; nothing partial escapes.
    pub fn from_records<I>(records: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let records = records.into_iter();
        let (lower, _) = records.size_hint();
        let mut graph = Graph::with_capacity(lower, lower);

        for (i, record) in records.enumerate() {
            let from = graph.intern_node(&record.source);
            let to = graph.intern_node(&record.target);
            if graph.pair_index.contains_key(&(from, to)) {
                return Err(GraphError::MultiEdge {
                    from: record.source,
                    to: record.target,
                    record: i + 1,
                });
            }
            let label = graph.intern_label(&record.label);
            graph.insert_edge(from, to, label);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            labels = graph.labels.len(),
            "graph built"
        );
        Ok(graph)
    }

    fn intern_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.name_index.get(name) {
            return id;
        }
        let id = self.names.len() as NodeId;
        self.names.push(name.to_string());
        self.name_index.insert(name.to_string(), id);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    fn intern_label(&mut self, label: &str) -> LabelId {
        if let Some(&id) = self.label_index.get(label) {
            return id;
        }
        let id = self.labels.len() as LabelId;
        self.labels.push(label.to_string());
        self.label_index.insert(label.to_string(), id);
        id
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId, label: LabelId) -> EdgeId {
        let id = self.edges.len() as EdgeId;
        self.edges.push(Edge { source, target, label });
        self.pair_index.insert((source, target), id);
        self.outgoing[source as usize].push(id);
        self.incoming[target as usize].push(id);
        id
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Look up a node by its external identifier.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// External identifier of a node. Panics on an id not issued by this graph.
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.names[id as usize]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (i as NodeId, name.as_str()))
    }

    pub fn edge(&self, id: EdgeId) -> Edge {
        self.edges[id as usize]
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, &e)| (i as EdgeId, e))
    }

    /// The edge stored for the ordered pair (source, target), if any.
    pub fn edge_between(&self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        self.pair_index.get(&(source, target)).copied()
    }

    /// Label of an edge, as it appeared in the input.
    pub fn label(&self, id: EdgeId) -> &str {
        &self.labels[self.edge(id).label as usize]
    }

    /// Resolve an interned label id back to its string.
    pub fn label_name(&self, id: LabelId) -> Option<&str> {
        self.labels.get(id as usize).map(|s| s.as_str())
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Ids of edges leaving `node`, in input order.
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        self.outgoing
            .get(node as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Ids of edges entering `node`, in input order.
    pub fn incoming(&self, node: NodeId) -> &[EdgeId] {
        self.incoming
            .get(node as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Edges touching `node` in the given traversal direction: incoming for
    /// `Up`, outgoing for `Down`.
    pub fn adjacent(&self, node: NodeId, direction: Direction) -> &[EdgeId] {
        match direction {
            Direction::Up => self.incoming(node),
            Direction::Down => self.outgoing(node),
        }
    }

    /// Nodes with an edge into `node`, in input order.
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incoming(node).iter().map(|&e| self.edges[e as usize].source)
    }

    /// Nodes `node` has an edge to, in input order.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing(node).iter().map(|&e| self.edges[e as usize].target)
    }

    pub fn has_predecessors(&self, node: NodeId) -> bool {
        !self.incoming(node).is_empty()
    }

    /// Map external names to node ids, dropping duplicates and collecting
    /// names the graph does not contain.
    pub fn resolve_nodes<S: AsRef<str>>(&self, names: &[S]) -> ResolvedNodes {
        let mut resolved = ResolvedNodes::default();
        let mut seen = vec![false; self.node_count()];
        for name in names {
            let name = name.as_ref();
            match self.node_id(name) {
                Some(id) => {
                    if !seen[id as usize] {
                        seen[id as usize] = true;
                        resolved.nodes.push(id);
                    }
                }
                None => resolved.unknown.push(name.to_string()),
            }
        }
        resolved
    }

    /// The same graph with every edge flipped. Node ids, edge ids and labels
    /// are preserved, so edge `e` here is edge `e` of `self` reversed.
    pub fn reversed(&self) -> Graph {
        Graph {
            names: self.names.clone(),
            name_index: self.name_index.clone(),
            edges: self
                .edges
                .iter()
                .map(|e| Edge {
                    source: e.target,
                    target: e.source,
                    label: e.label,
                })
                .collect(),
            pair_index: self
                .pair_index
                .iter()
                .map(|(&(a, b), &id)| ((b, a), id))
                .collect(),
            outgoing: self.incoming.clone(),
            incoming: self.outgoing.clone(),
            labels: self.labels.clone(),
            label_index: self.label_index.clone(),
        }
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let names: usize = self.names.iter().map(|n| 2 * n.len() + 40).sum();
        let edges = self.edges.len() * (size_of::<Edge>() + 3 * size_of::<EdgeId>() + 16);
        let adjacency = 2 * self.names.len() * size_of::<Vec<EdgeId>>();
        let labels: usize = self.labels.iter().map(|l| 2 * l.len() + 40).sum();

        names + edges + adjacency + labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(source: &str, label: &str, target: &str) -> EdgeRecord {
        EdgeRecord::new(source, label, target)
    }

    fn signaling() -> Graph {
        Graph::from_records(vec![
            rec("A", "act", "B"),
            rec("B", "act", "C"),
            rec("B", "inh", "D"),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_counts() {
        let g = signaling();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.label_count(), 2);
        assert!(!g.is_empty());
    }

    #[test]
    fn test_node_ids_in_first_seen_order() {
        let g = signaling();
        let names: Vec<&str> = g.nodes().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
        assert_eq!(g.node_id("C"), Some(2));
        assert_eq!(g.node_name(3), "D");
        assert_eq!(g.node_id("Z"), None);
    }

    #[test]
    fn test_adjacency_in_input_order() {
        let g = signaling();
        let b = g.node_id("B").unwrap();
        let succ: Vec<&str> = g.successors(b).map(|n| g.node_name(n)).collect();
        assert_eq!(succ, vec!["C", "D"]);
        let pred: Vec<&str> = g.predecessors(b).map(|n| g.node_name(n)).collect();
        assert_eq!(pred, vec!["A"]);
        assert!(!g.has_predecessors(g.node_id("A").unwrap()));
    }

    #[test]
    fn test_labels_preserved() {
        let g = signaling();
        let b = g.node_id("B").unwrap();
        let d = g.node_id("D").unwrap();
        let e = g.edge_between(b, d).unwrap();
        assert_eq!(g.label(e), "inh");
        assert!(g.edge_between(d, b).is_none());
    }

    #[test]
    fn test_multi_edge_rejected() {
        let err = Graph::from_records(vec![
            rec("A", "act", "B"),
            rec("B", "act", "C"),
            rec("A", "inh", "B"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::MultiEdge {
                from: "A".into(),
                to: "B".into(),
                record: 3,
            }
        );
        assert!(err.to_string().contains("multi-edges"));
    }

    #[test]
    fn test_opposite_pairs_are_not_multi_edges() {
        let g = Graph::from_records(vec![rec("A", "act", "B"), rec("B", "act", "A")]).unwrap();
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_self_loop_allowed_once() {
        let g = Graph::from_records(vec![rec("A", "act", "A")]).unwrap();
        assert_eq!(g.node_count(), 1);
        let a = g.node_id("A").unwrap();
        assert_eq!(g.predecessors(a).collect::<Vec<_>>(), vec![a]);

        let err = Graph::from_records(vec![rec("A", "act", "A"), rec("A", "inh", "A")]);
        assert!(err.is_err());
    }

    #[test]
    fn test_empty_input() {
        let g = Graph::from_records(Vec::new()).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert!(g.outgoing(0).is_empty());
    }

    #[test]
    fn test_resolve_nodes_dedup_and_unknown() {
        let g = signaling();
        let r = g.resolve_nodes(&["D", "X", "A", "D", "Y"]);
        assert_eq!(r.nodes, vec![3, 0]);
        assert_eq!(r.unknown, vec!["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn test_reversed_flips_every_edge() {
        let g = signaling();
        let r = g.reversed();
        assert_eq!(r.edge_count(), g.edge_count());
        for (id, e) in g.edges() {
            let f = r.edge(id);
            assert_eq!((f.source, f.target), (e.target, e.source));
            assert_eq!(r.label(id), g.label(id));
            assert_eq!(r.edge_between(e.target, e.source), Some(id));
        }
        let b = g.node_id("B").unwrap();
        assert_eq!(r.outgoing(b), g.incoming(b));
    }

    #[test]
    fn test_adjacent_by_direction() {
        let g = signaling();
        let b = g.node_id("B").unwrap();
        assert_eq!(g.adjacent(b, Direction::Down), g.outgoing(b));
        assert_eq!(g.adjacent(b, Direction::Up), g.incoming(b));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("DOWN".parse::<Direction>(), Ok(Direction::Down));
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Up.reverse(), Direction::Down);
    }

    #[test]
    fn test_memory_usage_nonzero() {
        assert!(signaling().memory_usage() > 0);
    }
}
