use thiserror::Error;

/// Failure to build a [`Graph`](crate::Graph) from edge records.
///
/// Any error means no graph was produced: a single bad record invalidates
/// the whole network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two records share the same ordered (source, target) pair.
    #[error("contains multi-edges: {from} -> {to} repeated at record {record}")]
    MultiEdge {
        from: String,
        to: String,
        /// 1-based position of the offending record.
        record: usize,
    },
}

/// A traversal direction string other than `up` or `down`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid direction '{0}': use 'up' or 'down'")]
pub struct ParseDirectionError(pub String);
