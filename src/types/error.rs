use thiserror::Error;

use crate::types::NodeLabel;

/// Errors surfaced by the query layer.
///
/// "No feasible flow" is deliberately not in here: a zero or insufficient
/// flow is a value callers branch on, not an error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown node {0}")]
    UnknownNode(NodeLabel),
    #[error("source and sink are the same node ({0})")]
    SameSourceAndSink(NodeLabel),
    // Not named `source`: thiserror reserves that field name for the
    // std::error::Error::source() value.
    #[error("no path from {start} to {sink}")]
    PathNotFound { start: NodeLabel, sink: NodeLabel },
    #[error("schedule subgraph contains a cycle")]
    MalformedSchedule,
}

#[cfg(test)]
mod test {
    use std::error::Error;

    use super::QueryError;

    #[test]
    fn query_errors_are_plain_std_errors() {
        let unreachable = QueryError::PathNotFound { start: 1, sink: 3 };
        assert_eq!(unreachable.to_string(), "no path from 1 to 3");
        // Node labels are data, not a wrapped cause.
        assert!(unreachable.source().is_none());
        assert_eq!(
            QueryError::SameSourceAndSink(2).to_string(),
            "source and sink are the same node (2)"
        );
        assert_eq!(QueryError::UnknownNode(9).to_string(), "unknown node 9");
    }
}
