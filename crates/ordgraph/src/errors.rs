//! Error types returned by [`Graph`](crate::Graph) operations.
//!
//! All of these are contract violations: the caller referred to a node which is not in the graph.
//! Normal "already present" or "not found" outcomes are reported with `bool` return values
//! instead.
use std::fmt;
use thiserror::Error;

/// Operation which was attempted on a node that does not exist.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NodeOperation {
    /// [`Graph::is_connected`](crate::Graph::is_connected)
    IsConnected,
    /// [`Graph::get_connected`](crate::Graph::get_connected)
    GetConnected,
    /// [`Graph::get_weights`](crate::Graph::get_weights)
    GetWeights,
    /// [`Graph::replace`](crate::Graph::replace)
    Replace,
}

impl fmt::Display for NodeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IsConnected => {
                "Cannot call Graph::is_connected if src or dst node don't exist in the graph"
            }
            Self::GetConnected => {
                "Cannot call Graph::get_connected if src doesn't exist in the graph"
            }
            Self::GetWeights => {
                "Cannot call Graph::get_weights if src or dst node don't exist in the graph"
            }
            Self::Replace => "Cannot call Graph::replace on a node that doesn't exist",
        })
    }
}

/// Error returned when an operation requires nodes that are not present in the graph.
///
/// A failing operation never modifies the graph.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum GraphError {
    /// [`Graph::insert_edge`](crate::Graph::insert_edge) was called with a source or destination
    /// which is not a node.
    #[error("Cannot call Graph::insert_edge when either src or dst node does not exist")]
    MissingEndpoint,
    /// A query or a rename was called with a node that does not exist.
    #[error("{operation}")]
    MissingNode {
        /// The operation that was attempted.
        operation: NodeOperation,
    },
    /// [`Graph::merge_replace`](crate::Graph::merge_replace) was called with an operand which is
    /// not a node.
    #[error("Cannot call Graph::merge_replace on old or new data if they don't exist in the graph")]
    MissingOperand,
}

impl GraphError {
    pub(crate) const fn missing_node(operation: NodeOperation) -> Self {
        Self::MissingNode { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        GraphError::MissingEndpoint,
        "Cannot call Graph::insert_edge when either src or dst node does not exist"
    )]
    #[case(
        GraphError::missing_node(NodeOperation::GetConnected),
        "Cannot call Graph::get_connected if src doesn't exist in the graph"
    )]
    #[case(
        GraphError::missing_node(NodeOperation::Replace),
        "Cannot call Graph::replace on a node that doesn't exist"
    )]
    #[case(
        GraphError::MissingOperand,
        "Cannot call Graph::merge_replace on old or new data if they don't exist in the graph"
    )]
    fn test_error_messages(#[case] error: GraphError, #[case] expected: &str) {
        assert_eq!(expected, error.to_string());
    }
}
