use thiserror::Error;

use crate::NodeId;

/// A structural property of the tree that was found not to hold.
///
/// Returned by [`RbTree::check_invariants`](crate::RbTree::check_invariants). A tree built only
/// through the public API never produces one of these.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root {0} is red")]
    RedRoot(NodeId),

    #[error("root {0} has a parent link")]
    RootHasParent(NodeId),

    #[error("red node {parent} has red child {child}")]
    RedRed { parent: NodeId, child: NodeId },

    #[error("paths below {node} disagree on black-height ({left} on the left, {right} on the right)")]
    BlackHeight {
        node: NodeId,
        left: usize,
        right: usize,
    },

    #[error("{child} is a child of {parent} but its parent link is {actual:?}")]
    ParentLink {
        parent: NodeId,
        child: NodeId,
        actual: Option<NodeId>,
    },

    #[error("{node} is out of order with respect to ancestor {ancestor}")]
    Order { node: NodeId, ancestor: NodeId },

    #[error("tree records {expected} nodes but {reachable} are reachable from the root")]
    Count { expected: usize, reachable: usize },
}
