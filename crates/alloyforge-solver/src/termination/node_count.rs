//! Node count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a number of explored nodes.
///
/// # Example
///
/// ```
/// use alloyforge_solver::termination::NodeCountTermination;
///
/// // Terminate after 10 000 nodes
/// let term = NodeCountTermination::new(10_000);
/// ```
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.nodes_explored() >= self.limit
    }
}
