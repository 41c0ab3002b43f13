//! Termination conditions for the branch-and-bound search.
//!
//! A termination stops the search early. If an incumbent exists at that
//! point it is returned without an optimality proof.

mod composite;
mod external;
mod node_count;
mod time;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

/// Marker type indicating no termination.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        false
    }
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        match self {
            Some(t) => t.is_terminated(scope),
            None => false,
        }
    }
}
