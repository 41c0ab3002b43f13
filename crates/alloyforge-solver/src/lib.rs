//! Bounded-integer linear programming for AlloyForge.
//!
//! This crate provides:
//! - [`IntegerProgram`]: integer variables, an exact decimal objective and ranged rows
//! - [`simplex`]: the continuous relaxation solver
//! - [`BranchAndBound`]: exact search over relaxations with pluggable
//!   [`termination`] conditions
//!
//! The search is single-threaded and deterministic: the same program and
//! configuration always explore the same nodes in the same order.

pub mod branch_and_bound;
pub mod error;
pub mod program;
pub mod scope;
pub mod simplex;
pub mod statistics;
pub mod termination;

pub use alloyforge_config::{BranchingRule, ExplorationType};
pub use branch_and_bound::{BranchAndBound, BranchAndBoundConfig, BranchNode, IntegerSolution};
pub use error::SolveError;
pub use program::{IntVariable, IntegerProgram, LinearConstraint, ObjectiveSense};
pub use scope::SearchScope;
pub use simplex::{solve_relaxation, LpOutcome};
pub use statistics::SolveStatistics;
pub use termination::{
    ExternalTermination, NoTermination, NodeCountTermination, OrTermination, Termination,
    TimeTermination,
};
