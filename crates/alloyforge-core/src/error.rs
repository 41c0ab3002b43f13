//! Error types for AlloyForge

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for AlloyForge operations
#[derive(Debug, Error)]
pub enum AlloyForgeError {
    /// An element has a malformed range, step or coefficient
    #[error("Invalid element specification for '{element}': {reason}")]
    InvalidElementSpec { element: String, reason: String },

    /// The base element name matches no catalog entry
    #[error("Unknown base element: '{0}'")]
    UnknownBaseElement(String),

    /// The cost ceiling is negative
    #[error("Invalid cost ceiling: {0} (must be >= 0)")]
    InvalidCostCeiling(Decimal),

    /// No composition satisfies both the percentage band and the cost ceiling
    #[error("No solution exists for these constraints")]
    Infeasible,

    /// The relaxed problem has an unbounded direction (modeling defect)
    #[error("Optimization problem is unbounded")]
    Unbounded,

    /// Search stopped by a termination condition before any feasible composition was found
    #[error("Search aborted after {nodes_explored} nodes without a feasible composition")]
    SearchAborted { nodes_explored: u64 },

    /// A solved composition violates a post-solve invariant (should not occur)
    #[error("Inconsistent solution for {subject}: {value} {reason}")]
    InconsistentSolution {
        subject: String,
        value: Decimal,
        reason: String,
    },

    /// Numerical failure inside the LP relaxation
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// The generated integer program is malformed (modeling defect)
    #[error("Invalid optimization program: {0}")]
    InvalidProgram(String),

    /// Error in optimizer configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AlloyForgeError {
    /// Returns true for errors caused by caller input rather than by the solve itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AlloyForgeError::InvalidElementSpec { .. }
                | AlloyForgeError::UnknownBaseElement(_)
                | AlloyForgeError::InvalidCostCeiling(_)
                | AlloyForgeError::Config(_)
        )
    }

    /// Returns true for internal-consistency faults that indicate a defect.
    pub fn is_internal_fault(&self) -> bool {
        matches!(
            self,
            AlloyForgeError::InconsistentSolution { .. }
                | AlloyForgeError::Unbounded
                | AlloyForgeError::Numerical(_)
                | AlloyForgeError::InvalidProgram(_)
        )
    }

    pub(crate) fn invalid_element(element: &str, reason: impl Into<String>) -> Self {
        AlloyForgeError::InvalidElementSpec {
            element: element.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for AlloyForge operations
pub type Result<T> = std::result::Result<T, AlloyForgeError>;
