//! Error types for the integer programming engine

use alloyforge_core::AlloyForgeError;
use thiserror::Error;

/// Reasons a program could not be solved to a feasible integer point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// No integer point satisfies every constraint.
    #[error("Program is infeasible")]
    Infeasible,

    /// The relaxation has an unbounded improving direction.
    #[error("Program is unbounded")]
    Unbounded,

    /// A termination condition fired before any feasible point was found.
    #[error("Search aborted after {nodes_explored} nodes")]
    Aborted { nodes_explored: u64 },

    /// The simplex method failed to converge or a value left the decimal range.
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// The program itself is malformed.
    #[error("Invalid program: {0}")]
    InvalidProgram(String),
}

impl From<SolveError> for AlloyForgeError {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::Infeasible => AlloyForgeError::Infeasible,
            SolveError::Unbounded => AlloyForgeError::Unbounded,
            SolveError::Aborted { nodes_explored } => {
                AlloyForgeError::SearchAborted { nodes_explored }
            }
            SolveError::Numerical(msg) => AlloyForgeError::Numerical(msg),
            SolveError::InvalidProgram(msg) => AlloyForgeError::InvalidProgram(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_alloyforge_error() {
        assert!(matches!(
            AlloyForgeError::from(SolveError::Infeasible),
            AlloyForgeError::Infeasible
        ));
        assert!(matches!(
            AlloyForgeError::from(SolveError::Aborted { nodes_explored: 7 }),
            AlloyForgeError::SearchAborted { nodes_explored: 7 }
        ));
        assert!(AlloyForgeError::from(SolveError::Unbounded).is_internal_fault());
    }

    #[test]
    fn test_invalid_program_keeps_its_kind() {
        let err = AlloyForgeError::from(SolveError::InvalidProgram(
            "variable 'x' has lower bound 3 above upper bound 1".to_string(),
        ));
        assert!(matches!(err, AlloyForgeError::InvalidProgram(_)));
        assert!(err.is_internal_fault());
        assert!(!err.is_input_error());
        assert_eq!(
            err.to_string(),
            "Invalid optimization program: variable 'x' has lower bound 3 above upper bound 1"
        );

        let err = AlloyForgeError::from(SolveError::Numerical("simplex stalled".to_string()));
        assert_eq!(err.to_string(), "Numerical error: simplex stalled");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SolveError::Aborted { nodes_explored: 3 }.to_string(),
            "Search aborted after 3 nodes"
        );
    }
}
