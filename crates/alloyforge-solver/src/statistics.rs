//! Branch-and-bound statistics.

use std::fmt;
use std::time::Duration;

/// Counters collected during a branch-and-bound run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveStatistics {
    /// Nodes popped from the frontier and solved.
    pub nodes_explored: u64,
    /// Nodes discarded because their bound could not beat the incumbent.
    pub nodes_pruned: u64,
    /// Nodes whose relaxation had no feasible point.
    pub infeasible_nodes: u64,
    /// Number of relaxations solved.
    pub lp_solves: u64,
    /// Number of times the incumbent improved.
    pub improvements: u64,
    /// Deepest node explored.
    pub max_depth: usize,
    /// Wall-clock time spent searching.
    pub duration: Duration,
}

impl SolveStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of generated nodes that were pruned by bound.
    pub fn pruning_rate(&self) -> f64 {
        let total = self.nodes_explored + self.nodes_pruned;
        if total == 0 {
            0.0
        } else {
            self.nodes_pruned as f64 / total as f64
        }
    }

    /// Returns explored nodes per second.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.nodes_explored as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for SolveStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes explored ({} pruned, {} infeasible), {} LP solves, {} improvements, depth {} in {:?}",
            self.nodes_explored,
            self.nodes_pruned,
            self.infeasible_nodes,
            self.lp_solves,
            self.improvements,
            self.max_depth,
            self.duration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pruning_rate() {
        let stats = SolveStatistics {
            nodes_explored: 6,
            nodes_pruned: 2,
            ..SolveStatistics::default()
        };
        assert!((stats.pruning_rate() - 0.25).abs() < 1e-12);
        assert_eq!(SolveStatistics::new().pruning_rate(), 0.0);
    }

    #[test]
    fn test_nodes_per_second() {
        let stats = SolveStatistics {
            nodes_explored: 50,
            duration: Duration::from_millis(500),
            ..SolveStatistics::default()
        };
        assert!((stats.nodes_per_second() - 100.0).abs() < 1e-9);
        assert_eq!(SolveStatistics::new().nodes_per_second(), 0.0);
    }

    #[test]
    fn test_display() {
        let stats = SolveStatistics {
            nodes_explored: 3,
            lp_solves: 3,
            improvements: 1,
            ..SolveStatistics::default()
        };
        assert!(stats.to_string().starts_with("3 nodes explored (0 pruned, 0 infeasible), 3 LP solves"));
    }
}
