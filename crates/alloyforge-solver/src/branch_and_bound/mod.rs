//! Branch-and-bound over linear relaxations.
//!
//! Each node solves the relaxation of the program under its own bounds. Nodes
//! whose relaxation is integral yield candidate points, which are checked
//! exactly against the program before they become incumbents; otherwise the
//! node is split on a fractional variable. Nodes whose bound cannot beat the
//! incumbent are pruned.
//!
//! # Exploration Types
//!
//! - **Depth First**: Explores deepest nodes first (finds incumbents early)
//! - **Best Bound First**: Explores the most promising bound first

mod node;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use alloyforge_config::{BranchingRule, ExplorationType, SearchConfig};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info, trace, warn};

use crate::error::SolveError;
use crate::program::{IntegerProgram, ObjectiveSense};
use crate::scope::SearchScope;
use crate::simplex::{solve_relaxation, LpOutcome};
use crate::statistics::SolveStatistics;
use crate::termination::{NoTermination, Termination};

pub use node::BranchNode;

/// Relaxed objectives are trusted to this fraction of the largest objective
/// coefficient. Bounds within it of the incumbent are ties.
const ROUNDING_MARGIN: Decimal = Decimal::from_parts(1, 0, 0, false, 20);

/// Configuration for the branch-and-bound search.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchAndBoundConfig {
    /// The exploration type to use.
    pub exploration_type: ExplorationType,
    /// How the branching variable is chosen.
    pub branching_rule: BranchingRule,
    /// Distance from an integer below which a value counts as integral.
    pub integrality_tolerance: Decimal,
    /// Relative gap used when pruning against the incumbent. Zero keeps the
    /// optimality proof.
    pub relative_gap: Decimal,
}

impl Default for BranchAndBoundConfig {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for BranchAndBoundConfig {
    fn from(config: &SearchConfig) -> Self {
        Self {
            exploration_type: config.exploration_type,
            branching_rule: config.branching_rule,
            integrality_tolerance: config.integrality_tolerance,
            relative_gap: config.relative_gap,
        }
    }
}

/// Best integer point found by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerSolution {
    /// Value of every variable, in program order.
    pub values: Vec<i64>,
    /// Exact objective at `values`, in the program's own sense.
    pub objective: Decimal,
    /// False if a termination fired while open nodes could still improve.
    pub proven_optimal: bool,
    pub statistics: SolveStatistics,
}

/// A node wrapper for priority queue ordering.
struct PriorityNode {
    sequence: u64,
    node: BranchNode,
    exploration_type: ExplorationType,
}

impl PriorityNode {
    fn new(sequence: u64, node: BranchNode, exploration_type: ExplorationType) -> Self {
        Self {
            sequence,
            node,
            exploration_type,
        }
    }

    fn cmp_bound(&self, other: &Self) -> Ordering {
        match (self.node.bound(), other.node.bound()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl Eq for PriorityNode {}

impl PartialEq for PriorityNode {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Ord for PriorityNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties go to the earlier node, so the down branch is explored first.
        let earlier = other.sequence.cmp(&self.sequence);
        match self.exploration_type {
            ExplorationType::DepthFirst => self
                .node
                .depth()
                .cmp(&other.node.depth())
                .then_with(|| self.cmp_bound(other))
                .then(earlier),
            ExplorationType::BestBoundFirst => self
                .cmp_bound(other)
                .then_with(|| self.node.depth().cmp(&other.node.depth()))
                .then(earlier),
        }
    }
}

impl PartialOrd for PriorityNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Branch-and-bound solver for an [`IntegerProgram`].
///
/// # Example
///
/// ```
/// use alloyforge_solver::{BranchAndBound, BranchAndBoundConfig, IntegerProgram};
/// use alloyforge_solver::termination::NodeCountTermination;
/// use rust_decimal::Decimal;
///
/// let d = Decimal::from;
/// let mut program = IntegerProgram::maximize();
/// let x = program.add_variable("x", 0, 10);
/// let y = program.add_variable("y", 0, 10);
/// program.set_objective_coefficient(x, d(5));
/// program.set_objective_coefficient(y, d(4));
/// program.add_constraint("a", vec![d(6), d(4)], None, Some(d(24)));
/// program.add_constraint("b", vec![d(1), d(2)], None, Some(d(6)));
///
/// let solution = BranchAndBound::new(BranchAndBoundConfig::default())
///     .with_termination(NodeCountTermination::new(1_000))
///     .solve(&program)
///     .unwrap();
///
/// assert_eq!(solution.values, vec![4, 0]);
/// assert_eq!(solution.objective, d(20));
/// assert!(solution.proven_optimal);
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBound<T = NoTermination> {
    config: BranchAndBoundConfig,
    termination: T,
}

impl BranchAndBound<NoTermination> {
    /// Creates a search that runs until the tree is exhausted.
    pub fn new(config: BranchAndBoundConfig) -> Self {
        Self {
            config,
            termination: NoTermination,
        }
    }
}

impl<T> BranchAndBound<T> {
    /// Sets the termination condition.
    pub fn with_termination<T2: Termination>(self, termination: T2) -> BranchAndBound<T2> {
        BranchAndBound {
            config: self.config,
            termination,
        }
    }

    pub fn config(&self) -> &BranchAndBoundConfig {
        &self.config
    }
}

impl<T: Termination> BranchAndBound<T> {
    /// Finds an integer point maximizing (or minimizing) the objective.
    ///
    /// Every incumbent satisfies the program exactly, and with a zero
    /// `relative_gap` a proven result has no strictly better feasible point.
    ///
    /// # Errors
    ///
    /// - [`SolveError::Infeasible`] if the tree was exhausted without a feasible point
    /// - [`SolveError::Aborted`] if the termination fired before any feasible point
    /// - [`SolveError::InvalidProgram`] / [`SolveError::Numerical`] on malformed
    ///   input or simplex failure
    pub fn solve(&self, program: &IntegerProgram) -> Result<IntegerSolution, SolveError> {
        program.validate()?;

        let orientation = match program.sense() {
            ObjectiveSense::Maximize => Decimal::ONE,
            ObjectiveSense::Minimize => Decimal::NEGATIVE_ONE,
        };
        let exploration_type = self.config.exploration_type;
        let rounding = program
            .objective()
            .iter()
            .map(Decimal::abs)
            .max()
            .unwrap_or(Decimal::ZERO)
            * ROUNDING_MARGIN;

        info!(
            event = "phase_start",
            phase = "Branch and Bound",
            variables = program.variable_count(),
            constraints = program.constraints().len(),
        );

        let mut scope = SearchScope::new();
        let mut statistics = SolveStatistics::new();
        let mut incumbent: Option<(Vec<i64>, Decimal)> = None;
        let mut terminated = false;

        let mut sequence: u64 = 0;
        let mut frontier = BinaryHeap::new();
        frontier.push(PriorityNode::new(
            sequence,
            BranchNode::root(program.lower_bounds(), program.upper_bounds()),
            exploration_type,
        ));

        while let Some(PriorityNode { node, .. }) = frontier.pop() {
            scope.set_open_nodes(frontier.len());

            if let Some((_, best)) = &incumbent {
                if node.can_prune(self.prune_threshold(*best, rounding)) {
                    statistics.nodes_pruned += 1;
                    continue;
                }
            }

            if self.termination.is_terminated(&scope) {
                terminated = true;
                break;
            }

            scope.increment_nodes_explored();
            statistics.nodes_explored += 1;
            statistics.max_depth = statistics.max_depth.max(node.depth());
            statistics.lp_solves += 1;

            let (values, objective) =
                match solve_relaxation(program, node.lower(), node.upper())? {
                    LpOutcome::Optimal { values, objective } => (values, objective),
                    LpOutcome::Infeasible => {
                        statistics.infeasible_nodes += 1;
                        trace!(event = "node", depth = node.depth(), outcome = "infeasible");
                        continue;
                    }
                    LpOutcome::Unbounded => return Err(SolveError::Unbounded),
                };
            let relaxed = orientation * objective;

            trace!(
                event = "node",
                depth = node.depth(),
                bound = %relaxed,
                open_nodes = frontier.len(),
            );

            if let Some((_, best)) = &incumbent {
                if relaxed <= self.prune_threshold(*best, rounding) {
                    statistics.nodes_pruned += 1;
                    continue;
                }
            }

            let children = match self.branching_variable(&values) {
                Some(variable) => {
                    let floor = to_integer(values[variable].floor())?;
                    let (down, up) = node.branch(variable, floor, relaxed);
                    vec![down, up]
                }
                None => {
                    let point = values
                        .iter()
                        .map(|v| to_integer(v.round()))
                        .collect::<Result<Vec<i64>, _>>()?;
                    if !program.is_feasible(&point) {
                        // The relaxation is only near-integral here. The rest
                        // of the box may still hold feasible points.
                        trace!(event = "node", depth = node.depth(), outcome = "rounding_infeasible");
                        node.exclude(&point, relaxed)
                    } else {
                        let value = orientation * program.evaluate(&point)?;
                        if incumbent.as_ref().map_or(true, |(_, best)| value > *best) {
                            statistics.improvements += 1;
                            scope.set_best_objective(value);
                            debug!(
                                event = "incumbent",
                                objective = %(orientation * value),
                                nodes_explored = statistics.nodes_explored,
                                depth = node.depth(),
                            );
                            incumbent = Some((point.clone(), value));
                        }
                        if relaxed > value.saturating_add(rounding) {
                            node.exclude(&point, relaxed)
                        } else {
                            Vec::new()
                        }
                    }
                }
            };
            for child in children {
                sequence += 1;
                frontier.push(PriorityNode::new(sequence, child, exploration_type));
            }
            scope.set_open_nodes(frontier.len());
        }

        statistics.duration = scope.elapsed();

        info!(
            event = "phase_end",
            phase = "Branch and Bound",
            duration_ms = statistics.duration.as_millis() as u64,
            nodes = statistics.nodes_explored,
            pruned = statistics.nodes_pruned,
            improvements = statistics.improvements,
        );

        match incumbent {
            Some((values, value)) => {
                if terminated {
                    warn!(
                        nodes_explored = statistics.nodes_explored,
                        open_nodes = frontier.len() + 1,
                        "Search terminated early, returning best solution found without optimality proof"
                    );
                }
                Ok(IntegerSolution {
                    values,
                    objective: orientation * value,
                    proven_optimal: !terminated,
                    statistics,
                })
            }
            None if terminated => Err(SolveError::Aborted {
                nodes_explored: statistics.nodes_explored,
            }),
            None => Err(SolveError::Infeasible),
        }
    }

    /// Largest bound that cannot beat `best`.
    fn prune_threshold(&self, best: Decimal, rounding: Decimal) -> Decimal {
        let gap = self.config.relative_gap.saturating_mul(best.abs()).max(rounding);
        best.saturating_add(gap)
    }

    /// Picks the variable to branch on, or `None` if `values` is integral.
    fn branching_variable(&self, values: &[Decimal]) -> Option<usize> {
        let tolerance = self.config.integrality_tolerance;
        let fractionality = |v: Decimal| {
            let f = v - v.floor();
            f.min(Decimal::ONE - f)
        };

        match self.config.branching_rule {
            BranchingRule::FirstFractional => {
                values.iter().position(|&v| fractionality(v) > tolerance)
            }
            BranchingRule::MostFractional => {
                let mut best: Option<(usize, Decimal)> = None;
                for (i, &v) in values.iter().enumerate() {
                    let distance = fractionality(v);
                    if distance > tolerance && best.map_or(true, |(_, d)| distance > d) {
                        best = Some((i, distance));
                    }
                }
                best.map(|(i, _)| i)
            }
        }
    }
}

fn to_integer(value: Decimal) -> Result<i64, SolveError> {
    value.to_i64().ok_or_else(|| {
        SolveError::Numerical(format!("relaxed value {value} is out of integer range"))
    })
}

#[cfg(test)]
mod tests;
