//! Tests for the branch-and-bound search.

use proptest::prelude::*;

use super::*;
use crate::termination::NodeCountTermination;

/// Stops as soon as any incumbent exists.
#[derive(Debug)]
struct StopAtFirstIncumbent;

impl Termination for StopAtFirstIncumbent {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.best_objective().is_some()
    }
}

fn d(value: i64) -> Decimal {
    Decimal::from(value)
}

fn textbook_program() -> IntegerProgram {
    let mut program = IntegerProgram::maximize();
    let x = program.add_variable("x", 0, 10);
    let y = program.add_variable("y", 0, 10);
    program.set_objective_coefficient(x, d(5));
    program.set_objective_coefficient(y, d(4));
    program.add_constraint("a", vec![d(6), d(4)], None, Some(d(24)));
    program.add_constraint("b", vec![d(1), d(2)], None, Some(d(6)));
    program
}

fn config(exploration_type: ExplorationType, branching_rule: BranchingRule) -> BranchAndBoundConfig {
    BranchAndBoundConfig {
        exploration_type,
        branching_rule,
        ..BranchAndBoundConfig::default()
    }
}

/// Enumerates every integer point within the variable bounds.
fn brute_force(program: &IntegerProgram) -> Option<Decimal> {
    let lower = program.lower_bounds();
    let upper = program.upper_bounds();
    let mut point = lower.clone();
    let mut best: Option<Decimal> = None;
    loop {
        if program.is_feasible(&point) {
            let value = program.evaluate(&point).unwrap();
            let better = match (best, program.sense()) {
                (None, _) => true,
                (Some(b), ObjectiveSense::Maximize) => value > b,
                (Some(b), ObjectiveSense::Minimize) => value < b,
            };
            if better {
                best = Some(value);
            }
        }

        let mut i = 0;
        loop {
            if i == point.len() {
                return best;
            }
            if point[i] < upper[i] {
                point[i] += 1;
                break;
            }
            point[i] = lower[i];
            i += 1;
        }
    }
}

#[test]
fn test_depth_first_finds_optimum() {
    let solution = BranchAndBound::new(BranchAndBoundConfig::default())
        .solve(&textbook_program())
        .unwrap();

    assert_eq!(solution.values, vec![4, 0]);
    assert_eq!(solution.objective, d(20));
    assert!(solution.proven_optimal);
    assert_eq!(solution.statistics.lp_solves, solution.statistics.nodes_explored);
    assert!(solution.statistics.improvements >= 1);
    assert!(solution.statistics.max_depth >= 1);
}

#[test]
fn test_best_bound_first_finds_optimum() {
    let solution = BranchAndBound::new(config(
        ExplorationType::BestBoundFirst,
        BranchingRule::MostFractional,
    ))
    .solve(&textbook_program())
    .unwrap();

    assert_eq!(solution.values, vec![4, 0]);
    assert!(solution.proven_optimal);
}

#[test]
fn test_first_fractional_rule_finds_optimum() {
    let solution = BranchAndBound::new(config(
        ExplorationType::DepthFirst,
        BranchingRule::FirstFractional,
    ))
    .solve(&textbook_program())
    .unwrap();

    assert_eq!(solution.objective, d(20));
}

#[test]
fn test_minimization() {
    let mut program = IntegerProgram::minimize();
    let x = program.add_variable("x", 0, 5);
    let y = program.add_variable("y", 0, 5);
    program.set_objective_coefficient(x, d(2));
    program.set_objective_coefficient(y, d(3));
    program.add_constraint("cover", vec![d(1), d(1)], Some(Decimal::new(35, 1)), None);

    let solution = BranchAndBound::new(BranchAndBoundConfig::default())
        .solve(&program)
        .unwrap();
    assert_eq!(solution.values, vec![4, 0]);
    assert_eq!(solution.objective, d(8));
}

#[test]
fn test_integer_infeasible() {
    let mut program = IntegerProgram::maximize();
    program.add_variable("x", 0, 5);
    program.add_constraint("odd", vec![d(2)], Some(d(3)), Some(d(3)));

    let result = BranchAndBound::new(BranchAndBoundConfig::default()).solve(&program);
    assert_eq!(result, Err(SolveError::Infeasible));
}

#[test]
fn test_relaxation_infeasible() {
    let mut program = IntegerProgram::maximize();
    program.add_variable("x", 0, 5);
    program.add_constraint("too_high", vec![d(1)], Some(d(6)), None);

    let result = BranchAndBound::new(BranchAndBoundConfig::default()).solve(&program);
    assert_eq!(result, Err(SolveError::Infeasible));
}

#[test]
fn test_invalid_program() {
    let mut program = IntegerProgram::maximize();
    program.add_variable("x", 3, 1);

    let result = BranchAndBound::new(BranchAndBoundConfig::default()).solve(&program);
    assert!(matches!(result, Err(SolveError::InvalidProgram(_))));
}

#[test]
fn test_abort_without_incumbent() {
    let result = BranchAndBound::new(BranchAndBoundConfig::default())
        .with_termination(NodeCountTermination::new(0))
        .solve(&textbook_program());

    assert_eq!(result, Err(SolveError::Aborted { nodes_explored: 0 }));
}

#[test]
fn test_early_termination_keeps_incumbent() {
    let solution = BranchAndBound::new(BranchAndBoundConfig::default())
        .with_termination(StopAtFirstIncumbent)
        .solve(&textbook_program())
        .unwrap();

    assert_eq!(solution.values, vec![3, 1]);
    assert_eq!(solution.objective, d(19));
    assert!(!solution.proven_optimal);
}

#[test]
fn test_integral_root_needs_one_node() {
    let mut program = IntegerProgram::maximize();
    let x = program.add_variable("x", 0, 7);
    program.set_objective_coefficient(x, d(1));

    let solution = BranchAndBound::new(BranchAndBoundConfig::default())
        .solve(&program)
        .unwrap();
    assert_eq!(solution.values, vec![7]);
    assert_eq!(solution.statistics.nodes_explored, 1);
}

#[test]
fn test_priority_ordering() {
    let root = BranchNode::root(vec![0], vec![4]);
    let (shallow_down, _) = root.branch(0, 2, d(10));
    let (deep, _) = shallow_down.branch(0, 1, d(8));
    let (_, shallow_up) = root.branch(0, 2, d(12));

    let mut heap = BinaryHeap::new();
    heap.push(PriorityNode::new(1, shallow_down.clone(), ExplorationType::DepthFirst));
    heap.push(PriorityNode::new(2, deep.clone(), ExplorationType::DepthFirst));
    heap.push(PriorityNode::new(3, shallow_up.clone(), ExplorationType::DepthFirst));
    assert_eq!(heap.pop().map(|p| p.sequence), Some(2));
    assert_eq!(heap.pop().map(|p| p.sequence), Some(3));

    let mut heap = BinaryHeap::new();
    heap.push(PriorityNode::new(1, shallow_down, ExplorationType::BestBoundFirst));
    heap.push(PriorityNode::new(2, deep, ExplorationType::BestBoundFirst));
    heap.push(PriorityNode::new(3, shallow_up, ExplorationType::BestBoundFirst));
    assert_eq!(heap.pop().map(|p| p.sequence), Some(3));
    assert_eq!(heap.pop().map(|p| p.sequence), Some(1));
}

#[test]
fn test_incumbent_is_checked_exactly() {
    // The budget sits 1e-11 below the cost of the second unit of y, so only
    // the first unit is affordable.
    let mut program = IntegerProgram::maximize();
    let x = program.add_variable("x", 0, 3);
    let y = program.add_variable("y", 0, 3);
    program.set_objective_coefficient(x, d(1));
    program.set_objective_coefficient(y, d(100));
    program.add_constraint(
        "budget",
        vec![Decimal::new(2, 0), Decimal::new(8972, 3)],
        None,
        Some(Decimal::new(17_943_999_999_99, 11)),
    );

    let solution = BranchAndBound::new(BranchAndBoundConfig::default())
        .solve(&program)
        .unwrap();
    assert!(program.is_feasible(&solution.values));
    assert_eq!(solution.values, vec![3, 1]);
    assert_eq!(solution.objective, d(103));
}

#[test]
fn test_wide_coefficient_range_is_not_pruned_early() {
    // Shares of a common row, with objective coefficients 13 orders of
    // magnitude apart. A relative pruning gap of 1e-9 would discard the
    // subtree holding the optimum.
    let mut program = IntegerProgram::maximize();
    let a = program.add_variable("a", 0, 20);
    let b = program.add_variable("b", 0, 20);
    let c = program.add_variable("c", 0, 20);
    program.set_objective_coefficient(a, d(2_000));
    program.set_objective_coefficient(b, Decimal::from(9_480_000_000_000_000_i64));
    program.set_objective_coefficient(c, d(900));
    program.add_constraint("share", vec![d(1), d(2), d(1)], None, Some(d(21)));

    let solution = BranchAndBound::new(BranchAndBoundConfig::default())
        .solve(&program)
        .unwrap();
    assert_eq!(Some(solution.objective), brute_force(&program));
    assert_eq!(solution.values, vec![1, 10, 0]);
}

#[test]
fn test_positive_gap_trades_proof_for_speed() {
    let mut program = IntegerProgram::maximize();
    let a = program.add_variable("a", 0, 20);
    let b = program.add_variable("b", 0, 20);
    program.set_objective_coefficient(a, d(1));
    program.set_objective_coefficient(b, Decimal::from(1_000_000_000_000_i64));
    program.add_constraint("share", vec![d(1), d(2)], None, Some(d(21)));

    let gap = BranchAndBoundConfig {
        relative_gap: Decimal::new(1, 3),
        ..BranchAndBoundConfig::default()
    };
    let solution = BranchAndBound::new(gap).solve(&program).unwrap();
    let optimum = brute_force(&program).unwrap();
    assert!(solution.objective <= optimum);
    assert!(solution.objective >= optimum - optimum * Decimal::new(1, 3));
}

fn arb_program() -> impl Strategy<Value = IntegerProgram> {
    (1usize..=3)
        .prop_flat_map(|n| {
            (
                any::<bool>(),
                prop::collection::vec(-5i64..=5, n),
                prop::collection::vec((0i64..=2, 0i64..=4), n),
                prop::collection::vec(
                    (prop::collection::vec(-4i64..=4, n), -5i64..=15, any::<bool>()),
                    0..=3,
                ),
            )
        })
        .prop_map(|(maximize, objective, bounds, rows)| {
            let mut program = if maximize {
                IntegerProgram::maximize()
            } else {
                IntegerProgram::minimize()
            };
            for (i, ((lower, width), c)) in bounds.into_iter().zip(objective).enumerate() {
                let v = program.add_variable(format!("x{i}"), lower, lower + width);
                program.set_objective_coefficient(v, d(c));
            }
            for (i, (coefficients, rhs, at_most)) in rows.into_iter().enumerate() {
                let coefficients = coefficients.into_iter().map(d).collect();
                let rhs = d(rhs);
                if at_most {
                    program.add_constraint(format!("c{i}"), coefficients, None, Some(rhs));
                } else {
                    program.add_constraint(format!("c{i}"), coefficients, Some(rhs), None);
                }
            }
            program
        })
}

proptest! {
    #[test]
    fn prop_matches_enumeration(
        program in arb_program(),
        best_bound in any::<bool>(),
        first_fractional in any::<bool>(),
    ) {
        let exploration = if best_bound {
            ExplorationType::BestBoundFirst
        } else {
            ExplorationType::DepthFirst
        };
        let rule = if first_fractional {
            BranchingRule::FirstFractional
        } else {
            BranchingRule::MostFractional
        };
        let result = BranchAndBound::new(config(exploration, rule)).solve(&program);

        match brute_force(&program) {
            Some(expected) => {
                let solution = result.unwrap();
                prop_assert!(program.is_feasible(&solution.values));
                prop_assert_eq!(program.evaluate(&solution.values).unwrap(), solution.objective);
                prop_assert_eq!(solution.objective, expected);
                prop_assert!(solution.proven_optimal);
            }
            None => prop_assert_eq!(result, Err(SolveError::Infeasible)),
        }
    }
}
