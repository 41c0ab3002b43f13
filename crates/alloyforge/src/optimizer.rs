//! Alloy optimizer: catalog in, optimal alloy out.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use alloyforge_config::OptimizerConfig;
use alloyforge_core::{Alloy, AlloyForgeError, Element, ElementCatalog, Result};
use alloyforge_solver::{
    BranchAndBound, BranchAndBoundConfig, ExternalTermination, NodeCountTermination,
    OrTermination, SolveStatistics, TimeTermination,
};
use rust_decimal::Decimal;
use tracing::info;

use crate::problem::AlloyProblem;

/// An optimal (or best found) alloy with search diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedAlloy {
    alloy: Alloy,
    statistics: SolveStatistics,
    proven_optimal: bool,
}

impl OptimizedAlloy {
    pub fn alloy(&self) -> &Alloy {
        &self.alloy
    }

    pub fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }

    /// False when a termination limit stopped the search before it could
    /// prove that no better composition exists.
    pub fn is_proven_optimal(&self) -> bool {
        self.proven_optimal
    }

    pub fn into_alloy(self) -> Alloy {
        self.alloy
    }
}

impl fmt::Display for OptimizedAlloy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.alloy, f)
    }
}

/// Finds the alloy composition with the highest creep resistance under a
/// cost ceiling.
///
/// # Example
///
/// ```
/// use alloyforge::{AlloyOptimizer, Element, OptimizerConfig};
/// use rust_decimal::Decimal;
///
/// let elements = vec![
///     Element::new("Cr", Decimal::from(3), Decimal::from(10), Decimal::ZERO, Decimal::from(20), Decimal::from(5)),
///     Element::new("Ni", Decimal::ZERO, Decimal::from(5), Decimal::from(80), Decimal::ONE_HUNDRED, Decimal::ONE),
/// ];
///
/// let optimizer = AlloyOptimizer::new(elements, "Ni")
///     .unwrap()
///     .with_config(OptimizerConfig::new().with_node_limit(1_000));
/// let result = optimizer.solve(Decimal::new(55, 1)).unwrap();
///
/// // 10% Cr costs 1.0, 90% Ni costs 4.5
/// assert_eq!(result.alloy().percentage_of("Cr"), Some(Decimal::from(10)));
/// assert!(result.is_proven_optimal());
/// ```
#[derive(Debug, Clone)]
pub struct AlloyOptimizer {
    catalog: ElementCatalog,
    config: OptimizerConfig,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl AlloyOptimizer {
    /// Validates `elements` and designates `base_element` as the filler.
    ///
    /// # Errors
    ///
    /// Returns [`AlloyForgeError::InvalidElementSpec`] or
    /// [`AlloyForgeError::UnknownBaseElement`] from catalog validation.
    pub fn new(elements: Vec<Element>, base_element: &str) -> Result<Self> {
        Ok(Self::from_catalog(ElementCatalog::new(elements, base_element)?))
    }

    pub fn from_catalog(catalog: ElementCatalog) -> Self {
        Self {
            catalog,
            config: OptimizerConfig::default(),
            terminate_flag: None,
        }
    }

    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Lets another thread stop the search by setting `flag`.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_flag = Some(flag);
        self
    }

    pub fn catalog(&self) -> &ElementCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Solves for the best alloy whose cost does not exceed `max_cost`.
    ///
    /// # Errors
    ///
    /// - [`AlloyForgeError::InvalidCostCeiling`] if `max_cost` is negative
    /// - [`AlloyForgeError::Config`] if the configuration is out of range
    /// - [`AlloyForgeError::Infeasible`] if no composition satisfies both constraints
    /// - [`AlloyForgeError::SearchAborted`] if a limit fired before any composition was found
    /// - [`AlloyForgeError::InconsistentSolution`] if the result fails its re-check
    pub fn solve(&self, max_cost: Decimal) -> Result<OptimizedAlloy> {
        self.config
            .validate()
            .map_err(|e| AlloyForgeError::Config(e.to_string()))?;

        info!(
            event = "solve_start",
            element_count = self.catalog.len(),
            base_element = self.catalog.base_element().name(),
            max_cost = %max_cost,
        );

        let tolerances = self.config.tolerances();
        let problem = AlloyProblem::build(&self.catalog, max_cost, &tolerances)?;

        let termination = OrTermination((
            self.config
                .termination
                .node_limit
                .map(NodeCountTermination::new),
            self.config.time_limit().map(TimeTermination::new),
            self.terminate_flag.clone().map(ExternalTermination::new),
        ));
        let search = BranchAndBound::new(BranchAndBoundConfig::from(&self.config.search))
            .with_termination(termination);

        let solution = match search.solve(problem.program()) {
            Ok(solution) => solution,
            Err(e) => {
                info!(event = "solve_end", outcome = %e);
                return Err(e.into());
            }
        };
        let alloy = problem.assemble(&solution.values)?;

        info!(
            event = "solve_end",
            creep_resistance = %alloy.calculate_creep_resistance(),
            cost = %alloy.calculate_cost().round_dp(4),
            nodes = solution.statistics.nodes_explored,
            proven_optimal = solution.proven_optimal,
        );

        Ok(OptimizedAlloy {
            alloy,
            statistics: solution.statistics,
            proven_optimal: solution.proven_optimal,
        })
    }
}

/// Finds the alloy with the highest creep resistance whose cost does not
/// exceed `max_cost`, using the default configuration.
///
/// # Example
///
/// ```
/// use alloyforge::{find_optimal_alloy, Element};
/// use rust_decimal::Decimal;
///
/// let ni = Element::fixed("Ni", Decimal::ZERO, Decimal::new(89, 1), Decimal::ONE_HUNDRED);
/// let alloy = find_optimal_alloy(&[ni], "Ni", Decimal::from(9)).unwrap();
///
/// assert_eq!(alloy.calculate_creep_resistance(), Decimal::ZERO);
/// assert_eq!(alloy.calculate_cost(), Decimal::new(89, 1));
/// ```
pub fn find_optimal_alloy(
    elements: &[Element],
    base_element: &str,
    max_cost: Decimal,
) -> Result<Alloy> {
    AlloyOptimizer::new(elements.to_vec(), base_element)?
        .solve(max_cost)
        .map(OptimizedAlloy::into_alloy)
}
