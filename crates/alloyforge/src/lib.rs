//! AlloyForge - optimal alloy compositions by integer programming.
//!
//! Given a catalog of candidate elements (creep-resistance coefficient, unit
//! cost, allowed percentage range and step size), a base element that fills
//! the remainder, and a cost ceiling, AlloyForge finds the composition with the
//! highest creep resistance.
//!
//! # Example
//!
//! ```
//! use alloyforge::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let elements = vec![
//!     Element::new("Mo", Decimal::from(9), Decimal::from(16), Decimal::ZERO, Decimal::from(6), Decimal::new(5, 1)),
//!     Element::new("Ni", Decimal::ZERO, Decimal::new(89, 1), Decimal::ZERO, Decimal::ONE_HUNDRED, Decimal::ONE),
//! ];
//!
//! let alloy = find_optimal_alloy(&elements, "Ni", Decimal::from(10)).unwrap();
//! assert_eq!(alloy.percentage_of("Mo"), Some(Decimal::from(6)));
//! assert!(alloy.calculate_cost() <= Decimal::from(10));
//! ```

#[cfg(feature = "console")]
pub mod console;
mod optimizer;
mod problem;

pub use optimizer::{find_optimal_alloy, AlloyOptimizer, OptimizedAlloy};
pub use problem::{AlloyProblem, COMPOSITION_ROW, COST_ROW};

pub use alloyforge_config::{
    BranchingRule, ConfigError, ExplorationType, OptimizerConfig, SearchConfig,
    TerminationConfig, ToleranceConfig,
};
pub use alloyforge_core::{
    validate_catalog, Alloy, AlloyForgeError, Composition, Element, ElementCatalog, Result,
    Decimal, Tolerances,
};
pub use alloyforge_solver::SolveStatistics;

/// Integer programming engine used by the optimizer.
pub mod solver {
    pub use alloyforge_solver::*;
}

pub mod prelude {
    pub use super::{find_optimal_alloy, AlloyOptimizer, OptimizedAlloy};
    pub use super::{Alloy, AlloyForgeError, Composition, Element, ElementCatalog, Tolerances};
    pub use super::{ExplorationType, OptimizerConfig};
}
