//! Problem builder and result assembler.
//!
//! Each catalog element becomes one integer variable counting steps above its
//! minimum percentage. Two rows constrain them:
//!
//! - `composition_sum`: `Σ step_i * k_i` lies within the composition band of
//!   `100 - Σ min_i`
//! - `cost_ceiling`: `Σ cost_i * step_i * k_i <= 100 * max_cost - Σ cost_i * min_i`
//!
//! The objective is `Σ alpha_i * step_i * k_i` over every element but the base.
//! Every coefficient is exact, so a step assignment the solver accepts passes
//! the post-solve checks in [`AlloyProblem::assemble`] as well.

use alloyforge_core::{
    Alloy, AlloyForgeError, Composition, Element, ElementCatalog, Result, Tolerances,
};
use alloyforge_solver::IntegerProgram;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Name of the composition band row.
pub const COMPOSITION_ROW: &str = "composition_sum";

/// Name of the cost ceiling row.
pub const COST_ROW: &str = "cost_ceiling";

/// A catalog translated into an [`IntegerProgram`].
///
/// Variables follow catalog order, so the solver's values map back to
/// elements by index.
///
/// # Example
///
/// ```
/// use alloyforge::{AlloyProblem, Element, ElementCatalog, Tolerances};
/// use rust_decimal::Decimal;
///
/// let catalog = ElementCatalog::new(
///     vec![
///         Element::new("Cr", Decimal::from(3), Decimal::from(10), Decimal::ZERO, Decimal::from(20), Decimal::from(5)),
///         Element::new("Ni", Decimal::ZERO, Decimal::from(5), Decimal::from(80), Decimal::ONE_HUNDRED, Decimal::ONE),
///     ],
///     "Ni",
/// )
/// .unwrap();
///
/// let problem = AlloyProblem::build(&catalog, Decimal::from(10), &Tolerances::default()).unwrap();
/// assert_eq!(problem.program().variable_count(), 2);
/// assert_eq!(problem.program().upper_bounds(), vec![4, 20]);
/// assert_eq!(problem.committed_percentage(), Decimal::from(80));
/// ```
#[derive(Debug, Clone)]
pub struct AlloyProblem<'a> {
    catalog: &'a ElementCatalog,
    program: IntegerProgram,
    max_cost: Decimal,
    tolerances: Tolerances,
    committed_percentage: Decimal,
    committed_cost: Decimal,
}

impl<'a> AlloyProblem<'a> {
    /// Builds the integer program for `catalog` under `max_cost`.
    ///
    /// # Errors
    ///
    /// - [`AlloyForgeError::InvalidCostCeiling`] if `max_cost` is negative
    /// - [`AlloyForgeError::InvalidElementSpec`] if a coefficient overflows
    pub fn build(
        catalog: &'a ElementCatalog,
        max_cost: Decimal,
        tolerances: &Tolerances,
    ) -> Result<Self> {
        if max_cost < Decimal::ZERO {
            return Err(AlloyForgeError::InvalidCostCeiling(max_cost));
        }
        let cost_budget = max_cost
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(AlloyForgeError::InvalidCostCeiling(max_cost))?;

        let mut program = IntegerProgram::maximize();
        let mut shares = Vec::with_capacity(catalog.len());
        let mut spends = Vec::with_capacity(catalog.len());
        let mut committed_percentage = Decimal::ZERO;
        let mut committed_cost = Decimal::ZERO;

        for (index, element) in catalog.iter().enumerate() {
            let steps = element.step_count().ok_or_else(|| invalid(element, "has no step grid"))?;

            let remainder = element.unreachable_remainder();
            if !remainder.is_zero() {
                warn!(
                    element = element.name(),
                    max_percentage = %element.max_percentage(),
                    reachable = %element.percentage_at(steps),
                    "Range is not a multiple of the step size, top of range is unreachable"
                );
            }

            let variable = program.add_variable(element.name(), 0, i64::from(steps));
            if !catalog.is_base(index) {
                let gain = product(element, element.alpha(), element.step_size())?;
                program.set_objective_coefficient(variable, gain);
            }
            shares.push(element.step_size());
            spends.push(product(element, element.cost(), element.step_size())?);

            committed_percentage += element.min_percentage();
            committed_cost = committed_cost
                .checked_add(product(element, element.cost(), element.min_percentage())?)
                .ok_or_else(|| invalid(element, "committed cost overflows"))?;
        }

        let remaining = Decimal::ONE_HUNDRED - committed_percentage;
        program.add_constraint(
            COMPOSITION_ROW,
            shares,
            Some(remaining - tolerances.composition_band),
            Some(remaining + tolerances.composition_band),
        );
        program.add_constraint(COST_ROW, spends, None, Some(cost_budget - committed_cost));

        debug!(
            event = "problem_built",
            variables = program.variable_count(),
            committed_percentage = %committed_percentage,
            committed_cost = %committed_cost,
        );

        Ok(Self {
            catalog,
            program,
            max_cost,
            tolerances: *tolerances,
            committed_percentage,
            committed_cost,
        })
    }

    pub fn catalog(&self) -> &ElementCatalog {
        self.catalog
    }

    pub fn program(&self) -> &IntegerProgram {
        &self.program
    }

    pub fn max_cost(&self) -> Decimal {
        self.max_cost
    }

    /// Percentage already fixed by every element's minimum.
    pub fn committed_percentage(&self) -> Decimal {
        self.committed_percentage
    }

    /// `Σ cost_i * min_i`, the cost (times 100) fixed by the minimums.
    pub fn committed_cost(&self) -> Decimal {
        self.committed_cost
    }

    /// Maps a step assignment back to an [`Alloy`] and re-checks it.
    ///
    /// # Errors
    ///
    /// Returns [`AlloyForgeError::InconsistentSolution`] if the assignment does
    /// not match the catalog, leaves an element's range, breaks the composition
    /// band or exceeds the cost ceiling.
    pub fn assemble(&self, steps: &[i64]) -> Result<Alloy> {
        if steps.len() != self.catalog.len() {
            return Err(AlloyForgeError::InconsistentSolution {
                subject: "assignment".to_string(),
                value: Decimal::from(steps.len()),
                reason: format!("does not match {} catalog elements", self.catalog.len()),
            });
        }

        let composition = self
            .catalog
            .iter()
            .zip(steps)
            .map(|(element, &k)| -> Result<(Element, Decimal)> {
                let k = u32::try_from(k).map_err(|_| AlloyForgeError::InconsistentSolution {
                    subject: element.name().to_string(),
                    value: Decimal::from(k),
                    reason: "is not a valid step index".to_string(),
                })?;
                Ok((element.clone(), element.percentage_at(k)))
            })
            .collect::<Result<Composition>>()?;

        let alloy = Alloy::new(composition, self.catalog.base_element().name());
        alloy.check_composition(&self.tolerances)?;
        alloy.check_cost(self.max_cost, &self.tolerances)?;
        Ok(alloy)
    }
}

fn product(element: &Element, a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| invalid(element, format!("{a} * {b} overflows")))
}

fn invalid(element: &Element, reason: impl Into<String>) -> AlloyForgeError {
    AlloyForgeError::InvalidElementSpec {
        element: element.name().to_string(),
        reason: reason.into(),
    }
}
