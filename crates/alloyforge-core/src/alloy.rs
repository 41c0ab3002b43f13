//! Alloy results and their derived metrics.

use std::fmt;

use rust_decimal::Decimal;

use crate::composition::Composition;
use crate::error::{AlloyForgeError, Result};
use crate::tolerance::Tolerances;

/// A composition together with the name of its base element.
///
/// Creep resistance and cost are derived on demand and never stored.
///
/// # Example
///
/// ```
/// use alloyforge_core::{Alloy, Composition, Element};
/// use rust_decimal::Decimal;
///
/// let ni = Element::fixed("Ni", Decimal::ZERO, Decimal::new(89, 1), Decimal::ONE_HUNDRED);
/// let alloy = Alloy::new(Composition::new(vec![(ni, Decimal::ONE_HUNDRED)]), "Ni");
///
/// assert_eq!(alloy.calculate_creep_resistance(), Decimal::ZERO);
/// assert_eq!(alloy.calculate_cost(), Decimal::new(89, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alloy {
    composition: Composition,
    base_element: String,
}

impl Alloy {
    pub fn new(composition: Composition, base_element: impl Into<String>) -> Self {
        Self {
            composition,
            base_element: base_element.into(),
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn base_element(&self) -> &str {
        &self.base_element
    }

    pub fn percentage_of(&self, name: &str) -> Option<Decimal> {
        self.composition.percentage_of(name)
    }

    /// Sum of all percentages, base included.
    pub fn total_percentage(&self) -> Decimal {
        self.composition.total()
    }

    /// Sum of `alpha * percentage` over every element except the base.
    pub fn calculate_creep_resistance(&self) -> Decimal {
        self.composition
            .iter()
            .filter(|(e, _)| e.name() != self.base_element)
            .map(|(e, p)| e.alpha() * p)
            .sum()
    }

    /// Sum of `cost * percentage / 100` over every element, base included.
    pub fn calculate_cost(&self) -> Decimal {
        self.composition
            .iter()
            .map(|(e, p)| e.cost() * p / Decimal::ONE_HUNDRED)
            .sum()
    }

    /// Checks the composition invariants: the total is within the band of 100
    /// and every percentage lies within its element's bounds.
    ///
    /// # Errors
    ///
    /// Returns [`AlloyForgeError::InconsistentSolution`] naming the offending
    /// element (or the total) and its value.
    pub fn check_composition(&self, tolerances: &Tolerances) -> Result<()> {
        for (element, percentage) in self.composition.iter() {
            if !element.contains(percentage) {
                return Err(AlloyForgeError::InconsistentSolution {
                    subject: element.name().to_string(),
                    value: percentage,
                    reason: format!(
                        "lies outside [{}, {}]",
                        element.min_percentage(),
                        element.max_percentage()
                    ),
                });
            }
        }
        let total = self.composition.total();
        if !tolerances.accepts_total(total) {
            return Err(AlloyForgeError::InconsistentSolution {
                subject: "composition total".to_string(),
                value: total,
                reason: format!("deviates from 100 by more than {}", tolerances.composition_band),
            });
        }
        Ok(())
    }

    /// Checks that the cost does not exceed `max_cost` plus the configured slack.
    ///
    /// The comparison runs on `Σ cost * percentage` against `100 * ceiling`, so
    /// no per-element division rounds the result.
    pub fn check_cost(&self, max_cost: Decimal, tolerances: &Tolerances) -> Result<()> {
        let ceiling = max_cost
            .checked_add(tolerances.cost_slack)
            .and_then(|c| c.checked_mul(Decimal::ONE_HUNDRED));
        let Some(ceiling) = ceiling else {
            return Ok(());
        };
        let spend: Decimal = self.composition.iter().map(|(e, p)| e.cost() * p).sum();
        if spend > ceiling {
            return Err(AlloyForgeError::InconsistentSolution {
                subject: "cost".to_string(),
                value: self.calculate_cost(),
                reason: format!("exceeds the ceiling of {max_cost}"),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Alloy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<8} {:>10}", "Element", "Percent")?;
        for (element, percentage) in self.composition.iter() {
            let marker = if element.name() == self.base_element {
                " (base)"
            } else {
                ""
            };
            writeln!(
                f,
                "{:<8} {:>10}{}",
                element.name(),
                percentage.normalize(),
                marker
            )?;
        }
        Ok(())
    }
}
