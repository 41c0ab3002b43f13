//! Candidate alloying elements.
//!
//! An [`Element`] describes one catalog entry: how much it contributes to creep
//! resistance per percentage point, what it costs, and the discrete grid of
//! percentages it may take.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{AlloyForgeError, Result};

/// An immutable catalog entry.
///
/// Percentages are expressed in percentage points (0-100). The allowed
/// percentages are `min_percentage + k * step_size` for `k` in
/// `0..=step_count()`.
///
/// # Example
///
/// ```
/// use alloyforge_core::Element;
/// use rust_decimal::Decimal;
///
/// let mo = Element::new(
///     "Mo",
///     Decimal::new(89124547, 0),
///     Decimal::new(16, 0),
///     Decimal::new(15, 1),
///     Decimal::new(6, 0),
///     Decimal::new(5, 1),
/// );
/// assert_eq!(mo.step_count(), Some(9));
/// assert_eq!(mo.percentage_at(3), Decimal::new(30, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    name: String,
    alpha: Decimal,
    cost: Decimal,
    min_percentage: Decimal,
    max_percentage: Decimal,
    step_size: Decimal,
}

impl Element {
    /// Creates a new element.
    pub fn new(
        name: impl Into<String>,
        alpha: Decimal,
        cost: Decimal,
        min_percentage: Decimal,
        max_percentage: Decimal,
        step_size: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            alpha,
            cost,
            min_percentage,
            max_percentage,
            step_size,
        }
    }

    /// Creates an element pinned at a single percentage.
    pub fn fixed(name: impl Into<String>, alpha: Decimal, cost: Decimal, percentage: Decimal) -> Self {
        Self::new(name, alpha, cost, percentage, percentage, Decimal::ONE)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contribution to creep resistance per percentage point.
    #[inline]
    pub fn alpha(&self) -> Decimal {
        self.alpha
    }

    /// Cost per percentage point per kilogram (scaled by 100 for a full kilogram).
    #[inline]
    pub fn cost(&self) -> Decimal {
        self.cost
    }

    #[inline]
    pub fn min_percentage(&self) -> Decimal {
        self.min_percentage
    }

    #[inline]
    pub fn max_percentage(&self) -> Decimal {
        self.max_percentage
    }

    #[inline]
    pub fn step_size(&self) -> Decimal {
        self.step_size
    }

    /// Returns `floor((max - min) / step)`, the largest step index.
    ///
    /// Returns `None` when the step is not positive, the range is inverted,
    /// or the count does not fit in a `u32`.
    pub fn step_count(&self) -> Option<u32> {
        if self.step_size <= Decimal::ZERO || self.min_percentage > self.max_percentage {
            return None;
        }
        (self.max_percentage - self.min_percentage)
            .checked_div(self.step_size)?
            .floor()
            .to_u32()
    }

    /// Portion of the range above the last reachable grid point.
    ///
    /// Non-zero when the range is not an exact multiple of the step.
    pub fn unreachable_remainder(&self) -> Decimal {
        match self.step_count() {
            Some(count) => self.max_percentage - self.percentage_at(count),
            None => Decimal::ZERO,
        }
    }

    /// Percentage for a given number of steps above the minimum.
    #[inline]
    pub fn percentage_at(&self, steps: u32) -> Decimal {
        self.min_percentage + Decimal::from(steps) * self.step_size
    }

    /// Returns true if `percentage` lies within `[min_percentage, max_percentage]`.
    pub fn contains(&self, percentage: Decimal) -> bool {
        percentage >= self.min_percentage && percentage <= self.max_percentage
    }

    /// Checks the structural validity of this element.
    ///
    /// # Errors
    ///
    /// Returns [`AlloyForgeError::InvalidElementSpec`] if the step is not
    /// positive, the range is inverted or leaves `[0, 100]`, or a coefficient
    /// is negative.
    pub fn validate(&self) -> Result<()> {
        let hundred = Decimal::ONE_HUNDRED;
        if self.name.trim().is_empty() {
            return Err(AlloyForgeError::invalid_element(&self.name, "name must not be empty"));
        }
        if self.step_size <= Decimal::ZERO {
            return Err(AlloyForgeError::invalid_element(
                &self.name,
                format!("step size {} must be positive", self.step_size),
            ));
        }
        if self.min_percentage > self.max_percentage {
            return Err(AlloyForgeError::invalid_element(
                &self.name,
                format!(
                    "minimum {}% exceeds maximum {}%",
                    self.min_percentage, self.max_percentage
                ),
            ));
        }
        for (label, value) in [("minimum", self.min_percentage), ("maximum", self.max_percentage)] {
            if value < Decimal::ZERO || value > hundred {
                return Err(AlloyForgeError::invalid_element(
                    &self.name,
                    format!("{label} {value}% is outside [0, 100]"),
                ));
            }
        }
        if self.alpha.is_sign_negative() && !self.alpha.is_zero() {
            return Err(AlloyForgeError::invalid_element(
                &self.name,
                format!("alpha {} must be non-negative", self.alpha),
            ));
        }
        if self.cost.is_sign_negative() && !self.cost.is_zero() {
            return Err(AlloyForgeError::invalid_element(
                &self.name,
                format!("cost {} must be non-negative", self.cost),
            ));
        }
        if self.step_count().is_none() {
            return Err(AlloyForgeError::invalid_element(
                &self.name,
                format!("step size {} is too fine for the range", self.step_size),
            ));
        }
        for (label, value, product) in [
            ("alpha", self.alpha, self.max_creep()),
            ("cost", self.cost, self.max_spend()),
        ] {
            if product.is_none() {
                return Err(AlloyForgeError::invalid_element(
                    &self.name,
                    format!("{label} {value} times {}% overflows", self.max_percentage),
                ));
            }
        }
        Ok(())
    }

    /// `alpha * max_percentage`, the largest creep contribution, if representable.
    pub fn max_creep(&self) -> Option<Decimal> {
        self.alpha.checked_mul(self.max_percentage)
    }

    /// `cost * max_percentage`, the largest cost contribution (times 100), if representable.
    pub fn max_spend(&self) -> Option<Decimal> {
        self.cost.checked_mul(self.max_percentage)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}%..{}% step {}]",
            self.name, self.min_percentage, self.max_percentage, self.step_size
        )
    }
}
