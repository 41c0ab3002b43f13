//! Numerical tolerances shared by problem construction and result checks.

use rust_decimal::Decimal;

/// Tolerance bands used when building and checking a composition.
///
/// # Examples
///
/// ```
/// use alloyforge_core::Tolerances;
/// use rust_decimal::Decimal;
///
/// let tolerances = Tolerances::default();
/// assert_eq!(tolerances.composition_band, Decimal::new(1, 2));
/// assert_eq!(tolerances.cost_slack, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tolerances {
    /// Allowed deviation of the composition total from 100, in percentage points.
    pub composition_band: Decimal,
    /// Currency amount the final cost may exceed the ceiling by.
    pub cost_slack: Decimal,
}

impl Tolerances {
    /// Default composition band: ±0.01 percentage points.
    pub const DEFAULT_COMPOSITION_BAND: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

    pub fn new(composition_band: Decimal, cost_slack: Decimal) -> Self {
        Self {
            composition_band,
            cost_slack,
        }
    }

    pub fn with_composition_band(mut self, band: Decimal) -> Self {
        self.composition_band = band;
        self
    }

    pub fn with_cost_slack(mut self, slack: Decimal) -> Self {
        self.cost_slack = slack;
        self
    }

    /// Returns true if `total` is within the composition band of 100.
    pub fn accepts_total(&self, total: Decimal) -> bool {
        (total - Decimal::ONE_HUNDRED).abs() <= self.composition_band
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            composition_band: Self::DEFAULT_COMPOSITION_BAND,
            cost_slack: Decimal::ZERO,
        }
    }
}
