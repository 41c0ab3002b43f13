//! The reference nickel superalloy catalog.
//!
//! Five elements with nickel as the base. Known optima (creep resistance):
//!
//! | max cost | optimum |
//! |---|---|
//! | 0, 9 | infeasible |
//! | 10 | 7.042750365e17 |
//! | 12 | 1.139557542e18 |
//! | 18 | 1.72895252e18 (22% Cr, 10% Co, 1% Nb, 6% Mo, 61% Ni) |
//! | 100 | 2.81465672e18 |

use alloyforge_core::{Element, ElementCatalog};
use rust_decimal::Decimal;

/// Name of the base element.
pub const NICKEL_BASE: &str = "Ni";

fn pct(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

/// Cr, Co, Nb, Mo and Ni with their reference coefficients.
pub fn nickel_superalloy_elements() -> Vec<Element> {
    vec![
        Element::new(
            "Cr",
            Decimal::from(20_911_350_000_000_000_i64),
            pct(140, 1),
            pct(145, 1),
            pct(220, 1),
            pct(5, 1),
        ),
        Element::new(
            "Co",
            Decimal::from(72_380_280_000_000_000_i64),
            pct(805, 1),
            Decimal::ZERO,
            pct(250, 1),
            Decimal::ONE,
        ),
        Element::new(
            "Nb",
            Decimal::from(10_352_738_000_000_000_i64),
            pct(425, 1),
            Decimal::ZERO,
            pct(15, 1),
            pct(1, 1),
        ),
        Element::new(
            "Mo",
            Decimal::from(89_124_547_000_000_000_i64),
            pct(160, 1),
            pct(15, 1),
            pct(60, 1),
            pct(5, 1),
        ),
        Element::new(
            NICKEL_BASE,
            Decimal::ZERO,
            pct(89, 1),
            Decimal::ZERO,
            Decimal::ONE_HUNDRED,
            Decimal::ONE,
        ),
    ]
}

/// The validated reference catalog with nickel as base.
///
/// # Panics
///
/// Never in practice: the fixture is valid by construction.
pub fn nickel_superalloy_catalog() -> ElementCatalog {
    ElementCatalog::new(nickel_superalloy_elements(), NICKEL_BASE)
        .expect("reference catalog is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let catalog = nickel_superalloy_catalog();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.base_index(), 4);
        let steps: Vec<_> = catalog.iter().map(|e| e.step_count()).collect();
        assert_eq!(steps, vec![Some(15), Some(25), Some(15), Some(9), Some(100)]);
    }
}
