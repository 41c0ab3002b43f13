//! Brute-force reference optimizer.
//!
//! Enumerates every grid point of the alloying elements. The base element is
//! not enumerated: for each point it takes the cheapest percentage that brings
//! the total into the composition band. All arithmetic is exact decimal.

use alloyforge_core::{Element, ElementCatalog, Tolerances};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// The best composition found by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleSolution {
    /// Steps above the minimum, per catalog element.
    pub steps: Vec<u32>,
    pub percentages: Vec<Decimal>,
    pub creep_resistance: Decimal,
    pub cost: Decimal,
}

/// Number of grid points the oracle would visit.
pub fn search_space_size(catalog: &ElementCatalog) -> u64 {
    catalog
        .iter()
        .enumerate()
        .filter(|(i, _)| !catalog.is_base(*i))
        .map(|(_, e)| u64::from(e.step_count().unwrap_or(0)) + 1)
        .product()
}

/// Smallest step of `base` that brings `committed + base` into the band.
///
/// The smallest percentage is also the cheapest, since costs are non-negative.
pub fn balancing_base_step(
    base: &Element,
    committed: Decimal,
    tolerances: &Tolerances,
) -> Option<u32> {
    let limit = base.step_count()?;
    let target = Decimal::ONE_HUNDRED - tolerances.composition_band - committed;
    // Start one step early so a rounded quotient never skips the first fit.
    let start = ((target - base.min_percentage()) / base.step_size())
        .floor()
        .to_i64()
        .map_or(0, |k| k.saturating_sub(1).clamp(0, i64::from(limit)));
    let start = u32::try_from(start).unwrap_or(0);

    for k in start..=limit {
        let total = committed + base.percentage_at(k);
        if tolerances.accepts_total(total) {
            return Some(k);
        }
        if total > Decimal::ONE_HUNDRED {
            return None;
        }
    }
    None
}

/// Returns the feasible composition with the highest creep resistance, or
/// `None` if no grid point satisfies the composition band and cost ceiling.
///
/// Ties keep the first composition in enumeration order.
pub fn best_composition(
    catalog: &ElementCatalog,
    max_cost: Decimal,
    tolerances: &Tolerances,
) -> Option<OracleSolution> {
    let base_index = catalog.base_index();
    let base = catalog.base_element();
    let budget = max_cost * Decimal::ONE_HUNDRED;
    let limits: Vec<u32> = catalog
        .iter()
        .enumerate()
        .map(|(i, e)| if i == base_index { 0 } else { e.step_count().unwrap_or(0) })
        .collect();
    let mut steps = vec![0u32; limits.len()];
    let mut best: Option<OracleSolution> = None;

    loop {
        let committed: Decimal = catalog
            .iter()
            .zip(&steps)
            .enumerate()
            .filter(|(i, _)| *i != base_index)
            .map(|(_, (e, &k))| e.percentage_at(k))
            .sum();

        if let Some(base_step) = balancing_base_step(base, committed, tolerances) {
            let mut point = steps.clone();
            point[base_index] = base_step;
            let percentages: Vec<Decimal> = catalog
                .iter()
                .zip(&point)
                .map(|(e, &k)| e.percentage_at(k))
                .collect();
            let spend: Decimal = catalog
                .iter()
                .zip(&percentages)
                .map(|(e, p)| e.cost() * p)
                .sum();
            if spend <= budget {
                let creep_resistance: Decimal = catalog
                    .iter()
                    .enumerate()
                    .zip(&percentages)
                    .filter(|((i, _), _)| *i != base_index)
                    .map(|((_, e), p)| e.alpha() * p)
                    .sum();
                if best
                    .as_ref()
                    .map_or(true, |b| creep_resistance > b.creep_resistance)
                {
                    best = Some(OracleSolution {
                        steps: point,
                        percentages,
                        creep_resistance,
                        cost: spend / Decimal::ONE_HUNDRED,
                    });
                }
            }
        }

        let mut i = 0;
        loop {
            if i == steps.len() {
                return best;
            }
            if steps[i] < limits[i] {
                steps[i] += 1;
                break;
            }
            steps[i] = 0;
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloyforge_core::Element;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_two_element_optimum() {
        let catalog = ElementCatalog::new(
            vec![
                Element::new("Cr", dec("3"), dec("10"), dec("0"), dec("20"), dec("5")),
                Element::new("Ni", dec("1"), dec("5"), dec("80"), dec("100"), dec("1")),
            ],
            "Ni",
        )
        .unwrap();

        let best = best_composition(&catalog, dec("5.5"), &Tolerances::default()).unwrap();
        assert_eq!(best.steps, vec![2, 10]);
        assert_eq!(best.creep_resistance, dec("30"));
        assert_eq!(best.cost, dec("5.5"));
        assert_eq!(search_space_size(&catalog), 5);
    }

    #[test]
    fn test_balancing_base_step() {
        let tolerances = Tolerances::default();
        let base = Element::new("Ni", dec("0"), dec("5"), dec("40"), dec("100"), dec("0.05"));

        assert_eq!(balancing_base_step(&base, dec("12.3"), &tolerances), Some(954));
        assert_eq!(base.percentage_at(954), dec("87.70"));
        assert_eq!(balancing_base_step(&base, dec("60"), &tolerances), Some(0));
        // the base cannot drop below 40%
        assert_eq!(balancing_base_step(&base, dec("61"), &tolerances), None);
        // nor rise above 100%
        assert_eq!(balancing_base_step(&base, dec("-0.5"), &tolerances), None);

        let coarse = Element::new("Fe", dec("0"), dec("1"), dec("0"), dec("100"), dec("1"));
        assert_eq!(balancing_base_step(&coarse, dec("12.5"), &tolerances), None);
        assert_eq!(balancing_base_step(&coarse, dec("12.995"), &tolerances), Some(87));
    }

    #[test]
    fn test_infeasible() {
        let catalog = ElementCatalog::new(
            vec![Element::new("Ni", dec("0"), dec("5"), dec("0"), dec("100"), dec("1"))],
            "Ni",
        )
        .unwrap();
        assert!(best_composition(&catalog, dec("4.99"), &Tolerances::default()).is_none());
    }
}
