//! Proptest strategies for small random catalogs.
//!
//! Generated catalogs keep the oracle cheap: at most three non-base elements
//! with a handful of grid points each. The base element is never enumerated.
//!
//! [`arb_catalog`] draws coarse steps and small coefficients. [`arb_fine_catalog`]
//! draws fine steps, alphas across many orders of magnitude and costs in the
//! hundreds to thousands, to be paired with [`arb_fine_max_cost`] or
//! [`arb_tight_case`].

use alloyforge_core::{Element, ElementCatalog, Tolerances};
use proptest::prelude::*;
use proptest::sample::Index;
use rust_decimal::Decimal;

use crate::oracle::balancing_base_step;

/// A random catalog and the name of its base element.
#[derive(Debug, Clone)]
pub struct CatalogCase {
    pub elements: Vec<Element>,
    pub base: String,
}

fn arb_step() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::new(5, 1)),
        Just(Decimal::ONE),
        Just(Decimal::TWO),
        Just(Decimal::new(25, 1)),
    ]
}

fn arb_alloying_element(index: usize) -> impl Strategy<Value = Element> {
    (0i64..=50, 0i64..=300, 0i64..=10, arb_step(), 0u32..=4, any::<bool>()).prop_map(
        move |(alpha, cost, min, step, count, truncated)| {
            let min = Decimal::from(min);
            let mut max = min + step * Decimal::from(count);
            if truncated {
                max += Decimal::new(3, 1);
            }
            Element::new(
                format!("E{index}"),
                Decimal::from(alpha),
                Decimal::new(cost, 1),
                min,
                max,
                step,
            )
        },
    )
}

fn arb_base_element() -> impl Strategy<Value = Element> {
    (0i64..=5, 0i64..=150, 0i64..=60, any::<bool>()).prop_map(|(alpha, cost, min, half)| {
        let step = if half { Decimal::new(5, 1) } else { Decimal::ONE };
        Element::new(
            "Base",
            Decimal::from(alpha),
            Decimal::new(cost, 1),
            Decimal::from(min),
            Decimal::ONE_HUNDRED,
            step,
        )
    })
}

/// A valid catalog of one to three alloying elements plus a base element at
/// a random position.
pub fn arb_catalog() -> impl Strategy<Value = CatalogCase> {
    (1usize..=3)
        .prop_flat_map(|n| {
            let alloying: Vec<_> = (0..n).map(arb_alloying_element).collect();
            (alloying, arb_base_element(), 0..=n)
        })
        .prop_map(|(mut elements, base, position)| {
            let name = base.name().to_string();
            elements.insert(position, base);
            CatalogCase {
                elements,
                base: name,
            }
        })
}

/// A cost ceiling between 0 and 30 with two decimals.
pub fn arb_max_cost() -> impl Strategy<Value = Decimal> {
    (0i64..=3000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_fine_step() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::new(5, 2)),
        Just(Decimal::new(1, 1)),
        Just(Decimal::new(25, 2)),
    ]
}

/// `mantissa * 10^exponent` with a three-digit mantissa and exponents up to 15.
fn arb_wide_alpha() -> impl Strategy<Value = Decimal> {
    (1i64..=999, 0u32..=15).prop_map(|(mantissa, exponent)| {
        Decimal::from(mantissa) * Decimal::from(10i64.pow(exponent))
    })
}

/// A per-percent cost between 100.00 and 5000.00.
fn arb_wide_cost() -> impl Strategy<Value = Decimal> {
    (10_000i64..=500_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_fine_alloying_element(index: usize) -> impl Strategy<Value = Element> {
    (arb_wide_alpha(), arb_wide_cost(), 0i64..=50, arb_fine_step(), 0u32..=8).prop_map(
        move |(alpha, cost, min_tenths, step, count)| {
            let min = Decimal::new(min_tenths, 1);
            let max = min + step * Decimal::from(count);
            Element::new(format!("E{index}"), alpha, cost, min, max, step)
        },
    )
}

fn arb_fine_base_element() -> impl Strategy<Value = Element> {
    (
        arb_wide_cost(),
        0i64..=60,
        prop_oneof![arb_fine_step(), Just(Decimal::new(5, 1))],
    )
        .prop_map(|(cost, min, step)| {
            Element::new(
                "Base",
                Decimal::ZERO,
                cost,
                Decimal::from(min),
                Decimal::ONE_HUNDRED,
                step,
            )
        })
}

/// A valid catalog of one to three finely stepped alloying elements plus a
/// base element at a random position.
pub fn arb_fine_catalog() -> impl Strategy<Value = CatalogCase> {
    (1usize..=3)
        .prop_flat_map(|n| {
            let alloying: Vec<_> = (0..n).map(arb_fine_alloying_element).collect();
            (alloying, arb_fine_base_element(), 0..=n)
        })
        .prop_map(|(mut elements, base, position)| {
            let name = base.name().to_string();
            elements.insert(position, base);
            CatalogCase {
                elements,
                base: name,
            }
        })
}

/// A cost ceiling between 100 and 5000 with four decimals.
pub fn arb_fine_max_cost() -> impl Strategy<Value = Decimal> {
    (1_000_000i64..=50_000_000).prop_map(|units| Decimal::new(units, 4))
}

/// A fine catalog with a ceiling at, or 1e-9 either side of, the cost of one
/// of its balanced grid points.
pub fn arb_tight_case() -> impl Strategy<Value = (CatalogCase, Decimal)> {
    let offset = prop_oneof![
        Just(Decimal::new(-1, 9)),
        Just(Decimal::ZERO),
        Just(Decimal::new(1, 9)),
    ];
    (arb_fine_catalog(), prop::collection::vec(any::<Index>(), 4), offset).prop_map(
        |(case, picks, offset)| {
            let ceiling = balanced_point_cost(&case, &picks)
                .map_or(Decimal::ZERO, |cost| (cost + offset).max(Decimal::ZERO));
            (case, ceiling)
        },
    )
}

/// Cost of the grid point chosen by `picks`, with the base balancing the rest.
fn balanced_point_cost(case: &CatalogCase, picks: &[Index]) -> Option<Decimal> {
    let catalog = ElementCatalog::new(case.elements.clone(), &case.base).ok()?;
    let base_index = catalog.base_index();
    let mut committed = Decimal::ZERO;
    let mut spend = Decimal::ZERO;

    for (i, (element, pick)) in catalog.iter().zip(picks.iter().cycle()).enumerate() {
        if i == base_index {
            continue;
        }
        let grid_points = element.step_count()? as usize + 1;
        let pct = element.percentage_at(pick.index(grid_points) as u32);
        committed += pct;
        spend += element.cost() * pct;
    }

    let base = catalog.base_element();
    let k = balancing_base_step(base, committed, &Tolerances::default())?;
    spend += base.cost() * base.percentage_at(k);
    Some(spend / Decimal::ONE_HUNDRED)
}
