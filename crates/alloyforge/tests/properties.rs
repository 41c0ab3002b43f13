//! Property tests comparing the optimizer with exhaustive enumeration.

use alloyforge::prelude::*;
use alloyforge::Decimal;
use alloyforge_test::{
    arb_catalog, arb_fine_catalog, arb_fine_max_cost, arb_max_cost, arb_tight_case,
    best_composition, CatalogCase,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn optimize(case: &CatalogCase, max_cost: Decimal) -> alloyforge::Result<OptimizedAlloy> {
    AlloyOptimizer::new(case.elements.clone(), &case.base)?.solve(max_cost)
}

/// Solves `case` and checks the result against exhaustive enumeration.
fn check_against_enumeration(case: &CatalogCase, max_cost: Decimal) -> Result<(), TestCaseError> {
    let catalog = ElementCatalog::new(case.elements.clone(), &case.base).unwrap();
    let expected = best_composition(&catalog, max_cost, &Tolerances::default());

    match (optimize(case, max_cost), expected) {
        (Ok(result), Some(best)) => {
            let alloy = result.alloy();
            prop_assert!(result.is_proven_optimal());
            prop_assert_eq!(alloy.calculate_creep_resistance(), best.creep_resistance);
            prop_assert!(alloy.calculate_cost() <= max_cost);
            prop_assert!((alloy.total_percentage() - Decimal::ONE_HUNDRED).abs() <= Decimal::new(1, 2));
            for (element, pct) in alloy.composition().iter() {
                prop_assert!(element.contains(pct), "{} at {}%", element.name(), pct);
            }
        }
        (Err(AlloyForgeError::Infeasible), None) => {}
        (actual, expected) => {
            prop_assert!(false, "optimizer returned {:?}, enumeration found {:?}", actual, expected);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_matches_enumeration(case in arb_catalog(), max_cost in arb_max_cost()) {
        check_against_enumeration(&case, max_cost)?;
    }

    #[test]
    fn prop_fine_catalog_matches_enumeration(
        case in arb_fine_catalog(),
        max_cost in arb_fine_max_cost(),
    ) {
        check_against_enumeration(&case, max_cost)?;
    }

    #[test]
    fn prop_ceiling_at_a_grid_point_cost_matches_enumeration(
        (case, max_cost) in arb_tight_case(),
    ) {
        check_against_enumeration(&case, max_cost)?;
    }

    #[test]
    fn prop_valid_catalog_never_fails_internally((case, max_cost) in arb_tight_case()) {
        match optimize(&case, max_cost) {
            Ok(_) | Err(AlloyForgeError::Infeasible) => {}
            Err(err) => prop_assert!(
                false,
                "unexpected error (internal fault: {}): {}",
                err.is_internal_fault(),
                err
            ),
        }
    }

    #[test]
    fn prop_creep_is_monotone_in_ceiling(
        case in arb_catalog(),
        max_cost in arb_max_cost(),
        extra in 0i64..=500,
    ) {
        let richer = max_cost + Decimal::new(extra, 2);
        let lower = optimize(&case, max_cost);
        let higher = optimize(&case, richer);

        if let Ok(lower) = lower {
            let higher = higher.unwrap();
            prop_assert!(
                higher.alloy().calculate_creep_resistance()
                    >= lower.alloy().calculate_creep_resistance()
            );
        }
    }
}
