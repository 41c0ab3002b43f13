//! Nickel Superalloy Example
//!
//! Designs a nickel-based superalloy for turbine blades. Chromium, cobalt,
//! niobium and molybdenum raise creep resistance but cost more than nickel,
//! which fills the rest of the mixture.
//!
//! This example sweeps the cost ceiling and prints the optimal alloy at each
//! price point.

use alloyforge::prelude::*;
use alloyforge::Decimal;

/// Decimal from a mantissa and scale: `d(145, 1)` is 14.5.
fn d(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

/// The candidate elements. Alpha is creep resistance per percentage point,
/// cost is per unit of alloy at 100%.
fn superalloy_elements() -> Vec<Element> {
    vec![
        Element::new("Cr", d(20_911_350_000_000_000, 0), d(140, 1), d(145, 1), d(22, 0), d(5, 1)),
        Element::new("Co", d(72_380_280_000_000_000, 0), d(805, 1), d(0, 0), d(25, 0), d(1, 0)),
        Element::new("Nb", d(10_352_738_000_000_000, 0), d(425, 1), d(0, 0), d(15, 1), d(1, 1)),
        Element::new("Mo", d(89_124_547_000_000_000, 0), d(16, 0), d(15, 1), d(6, 0), d(5, 1)),
        Element::new("Ni", d(0, 0), d(89, 1), d(0, 0), d(100, 0), d(1, 0)),
    ]
}

fn main() {
    alloyforge::console::init();

    let optimizer = match AlloyOptimizer::new(superalloy_elements(), "Ni") {
        Ok(optimizer) => optimizer,
        Err(e) => {
            eprintln!("Invalid catalog: {e}");
            std::process::exit(1);
        }
    };

    for max_cost in [9, 10, 12, 18, 100] {
        println!("\n=== Max cost {max_cost} ===");
        match optimizer.solve(Decimal::from(max_cost)) {
            Ok(result) => {
                let alloy = result.alloy();
                print!("{alloy}");
                println!("Creep resistance: {:e}", alloy.calculate_creep_resistance());
                println!("Cost:             {:.2}", alloy.calculate_cost().round_dp(2));
                println!("Search:           {}", result.statistics());
            }
            Err(AlloyForgeError::Infeasible) => {
                println!("No alloy meets this cost ceiling.");
            }
            Err(e) => {
                eprintln!("Solve failed: {e}");
                std::process::exit(1);
            }
        }
    }
}
