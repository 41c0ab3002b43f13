use alloyforge::{AlloyOptimizer, OptimizedAlloy, OptimizerConfig};
use owo_colors::OwoColorize;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::load_elements;
use crate::cli::SolveArgs;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct ElementShare {
    element: String,
    percentage: Decimal,
}

/// Machine-readable solve result.
#[derive(Debug, Serialize)]
struct SolveReport {
    base_element: String,
    composition: Vec<ElementShare>,
    creep_resistance: Decimal,
    cost: Decimal,
    proven_optimal: bool,
    nodes_explored: u64,
}

impl SolveReport {
    fn new(result: &OptimizedAlloy) -> Self {
        let alloy = result.alloy();
        Self {
            base_element: alloy.base_element().to_string(),
            composition: alloy
                .composition()
                .iter()
                .map(|(element, percentage)| ElementShare {
                    element: element.name().to_string(),
                    percentage: percentage.normalize(),
                })
                .collect(),
            creep_resistance: alloy.calculate_creep_resistance().normalize(),
            cost: alloy.calculate_cost().normalize(),
            proven_optimal: result.is_proven_optimal(),
            nodes_explored: result.statistics().nodes_explored,
        }
    }
}

fn render_text(result: &OptimizedAlloy) -> String {
    let alloy = result.alloy();
    let creep = alloy.calculate_creep_resistance();
    let creep = creep
        .to_f64()
        .map_or_else(|| creep.to_string(), |c| format!("{c:e}"));
    let mut out = alloy.to_string();
    out.push_str(&format!("\nCreep resistance: {}\n", creep));
    out.push_str(&format!(
        "Cost:             {:.2}\n",
        alloy.calculate_cost().round_dp(2)
    ));
    if !result.is_proven_optimal() {
        out.push_str(&format!(
            "{}\n",
            "Search stopped early; this is the best alloy found, not a proven optimum."
                .bright_yellow()
        ));
    }
    out
}

pub fn run(args: SolveArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading optimizer configuration from {}", path.display());
            OptimizerConfig::from_file(path)?
        }
        None => OptimizerConfig::default(),
    };
    debug!("Optimizer configuration: {:?}", config);

    let elements = load_elements(&args.catalog)?;
    let result = AlloyOptimizer::new(elements, &args.base)?
        .with_config(config)
        .solve(args.max_cost)?;
    info!("{}", result.statistics());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&SolveReport::new(&result))?);
    } else {
        print!("{}", render_text(&result));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloyforge::Element;

    use super::*;

    fn solve_small() -> OptimizedAlloy {
        let elements = vec![
            Element::new(
                "Cr",
                Decimal::from(3),
                Decimal::from(10),
                Decimal::ZERO,
                Decimal::from(20),
                Decimal::from(5),
            ),
            Element::new(
                "Ni",
                Decimal::ZERO,
                Decimal::from(5),
                Decimal::from(80),
                Decimal::ONE_HUNDRED,
                Decimal::ONE,
            ),
        ];
        AlloyOptimizer::new(elements, "Ni")
            .unwrap()
            .solve(Decimal::new(55, 1))
            .unwrap()
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&solve_small());
        assert!(text.contains("Cr"));
        assert!(text.contains("(base)"));
        assert!(text.contains("Creep resistance: 3e1"));
        assert!(text.contains("Cost:             5.50"));
    }

    #[test]
    fn test_json_report() {
        let report = SolveReport::new(&solve_small());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["base_element"], "Ni");
        assert_eq!(json["composition"][0]["element"], "Cr");
        assert_eq!(json["composition"][0]["percentage"], "10");
        assert_eq!(json["creep_resistance"], "30");
        assert_eq!(json["proven_optimal"], true);
    }
}
