use alloyforge::validate_catalog;
use owo_colors::OwoColorize;
use tracing::info;

use crate::catalog::load_elements;
use crate::cli::CheckArgs;
use crate::error::Result;

pub fn run(args: CheckArgs) -> Result<()> {
    let elements = load_elements(&args.catalog)?;
    let base_index = validate_catalog(&elements, &args.base)?;
    info!(
        element_count = elements.len(),
        base_index, "Catalog validated"
    );

    println!(
        "{} {} elements, base element '{}'",
        "✔".bright_green().bold(),
        elements.len(),
        elements[base_index].name()
    );
    for element in &elements {
        let remainder = element.unreachable_remainder();
        if !remainder.is_zero() {
            println!(
                "  {} {} cannot reach the top {}% of its range",
                "⚠".bright_yellow(),
                element.name(),
                remainder.normalize()
            );
        }
    }
    Ok(())
}
