//! Colorful console output for optimizer events.
//!
//! Provides a `tracing` layer that formats solve and search events with
//! colors. Enabled by the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `info` level.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(AlloyConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats optimizer events with colors.
pub struct AlloyConsoleLayer;

impl<S: Subscriber> Layer<S> for AlloyConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("alloyforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    phase: Option<String>,
    element_count: Option<u64>,
    max_cost: Option<String>,
    creep_resistance: Option<String>,
    cost: Option<String>,
    outcome: Option<String>,
    nodes: Option<u64>,
    pruned: Option<u64>,
    duration_ms: Option<u64>,
    objective: Option<String>,
    proven_optimal: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "message" => self.message = Some(s),
            "phase" => self.phase = Some(s),
            "max_cost" => self.max_cost = Some(s),
            "creep_resistance" => self.creep_resistance = Some(s),
            "cost" => self.cost = Some(s),
            "outcome" => self.outcome = Some(s),
            "objective" => self.objective = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_debug(field, &value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "element_count" => self.element_count = Some(value),
            "nodes" | "nodes_explored" => self.nodes = Some(value),
            "pruned" => self.pruned = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "proven_optimal" {
            self.proven_optimal = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref() {
        Some("solve_start") => format!(
            "{} Solving │ {} elements │ max cost {}",
            "▶".bright_green().bold(),
            v.element_count.unwrap_or(0).bright_yellow(),
            v.max_cost.as_deref().unwrap_or("?").bright_yellow()
        ),
        Some("solve_end") => match (&v.creep_resistance, &v.outcome) {
            (Some(creep), _) => {
                let status = if v.proven_optimal.unwrap_or(false) {
                    "OPTIMAL".bright_green().bold().to_string()
                } else {
                    "BEST FOUND".bright_yellow().bold().to_string()
                };
                format!(
                    "{} Solving complete │ creep {} │ cost {} │ {} nodes │ {}",
                    "■".bright_cyan().bold(),
                    creep.bright_white(),
                    v.cost.as_deref().unwrap_or("?").bright_white(),
                    v.nodes.unwrap_or(0),
                    status
                )
            }
            (None, outcome) => format!(
                "{} Solving failed │ {}",
                "■".bright_red().bold(),
                outcome.as_deref().unwrap_or("unknown").bright_red()
            ),
        },
        Some("phase_start") => format!(
            "{} {} started",
            "▶".bright_blue(),
            v.phase.as_deref().unwrap_or("Search").bright_white().bold()
        ),
        Some("phase_end") => format!(
            "{} {} ended │ {}ms │ {} nodes │ {} pruned",
            "◀".bright_blue(),
            v.phase.as_deref().unwrap_or("Search").bright_white().bold(),
            v.duration_ms.unwrap_or(0),
            v.nodes.unwrap_or(0),
            v.pruned.unwrap_or(0)
        ),
        Some("incumbent") => format!(
            "  {} new incumbent {} after {} nodes",
            "★".bright_yellow(),
            v.objective.as_deref().unwrap_or("?").bright_white(),
            v.nodes.unwrap_or(0)
        ),
        _ if level == Level::WARN => format!(
            "{} {}",
            "⚠".bright_yellow().bold(),
            v.message.as_deref().unwrap_or("").yellow()
        ),
        _ => String::new(),
    }
}
