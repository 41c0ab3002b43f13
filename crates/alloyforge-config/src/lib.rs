//! Configuration system for AlloyForge.
//!
//! Load optimizer configuration from TOML or YAML files to control tolerances,
//! the branch-and-bound search and its termination without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use alloyforge_config::{ExplorationType, OptimizerConfig};
//! use std::time::Duration;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     [tolerance]
//!     composition_band = "0.02"
//!
//!     [search]
//!     exploration_type = "best_bound_first"
//!
//!     [termination]
//!     node_limit = 5000
//!     seconds_spent_limit = 2
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(2)));
//! assert_eq!(config.search.exploration_type, ExplorationType::BestBoundFirst);
//! assert_eq!(config.termination.node_limit, Some(5000));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use alloyforge_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::load("alloyforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use alloyforge_core::Tolerances;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main optimizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Tolerance bands for the composition total and the cost check.
    #[serde(default)]
    pub tolerance: ToleranceConfig,

    /// Branch-and-bound search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Limits that stop the search early.
    #[serde(default)]
    pub termination: TerminationConfig,
}

impl OptimizerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` are parsed as YAML, everything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance.composition_band.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "composition_band must be non-negative, got {}",
                self.tolerance.composition_band
            )));
        }
        if self.tolerance.cost_slack.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "cost_slack must be non-negative, got {}",
                self.tolerance.cost_slack
            )));
        }
        let integrality = self.search.integrality_tolerance;
        if integrality <= Decimal::ZERO || integrality >= Decimal::new(5, 1) {
            return Err(ConfigError::Invalid(format!(
                "integrality_tolerance must be in (0, 0.5), got {integrality}"
            )));
        }
        if self.search.relative_gap.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "relative_gap must be non-negative, got {}",
                self.search.relative_gap
            )));
        }
        if self.termination.node_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "node_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the node limit.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.termination.node_limit = Some(limit);
        self
    }

    /// Sets the termination time limit.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.termination.seconds_spent_limit = Some(seconds);
        self
    }

    /// Sets the composition band.
    pub fn with_composition_band(mut self, band: Decimal) -> Self {
        self.tolerance.composition_band = band;
        self
    }

    /// Sets the exploration order.
    pub fn with_exploration_type(mut self, exploration_type: ExplorationType) -> Self {
        self.search.exploration_type = exploration_type;
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }

    /// Returns the configured tolerances.
    pub fn tolerances(&self) -> Tolerances {
        Tolerances::new(self.tolerance.composition_band, self.tolerance.cost_slack)
    }
}

/// Tolerance configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ToleranceConfig {
    /// Allowed deviation of the composition total from 100 percentage points.
    #[serde(default = "default_composition_band")]
    pub composition_band: Decimal,

    /// Currency amount the final cost may exceed the ceiling by.
    #[serde(default)]
    pub cost_slack: Decimal,
}

fn default_composition_band() -> Decimal {
    Tolerances::DEFAULT_COMPOSITION_BAND
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            composition_band: default_composition_band(),
            cost_slack: Decimal::ZERO,
        }
    }
}

/// Branch-and-bound search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Order in which open nodes are explored.
    #[serde(default)]
    pub exploration_type: ExplorationType,

    /// How the branching variable is chosen.
    #[serde(default)]
    pub branching_rule: BranchingRule,

    /// Distance from an integer below which a relaxed value counts as integral.
    #[serde(default = "default_integrality_tolerance")]
    pub integrality_tolerance: Decimal,

    /// Relative optimality gap used when pruning against the incumbent.
    ///
    /// Zero proves optimality. A positive gap trades the proof for speed:
    /// subtrees that cannot beat the incumbent by more than this fraction are
    /// discarded.
    #[serde(default)]
    pub relative_gap: Decimal,
}

fn default_integrality_tolerance() -> Decimal {
    Decimal::new(1, 9)
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_type: ExplorationType::default(),
            branching_rule: BranchingRule::default(),
            integrality_tolerance: default_integrality_tolerance(),
            relative_gap: Decimal::ZERO,
        }
    }
}

/// Exploration order for open branch-and-bound nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationType {
    /// Deepest node first; finds incumbents early.
    #[default]
    DepthFirst,

    /// Node with the best relaxed bound first.
    BestBoundFirst,
}

/// Branching variable selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchingRule {
    /// Variable whose relaxed value is farthest from an integer.
    #[default]
    MostFractional,

    /// Lowest-index fractional variable.
    FirstFractional,
}

/// Termination configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of branch-and-bound nodes to explore.
    #[serde(default = "default_node_limit")]
    pub node_limit: Option<u64>,

    /// Maximum seconds to spend solving.
    #[serde(default)]
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving.
    #[serde(default)]
    pub millis_spent_limit: Option<u64>,
}

fn default_node_limit() -> Option<u64> {
    Some(100_000)
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            node_limit: default_node_limit(),
            seconds_spent_limit: None,
            millis_spent_limit: None,
        }
    }
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.seconds_spent_limit.unwrap_or(0) * 1000
            + self.millis_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
