//! Tests for optimizer configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [tolerance]
        composition_band = "0.05"
        cost_slack = 0.001

        [search]
        exploration_type = "best_bound_first"
        branching_rule = "first_fractional"
        integrality_tolerance = 1e-5

        [termination]
        node_limit = 2500
        seconds_spent_limit = 3
    "#;

    let config = OptimizerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.tolerance.composition_band, Decimal::new(5, 2));
    assert_eq!(config.tolerance.cost_slack, Decimal::new(1, 3));
    assert_eq!(config.search.exploration_type, ExplorationType::BestBoundFirst);
    assert_eq!(config.search.branching_rule, BranchingRule::FirstFractional);
    assert_eq!(config.search.integrality_tolerance, Decimal::new(1, 5));
    assert_eq!(config.termination.node_limit, Some(2500));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(3)));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        tolerance:
          composition_band: "0.01"
        search:
          exploration_type: depth_first
        termination:
          millis_spent_limit: 250
    "#;

    let config = OptimizerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.search.exploration_type, ExplorationType::DepthFirst);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
    assert_eq!(config.termination.node_limit, Some(100_000));
}

#[test]
fn test_defaults() {
    let config = OptimizerConfig::from_toml_str("").unwrap();
    assert_eq!(config, OptimizerConfig::default());
    assert_eq!(config.tolerances(), Tolerances::default());
    assert_eq!(config.search.relative_gap, Decimal::ZERO);
    assert_eq!(config.search.integrality_tolerance, Decimal::new(1, 9));
    assert!(config.time_limit().is_none());
}

#[test]
fn test_builder() {
    let config = OptimizerConfig::new()
        .with_node_limit(42)
        .with_time_limit_seconds(1)
        .with_composition_band(Decimal::new(2, 2))
        .with_exploration_type(ExplorationType::BestBoundFirst);

    assert_eq!(config.termination.node_limit, Some(42));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(1)));
    assert_eq!(config.tolerances().composition_band, Decimal::new(2, 2));
    assert!(config.validate().is_ok());
}

#[test]
fn test_rejects_negative_band() {
    let result = OptimizerConfig::from_toml_str(
        r#"
        [tolerance]
        composition_band = "-0.01"
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_rejects_out_of_range_search_tolerances() {
    let result = OptimizerConfig::from_toml_str(
        r#"
        [search]
        integrality_tolerance = 0.5
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    let result = OptimizerConfig::from_toml_str(
        r#"
        [search]
        relative_gap = "-0.001"
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_rejects_zero_node_limit() {
    let result = OptimizerConfig::from_toml_str(
        r#"
        [termination]
        node_limit = 0
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_rejects_unknown_exploration_type() {
    let result = OptimizerConfig::from_toml_str(
        r#"
        [search]
        exploration_type = "breadth_first"
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = OptimizerConfig::load("/nonexistent/alloyforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_from_file_picks_format_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("optimizer.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "termination:\n  node_limit: 7").unwrap();

    let config = OptimizerConfig::from_file(&path).unwrap();
    assert_eq!(config.termination.node_limit, Some(7));
}
