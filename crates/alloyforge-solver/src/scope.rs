//! Search-level scope.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;

/// Mutable state of one branch-and-bound run, visible to terminations.
#[derive(Debug, Clone)]
pub struct SearchScope {
    start_time: Instant,
    nodes_explored: u64,
    best_objective: Option<Decimal>,
    open_nodes: usize,
}

impl SearchScope {
    /// Creates a scope whose clock starts now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            nodes_explored: 0,
            best_objective: None,
            open_nodes: 0,
        }
    }

    /// Returns the time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    pub fn increment_nodes_explored(&mut self) {
        self.nodes_explored += 1;
    }

    /// Objective of the incumbent, if one has been found.
    pub fn best_objective(&self) -> Option<Decimal> {
        self.best_objective
    }

    pub fn set_best_objective(&mut self, objective: Decimal) {
        self.best_objective = Some(objective);
    }

    /// Number of nodes waiting in the frontier.
    pub fn open_nodes(&self) -> usize {
        self.open_nodes
    }

    pub fn set_open_nodes(&mut self, open_nodes: usize) {
        self.open_nodes = open_nodes;
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::new()
    }
}
