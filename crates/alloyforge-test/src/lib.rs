//! Shared test fixtures for AlloyForge crates.
//!
//! - [`superalloy`] - the reference nickel superalloy catalog and its known optima
//! - [`oracle`] - brute-force enumeration of every composition on the step grid
//! - [`strategy`] - proptest strategies for small random catalogs, coarse or fine
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! alloyforge-test = { path = "../alloyforge-test" }
//! ```

pub mod oracle;
pub mod strategy;
pub mod superalloy;

pub use oracle::{balancing_base_step, best_composition, search_space_size, OracleSolution};
pub use strategy::{
    arb_catalog, arb_fine_catalog, arb_fine_max_cost, arb_max_cost, arb_tight_case, CatalogCase,
};
pub use superalloy::{nickel_superalloy_catalog, nickel_superalloy_elements, NICKEL_BASE};
