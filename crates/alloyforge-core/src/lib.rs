//! AlloyForge Core - Core types for alloy composition optimization
//!
//! This crate provides the fundamental abstractions for AlloyForge:
//! - Element specifications and catalog validation
//! - Alloy compositions and their derived metrics
//! - Tolerances shared by problem construction and result checks
//! - The error taxonomy used across the workspace

pub mod alloy;
pub mod catalog;
pub mod composition;
pub mod element;
pub mod error;
pub mod tolerance;

pub use alloy::Alloy;
pub use catalog::{validate_catalog, ElementCatalog};
pub use composition::Composition;
pub use element::Element;
pub use error::{AlloyForgeError, Result};
pub use tolerance::Tolerances;

pub use rust_decimal::Decimal;
