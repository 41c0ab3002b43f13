//! Catalog files.
//!
//! A catalog is a list of elements under an `elements` key:
//!
//! ```toml
//! [[elements]]
//! name = "Mo"
//! alpha = "89124547000000000"
//! cost = "16.0"
//! min_percentage = "1.5"
//! max_percentage = "6"
//! step_size = "0.5"
//! ```
//!
//! Decimal fields accept strings or numbers. Strings keep values such as
//! `0.1` exact.

use std::fs;
use std::path::Path;

use alloyforge::Element;
use serde::Deserialize;

use crate::error::{CliError, Result};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    elements: Vec<Element>,
}

enum Format {
    Toml,
    Yaml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(Format::Toml),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => Err(CliError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Reads the elements of a catalog file, choosing the format by extension.
///
/// Elements are not validated here; that happens when the catalog is built.
pub fn load_elements(path: &Path) -> Result<Vec<Element>> {
    let format = format_of(path)?;
    let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: std::result::Result<CatalogFile, String> = match format {
        Format::Toml => toml::from_str(&contents).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
    };

    parsed
        .map(|file| file.elements)
        .map_err(|message| CliError::CatalogParsing {
            path: path.to_path_buf(),
            message,
        })
}
