//! Error types for recipe loading.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or applying a recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Failed to read a recipe file.
    #[error("failed to read recipe file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse a TOML recipe.
    #[error("failed to parse TOML recipe: {source}")]
    ParseToml {
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// Failed to parse a JSON recipe.
    #[error("failed to parse JSON recipe: {source}")]
    ParseJson {
        /// Underlying JSON parse error.
        source: serde_json::Error,
    },

    /// The file extension names no known recipe format.
    #[error("unrecognized recipe format for {path} (expected .toml or .json)")]
    UnknownFormat {
        /// Path whose extension was not recognized.
        path: PathBuf,
    },

    /// A clause has more positional arguments than a clause accepts.
    #[error("clause '{clause_type}' has {count} positional arguments, at most 3 are allowed")]
    TooManyArguments {
        /// Clause type of the offending clause.
        clause_type: String,
        /// Number of arguments, counting a nested query.
        count: usize,
    },

    /// An aggregation gives neither a field nor a spec.
    #[error("aggregation '{name}' needs either a field or a spec")]
    MissingFieldOrSpec {
        /// Name of the offending aggregation.
        name: String,
    },
}
