//! Recipe parsing.
//!
//! Parses TOML or JSON text into [`Recipe`] structures that mirror the
//! recipe schema exactly. Nothing is validated beyond the schema here; the
//! conversion into builders lives in `apply`.

use std::{fs, path::Path};

use bodybuilder::MinimumShouldMatch;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::RecipeError;

/// A complete request body recipe.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Recipe {
    /// The query tree.
    pub query: Option<QueryRecipe>,
    /// Top-level aggregations.
    pub aggs: Vec<AggRecipe>,
    /// Every other top-level key, copied into the body unchanged.
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}

/// A boolean clause tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryRecipe {
    /// `must` clauses.
    pub must: Vec<ClauseRecipe>,
    /// `filter` clauses.
    pub filter: Vec<ClauseRecipe>,
    /// `must_not` clauses.
    pub must_not: Vec<ClauseRecipe>,
    /// `should` clauses.
    pub should: Vec<ClauseRecipe>,
    /// Optional `minimum_should_match`, a count or an expression.
    pub minimum_should_match: Option<MinimumShouldMatch>,
    /// Optional `boost`.
    pub boost: Option<f64>,
}

/// One clause.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClauseRecipe {
    /// Clause type, e.g. `term` or `nested`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Positional arguments, dispatched like builder arguments.
    #[serde(default)]
    pub args: Vec<Value>,
    /// Nested query, passed as the positional argument after `args`.
    #[serde(default)]
    pub query: Option<Box<QueryRecipe>>,
}

/// One named aggregation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggRecipe {
    /// Entry name.
    pub name: String,
    /// Aggregation type, e.g. `terms` or `avg`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Field shorthand for `spec = { field = .. }`.
    pub field: Option<String>,
    /// Explicit spec; takes precedence over `field`.
    pub spec: Option<Value>,
    /// Metadata emitted under `meta`.
    pub meta: Option<Value>,
    /// Sub-aggregations.
    #[serde(default)]
    pub aggs: Vec<AggRecipe>,
}

/// Text format of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFormat {
    /// TOML.
    Toml,
    /// JSON.
    Json,
}

impl RecipeFormat {
    /// Picks the format from a file extension (`.toml` or `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Parses a recipe file, choosing the format from its extension.
pub fn parse_recipe_file(path: &Path) -> Result<Recipe, RecipeError> {
    let format = RecipeFormat::from_path(path).ok_or_else(|| RecipeError::UnknownFormat {
        path: path.to_path_buf(),
    })?;
    let contents = fs::read_to_string(path).map_err(|source| RecipeError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_recipe_str(&contents, format)
}

/// Parses a recipe from text in the given format.
pub fn parse_recipe_str(contents: &str, format: RecipeFormat) -> Result<Recipe, RecipeError> {
    match format {
        RecipeFormat::Toml => {
            toml::from_str(contents).map_err(|source| RecipeError::ParseToml { source })
        }
        RecipeFormat::Json => {
            serde_json::from_str(contents).map_err(|source| RecipeError::ParseJson { source })
        }
    }
}
