//! Declarative request bodies.
//!
//! A recipe describes a request body in TOML or JSON: boolean clauses with
//! their positional arguments, nested queries, named aggregations, and any
//! other top-level fields. Loading a recipe and turning it into a
//! [`BodyBuilder`](bodybuilder::BodyBuilder) goes through the same clause
//! dispatch as code that calls the builders directly.
//!
//! ```toml
//! size = 10
//!
//! [query]
//! minimum_should_match = 1
//!
//! [[query.must]]
//! type = "match"
//! args = ["message", "this is a test"]
//!
//! [[query.should]]
//! type = "term"
//! args = ["user", "kimchy"]
//!
//! [[aggs]]
//! name = "by_user"
//! type = "terms"
//! field = "user"
//! ```

#![warn(missing_docs)]

mod apply;
mod error;
mod parse;

pub use error::RecipeError;
pub use parse::{
    AggRecipe, ClauseRecipe, QueryRecipe, Recipe, RecipeFormat, parse_recipe_file,
    parse_recipe_str,
};
