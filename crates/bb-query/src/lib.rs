//! Boolean clause trees for search-engine query bodies.
//!
//! A [`QueryBuilder`] accumulates typed clauses into the four boolean groups
//! (`must`, `filter`, `must_not`, `should`) and serializes them to the JSON
//! shape a document-search engine expects:
//!
//! - A lone `must` clause is emitted bare, with no `bool` wrapper.
//! - A group holding one clause is emitted as an object, several as an array.
//! - A builder nested inside another clause is emitted with its `must` group
//!   under `query`, for clauses such as `nested`, `has_child`, or
//!   `constant_score`.
//!
//! # Example
//!
//! ```
//! use bb_query::{Build, QueryBuilder};
//! use serde_json::json;
//!
//! let query = QueryBuilder::new()
//!     .must("match", ("message", "this is a test"))
//!     .filter("term", ("user", "kimchy"));
//!
//! assert_eq!(
//!     query.build(),
//!     json!({
//!         "bool": {
//!             "must": { "match": { "message": "this is a test" } },
//!             "filter": { "term": { "user": "kimchy" } }
//!         }
//!     })
//! );
//! ```

#![warn(missing_docs)]

mod args;
mod build;
mod builder;
mod condition;
pub mod spec;

pub use args::{Arg, ClauseArgs};
pub use build::Build;
pub use builder::{ClauseGroup, MinimumShouldMatch, PrimaryKey, QueryBuilder};
pub use condition::Condition;
