//! bodybuilder: fluent request bodies for document-search engines.
//!
//! Combines a boolean clause tree ([`QueryBuilder`]) and an aggregation tree
//! ([`AggregationBuilder`]) into one request body, alongside any other
//! top-level fields such as `size` or `sort`. The result is a plain
//! [`serde_json::Value`] ready to hand to a search client.
//!
//! # Example
//!
//! ```
//! use bodybuilder::{BodyBuilder, Build};
//! use serde_json::json;
//!
//! let body = BodyBuilder::new()
//!     .must("match", ("message", "this is a test"))
//!     .filter("term", ("user", "kimchy"))
//!     .aggregation("by_user", "terms", "user")
//!     .set("size", json!(10));
//!
//! assert_eq!(
//!     body.build(),
//!     json!({
//!         "query": {
//!             "bool": {
//!                 "must": {"match": {"message": "this is a test"}},
//!                 "filter": {"term": {"user": "kimchy"}}
//!             }
//!         },
//!         "aggs": {"by_user": {"terms": {"field": "user"}}},
//!         "size": 10
//!     })
//! );
//! ```

#![warn(missing_docs)]

mod body;

pub use bb_aggs::{AggName, AggregationBuilder, SubAggregations};
pub use bb_query::{
    Arg, Build, ClauseArgs, ClauseGroup, Condition, MinimumShouldMatch, PrimaryKey, QueryBuilder,
    spec,
};
pub use body::{AggsSeed, BodyBuilder, QuerySeed};
