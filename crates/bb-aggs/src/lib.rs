//! Named aggregation trees for search-engine request bodies.
//!
//! An [`AggregationBuilder`] maps aggregation names to typed entries. Each
//! entry may carry metadata and a nested tree of sub-aggregations, resolved
//! recursively under the entry's `aggs` key.
//!
//! # Example
//!
//! ```
//! use bb_aggs::AggregationBuilder;
//! use bb_query::Build;
//! use serde_json::json;
//!
//! let sales = AggregationBuilder::new().add("sales", "sum", "price");
//! let aggs = AggregationBuilder::new().add_nested(
//!     "per_month",
//!     "date_histogram",
//!     json!({"field": "date", "interval": "month"}),
//!     sales,
//! );
//!
//! assert_eq!(
//!     aggs.build(),
//!     json!({
//!         "per_month": {
//!             "date_histogram": {"field": "date", "interval": "month"},
//!             "aggs": {"sales": {"sum": {"field": "price"}}}
//!         }
//!     })
//! );
//! ```

#![warn(missing_docs)]

mod builder;
mod name;

pub use builder::{AggregationBuilder, SubAggregations};
pub use name::AggName;
