//! The aggregation tree.

use std::collections::BTreeMap;

use bb_query::{Build, spec};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::name::AggName;

/// Sub-aggregations attached to an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SubAggregations {
    /// A nested tree, resolved recursively when the parent is built.
    Builder(AggregationBuilder),
    /// A pre-built map of named entries, emitted unchanged.
    Spec(Value),
}

impl SubAggregations {
    /// Resolves the sub-aggregations into a specification.
    fn resolve(&self) -> Value {
        match self {
            Self::Builder(builder) => builder.build(),
            Self::Spec(value) => value.clone(),
        }
    }
}

impl From<AggregationBuilder> for SubAggregations {
    fn from(builder: AggregationBuilder) -> Self {
        Self::Builder(builder)
    }
}

impl From<Value> for SubAggregations {
    fn from(value: Value) -> Self {
        Self::Spec(value)
    }
}

/// One named aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
struct AggregationEntry {
    /// Every key of the entry except `aggs`: the typed spec and `meta`.
    body: Map<String, Value>,
    /// Nested aggregations, emitted under `aggs`.
    aggs: Option<SubAggregations>,
}

impl AggregationEntry {
    /// Serializes the entry, resolving nested aggregations.
    fn to_spec(&self) -> Value {
        let mut out = self.body.clone();
        if let Some(aggs) = &self.aggs {
            out.insert("aggs".to_string(), aggs.resolve());
        }
        Value::Object(out)
    }
}

/// Accumulates named aggregations and serializes them into an `aggs` map.
///
/// Names are unique per level: adding an entry under an existing name
/// replaces it. Nested builders are moved into their parent entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationBuilder {
    /// Entries keyed by name.
    entries: BTreeMap<String, AggregationEntry>,
}

impl AggregationBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded from a pre-built map of named entries.
    ///
    /// Each entry's `aggs` key, when present, is kept as a pre-built
    /// sub-aggregation map. Entries that are not objects are skipped, as is
    /// any seed that is not an object.
    pub fn from_spec(seed: Value) -> Self {
        let Value::Object(seed) = seed else {
            return Self::default();
        };

        let entries = seed
            .into_iter()
            .filter_map(|(name, entry)| match entry {
                Value::Object(mut body) => {
                    let aggs = body
                        .remove("aggs")
                        .filter(|aggs| !aggs.is_null())
                        .map(SubAggregations::Spec);
                    Some((name, AggregationEntry { body, aggs }))
                }
                _ => None,
            })
            .collect();

        Self { entries }
    }

    /// Adds an aggregation of type `kind`.
    ///
    /// A string `field_or_spec` becomes `{ "field": .. }`; anything else is
    /// used as the spec unchanged.
    pub fn add(
        self,
        name: impl Into<AggName>,
        kind: impl Into<String>,
        field_or_spec: impl Into<Value>,
    ) -> Self {
        self.insert(name.into(), kind.into(), field_or_spec.into(), None)
    }

    /// Adds an aggregation with nested sub-aggregations.
    pub fn add_nested(
        self,
        name: impl Into<AggName>,
        kind: impl Into<String>,
        field_or_spec: impl Into<Value>,
        sub_aggs: impl Into<SubAggregations>,
    ) -> Self {
        let sub_aggs = match sub_aggs.into() {
            SubAggregations::Spec(Value::Null) => None,
            other => Some(other),
        };
        self.insert(name.into(), kind.into(), field_or_spec.into(), sub_aggs)
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entry has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true when an entry named `name` exists at this level.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Stores one entry, replacing any entry of the same name.
    fn insert(
        mut self,
        name: AggName,
        kind: String,
        field_or_spec: Value,
        aggs: Option<SubAggregations>,
    ) -> Self {
        let spec = match field_or_spec {
            Value::String(field) => spec::single("field", Value::String(field)),
            other => other,
        };

        let mut body = Map::new();
        body.insert(kind, spec);
        if let Some(meta) = name.meta {
            body.insert("meta".to_string(), meta);
        }

        self.entries
            .insert(name.name, AggregationEntry { body, aggs });
        self
    }
}

impl Build for AggregationBuilder {
    /// Builds the name-to-entry map, resolving nested trees recursively.
    fn build(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(name, entry)| (name.clone(), entry.to_spec()))
                .collect(),
        )
    }
}

impl Serialize for AggregationBuilder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.build().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_builds_empty_map() {
        assert_eq!(AggregationBuilder::new().build(), json!({}));
        assert!(AggregationBuilder::new().is_empty());
    }

    #[test]
    fn field_name_becomes_field_spec() {
        let aggs = AggregationBuilder::new().add("agg_avg_grade", "avg", "grade");
        assert_eq!(
            aggs.build(),
            json!({"agg_avg_grade": {"avg": {"field": "grade"}}})
        );
    }

    #[test]
    fn same_name_overwrites() {
        let aggs = AggregationBuilder::new()
            .add("x", "avg", "a")
            .add("x", "max", "b");
        assert_eq!(aggs.len(), 1);
        assert_eq!(aggs.build(), json!({"x": {"max": {"field": "b"}}}));
    }

    #[test]
    fn null_sub_aggs_are_ignored() {
        let aggs = AggregationBuilder::new().add_nested("x", "terms", "a", Value::Null);
        assert_eq!(aggs.build(), json!({"x": {"terms": {"field": "a"}}}));
    }

    #[test]
    fn seed_keeps_prebuilt_sub_aggs() {
        let seed = json!({
            "outer": {
                "terms": {"field": "a"},
                "meta": {"k": 1},
                "aggs": {"inner": {"avg": {"field": "b"}}}
            }
        });
        let aggs = AggregationBuilder::from_spec(seed.clone());
        assert!(aggs.contains("outer"));
        assert_eq!(aggs.build(), seed);
    }

    #[test]
    fn seed_skips_non_objects() {
        let aggs = AggregationBuilder::from_spec(json!({"bad": 3, "ok": {"avg": {}}}));
        assert_eq!(aggs.len(), 1);
        assert!(AggregationBuilder::from_spec(json!([1, 2])).is_empty());
    }

    #[test]
    fn serializes_as_built_map() {
        let aggs = AggregationBuilder::new().add("a", "sum", "x");
        assert_eq!(
            serde_json::to_value(&aggs).unwrap(),
            json!({"a": {"sum": {"field": "x"}}})
        );
    }
}
