//! Composition of the query and aggregation trees into one request body.

use bb_aggs::{AggName, AggregationBuilder, SubAggregations};
use bb_query::{Build, ClauseArgs, MinimumShouldMatch, QueryBuilder};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Initial content of the query tree.
#[derive(Debug, Clone, PartialEq)]
pub enum QuerySeed {
    /// A pre-built query: an object or an array of objects.
    Spec(Value),
    /// Another builder, whose built output seeds the new tree.
    Builder(QueryBuilder),
}

impl Default for QuerySeed {
    fn default() -> Self {
        Self::Spec(Value::Null)
    }
}

impl From<Value> for QuerySeed {
    fn from(value: Value) -> Self {
        Self::Spec(value)
    }
}

impl From<QueryBuilder> for QuerySeed {
    fn from(builder: QueryBuilder) -> Self {
        Self::Builder(builder)
    }
}

impl QuerySeed {
    /// Creates the query tree for this seed.
    fn into_builder(self) -> QueryBuilder {
        match self {
            Self::Spec(value) => QueryBuilder::from_spec(value),
            Self::Builder(builder) => QueryBuilder::from_spec(builder.build()),
        }
    }
}

/// Initial content of the aggregation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AggsSeed {
    /// A pre-built map of named aggregation entries.
    Spec(Value),
    /// Another builder, whose built output seeds the new tree.
    Builder(AggregationBuilder),
}

impl Default for AggsSeed {
    fn default() -> Self {
        Self::Spec(Value::Null)
    }
}

impl From<Value> for AggsSeed {
    fn from(value: Value) -> Self {
        Self::Spec(value)
    }
}

impl From<AggregationBuilder> for AggsSeed {
    fn from(builder: AggregationBuilder) -> Self {
        Self::Builder(builder)
    }
}

impl AggsSeed {
    /// Creates the aggregation tree for this seed.
    fn into_builder(self) -> AggregationBuilder {
        match self {
            Self::Spec(value) => AggregationBuilder::from_spec(value),
            Self::Builder(builder) => AggregationBuilder::from_spec(builder.build()),
        }
    }
}

/// A request body: a query tree, an aggregation tree, and passthrough fields.
///
/// The clause and aggregation methods of both trees are available directly
/// on the body and chain the same way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyBuilder {
    /// Tree emitted under `query`.
    query: QueryBuilder,
    /// Tree emitted under `aggs`.
    aggs: AggregationBuilder,
    /// Other top-level fields, copied into the body as given.
    passthrough: Map<String, Value>,
}

impl BodyBuilder {
    /// Creates an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a body from seeds for both trees and a set of passthrough
    /// fields.
    ///
    /// Builder seeds are built first and their output re-seeds fresh trees,
    /// so passing an existing builder never double-wraps it.
    pub fn with_parts(
        query: impl Into<QuerySeed>,
        aggs: impl Into<AggsSeed>,
        passthrough: Map<String, Value>,
    ) -> Self {
        Self {
            query: query.into().into_builder(),
            aggs: aggs.into().into_builder(),
            passthrough,
        }
    }

    /// Creates a body that takes ownership of two existing trees as they are.
    pub fn from_builders(query: QueryBuilder, aggs: AggregationBuilder) -> Self {
        Self {
            query,
            aggs,
            passthrough: Map::new(),
        }
    }

    /// Creates a body from a pre-built body object.
    ///
    /// `query` and `aggs` seed the two trees; every other key is kept as a
    /// passthrough field. A non-object seed yields an empty body.
    pub fn from_spec(seed: Value) -> Self {
        let Value::Object(mut fields) = seed else {
            return Self::default();
        };
        let query = fields.remove("query").unwrap_or(Value::Null);
        let aggs = fields.remove("aggs").unwrap_or(Value::Null);
        Self::with_parts(query, aggs, fields)
    }

    /// The query tree.
    pub fn query(&self) -> &QueryBuilder {
        &self.query
    }

    /// The aggregation tree.
    pub fn aggs(&self) -> &AggregationBuilder {
        &self.aggs
    }

    /// Applies `f` to the query tree.
    pub fn map_query(mut self, f: impl FnOnce(QueryBuilder) -> QueryBuilder) -> Self {
        self.query = f(self.query);
        self
    }

    /// Applies `f` to the aggregation tree.
    pub fn map_aggs(
        mut self,
        f: impl FnOnce(AggregationBuilder) -> AggregationBuilder,
    ) -> Self {
        self.aggs = f(self.aggs);
        self
    }

    /// Sets a passthrough field.
    ///
    /// `query` and `aggs` are always taken from the trees when the body is
    /// built, so setting either key here has no effect on the output.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.passthrough.insert(key.into(), value.into());
        self
    }

    /// Adds a `must` clause to the query tree.
    pub fn must(self, kind: impl Into<String>, args: impl Into<ClauseArgs>) -> Self {
        self.map_query(|q| q.must(kind, args))
    }

    /// Adds a `filter` clause to the query tree.
    pub fn filter(self, kind: impl Into<String>, args: impl Into<ClauseArgs>) -> Self {
        self.map_query(|q| q.filter(kind, args))
    }

    /// Adds a `must_not` clause to the query tree.
    pub fn must_not(self, kind: impl Into<String>, args: impl Into<ClauseArgs>) -> Self {
        self.map_query(|q| q.must_not(kind, args))
    }

    /// Adds a `should` clause to the query tree.
    pub fn should(self, kind: impl Into<String>, args: impl Into<ClauseArgs>) -> Self {
        self.map_query(|q| q.should(kind, args))
    }

    /// Sets `minimum_should_match` on the query tree.
    pub fn minimum_should_match(self, value: impl Into<MinimumShouldMatch>) -> Self {
        self.map_query(|q| q.minimum_should_match(value))
    }

    /// Sets `boost` on the query tree.
    pub fn boost(self, boost: f64) -> Self {
        self.map_query(|q| q.boost(boost))
    }

    /// Adds an aggregation to the aggregation tree.
    pub fn aggregation(
        self,
        name: impl Into<AggName>,
        kind: impl Into<String>,
        field_or_spec: impl Into<Value>,
    ) -> Self {
        self.map_aggs(|a| a.add(name, kind, field_or_spec))
    }

    /// Adds an aggregation with sub-aggregations to the aggregation tree.
    pub fn nested_aggregation(
        self,
        name: impl Into<AggName>,
        kind: impl Into<String>,
        field_or_spec: impl Into<Value>,
        sub_aggs: impl Into<SubAggregations>,
    ) -> Self {
        self.map_aggs(|a| a.add_nested(name, kind, field_or_spec, sub_aggs))
    }

    /// Alias of [`Build::build`].
    pub fn to_json(&self) -> Value {
        self.build()
    }
}

impl Build for BodyBuilder {
    /// Builds `{ "query": .., "aggs": .., ..passthrough }`.
    fn build(&self) -> Value {
        let mut body = self.passthrough.clone();
        body.insert("query".to_string(), self.query.build());
        body.insert("aggs".to_string(), self.aggs.build());
        Value::Object(body)
    }
}

impl Serialize for BodyBuilder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.build().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_body() {
        assert_eq!(
            BodyBuilder::new().build(),
            json!({"query": {"bool": {}}, "aggs": {}})
        );
    }

    #[test]
    fn passthrough_cannot_shadow_trees() {
        let body = BodyBuilder::new()
            .must("match_all", ())
            .set("query", json!("ignored"))
            .set("size", json!(5));
        assert_eq!(
            body.build(),
            json!({"query": {"match_all": {}}, "aggs": {}, "size": 5})
        );
    }

    #[test]
    fn builder_seed_is_not_double_wrapped() {
        let query = QueryBuilder::new()
            .filter("term", ("user", "kimchy"))
            .minimum_should_match(1);
        let expected = query.build();
        let body = BodyBuilder::with_parts(query, AggsSeed::default(), Map::new());
        assert_eq!(body.build()["query"], expected);
    }

    #[test]
    fn aggs_builder_seed() {
        let aggs = AggregationBuilder::new().add("a", "avg", "x");
        let body = BodyBuilder::with_parts(QuerySeed::default(), aggs, Map::new());
        assert_eq!(body.build()["aggs"], json!({"a": {"avg": {"field": "x"}}}));
        assert_eq!(body.aggs().len(), 1);
    }

    #[test]
    fn from_spec_splits_passthrough() {
        let body = BodyBuilder::from_spec(json!({
            "query": {"term": {"user": "kimchy"}},
            "aggs": {"a": {"avg": {"field": "x"}}},
            "size": 10,
            "sort": ["_score"]
        }));
        assert_eq!(
            body.build(),
            json!({
                "query": {"term": {"user": "kimchy"}},
                "aggs": {"a": {"avg": {"field": "x"}}},
                "size": 10,
                "sort": ["_score"]
            })
        );
    }

    #[test]
    fn from_spec_rebuild_is_stable() {
        let built = BodyBuilder::new()
            .should("term", ("a", 1))
            .should("term", ("b", 2))
            .aggregation(("x", json!({"m": 1})), "terms", "c")
            .build();
        assert_eq!(BodyBuilder::from_spec(built.clone()).build(), built);
    }

    #[test]
    fn serialize_and_to_json_agree() {
        let body = BodyBuilder::new().must("term", ("a", 1));
        assert_eq!(serde_json::to_value(&body).unwrap(), body.to_json());
    }

    #[test]
    fn seeded_query_keeps_accepting_clauses() {
        let body = BodyBuilder::from_spec(json!({"query": {"match_all": {}}}))
            .filter("term", ("a", 1));
        assert_eq!(
            body.query().build(),
            json!({"bool": {"must": {"match_all": {}}, "filter": {"term": {"a": 1}}}})
        );
    }
}
