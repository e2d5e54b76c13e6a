//! The boolean clause tree.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{args::ClauseArgs, build::Build, condition::Condition, spec};

/// One of the four boolean clause groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseGroup {
    /// Clauses that must match and contribute to the score.
    Must,
    /// Clauses that must match without scoring.
    Filter,
    /// Clauses that must not match.
    MustNot,
    /// Clauses that should match.
    Should,
}

impl ClauseGroup {
    /// All groups, in serialization order.
    pub const ALL: [Self; 4] = [Self::Must, Self::Filter, Self::MustNot, Self::Should];

    /// Wire name of the group.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::Filter => "filter",
            Self::MustNot => "must_not",
            Self::Should => "should",
        }
    }
}

impl fmt::Display for ClauseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key under which the `must` group is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimaryKey {
    /// `must`, used at the query root.
    #[default]
    Must,
    /// `query`, used when the tree is nested inside another clause.
    Query,
}

impl PrimaryKey {
    /// Wire name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::Query => "query",
        }
    }
}

/// Threshold of `should` clauses that have to match.
///
/// Either a plain count or an engine expression such as `"75%"` or
/// `"2<-25% 9<-3"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinimumShouldMatch {
    /// An absolute number of clauses.
    Count(i64),
    /// A percentage or combination expression.
    Expr(String),
}

impl MinimumShouldMatch {
    /// Converts the threshold to its JSON form.
    fn to_value(&self) -> Value {
        match self {
            Self::Count(count) => Value::from(*count),
            Self::Expr(expr) => Value::String(expr.clone()),
        }
    }
}

impl From<i64> for MinimumShouldMatch {
    fn from(count: i64) -> Self {
        Self::Count(count)
    }
}

impl From<i32> for MinimumShouldMatch {
    fn from(count: i32) -> Self {
        Self::Count(count.into())
    }
}

impl From<u32> for MinimumShouldMatch {
    fn from(count: u32) -> Self {
        Self::Count(count.into())
    }
}

impl From<&str> for MinimumShouldMatch {
    fn from(expr: &str) -> Self {
        Self::Expr(expr.to_string())
    }
}

impl From<String> for MinimumShouldMatch {
    fn from(expr: String) -> Self {
        Self::Expr(expr)
    }
}

/// One entry of a clause group: clause types mapped to their conditions.
///
/// Entries added through the builder hold exactly one clause type. Entries
/// seeded from a pre-built specification keep every key of the seed object
/// together, so re-seeding a built query reproduces it.
#[derive(Debug, Clone, Default, PartialEq)]
struct Clause {
    /// `(clause type, condition)` pairs.
    conditions: Vec<(String, Condition)>,
}

impl Clause {
    /// Creates a single-type clause.
    fn new(kind: String, condition: Condition) -> Self {
        Self {
            conditions: vec![(kind, condition)],
        }
    }

    /// Creates a clause from one seed object.
    fn from_seed(seed: Map<String, Value>) -> Self {
        Self {
            conditions: seed
                .into_iter()
                .map(|(kind, raw)| (kind, Condition::from_seed(raw)))
                .collect(),
        }
    }

    /// Serializes the clause as `{ type: condition, .. }`.
    fn to_spec(&self) -> Value {
        Value::Object(
            self.conditions
                .iter()
                .map(|(kind, condition)| (kind.clone(), condition.to_spec()))
                .collect(),
        )
    }
}

/// Accumulates boolean clauses and serializes them into a query.
///
/// Builder methods consume and return the builder so calls chain. Nested
/// builders passed as clause arguments are moved in and owned by the clause;
/// they are serialized only when this builder is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    /// `must` group.
    must: Vec<Clause>,
    /// `filter` group.
    filter: Vec<Clause>,
    /// `must_not` group.
    must_not: Vec<Clause>,
    /// `should` group.
    should: Vec<Clause>,
    /// Optional `minimum_should_match`.
    minimum_should_match: Option<MinimumShouldMatch>,
    /// Optional `boost`.
    boost: Option<f64>,
}

impl QueryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded from a pre-built specification.
    ///
    /// `seed` may be an object or an array of objects; each object becomes
    /// one `must` entry whose keys are clause types. `null` seeds nothing.
    /// Other values and non-object array elements are ignored.
    pub fn from_spec(seed: Value) -> Self {
        let seeds = match seed {
            Value::Array(items) => items,
            other => vec![other],
        };

        let must = seeds
            .into_iter()
            .filter_map(|seed| match seed {
                Value::Object(map) => Some(Clause::from_seed(map)),
                _ => None,
            })
            .collect();

        Self {
            must,
            ..Self::default()
        }
    }

    /// Adds a clause to the `must` group.
    pub fn must(self, kind: impl Into<String>, args: impl Into<ClauseArgs>) -> Self {
        self.add_clause(ClauseGroup::Must, kind, args)
    }

    /// Adds a clause to the `filter` group.
    pub fn filter(self, kind: impl Into<String>, args: impl Into<ClauseArgs>) -> Self {
        self.add_clause(ClauseGroup::Filter, kind, args)
    }

    /// Adds a clause to the `must_not` group.
    pub fn must_not(self, kind: impl Into<String>, args: impl Into<ClauseArgs>) -> Self {
        self.add_clause(ClauseGroup::MustNot, kind, args)
    }

    /// Adds a clause to the `should` group.
    pub fn should(self, kind: impl Into<String>, args: impl Into<ClauseArgs>) -> Self {
        self.add_clause(ClauseGroup::Should, kind, args)
    }

    /// Adds a clause of type `kind` to `group`.
    ///
    /// Any clause type is accepted; arguments are dispatched immediately by
    /// [`ClauseArgs::resolve`].
    pub fn add_clause(
        mut self,
        group: ClauseGroup,
        kind: impl Into<String>,
        args: impl Into<ClauseArgs>,
    ) -> Self {
        let clause = Clause::new(kind.into(), args.into().resolve());
        self.group_mut(group).push(clause);
        self
    }

    /// Sets `minimum_should_match`, replacing any earlier value.
    pub fn minimum_should_match(mut self, value: impl Into<MinimumShouldMatch>) -> Self {
        self.minimum_should_match = Some(value.into());
        self
    }

    /// Sets `boost`, replacing any earlier value.
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Returns the number of entries in `group`.
    pub fn len(&self, group: ClauseGroup) -> usize {
        self.group(group).len()
    }

    /// Returns true when no clause or modifier has been set.
    pub fn is_empty(&self) -> bool {
        ClauseGroup::ALL.iter().all(|g| self.group(*g).is_empty())
            && self.minimum_should_match.is_none()
            && self.boost.is_none()
    }

    /// Builds the contents of the boolean wrapper.
    ///
    /// Empty groups are omitted, single-entry groups are emitted bare and
    /// larger groups as arrays in insertion order. The `must` group is
    /// emitted under `primary`. `minimum_should_match` and `boost` appear
    /// whenever they are set, even if every group is empty.
    pub fn build_bools(&self, primary: PrimaryKey) -> Map<String, Value> {
        let mut bools = Map::new();

        for group in ClauseGroup::ALL {
            let clauses = self.group(group);
            if clauses.is_empty() {
                continue;
            }
            let key = match group {
                ClauseGroup::Must => primary.as_str(),
                other => other.as_str(),
            };
            let built = clauses.iter().map(Clause::to_spec).collect();
            bools.insert(key.to_string(), spec::collapse(built));
        }

        if let Some(msm) = &self.minimum_should_match {
            bools.insert("minimum_should_match".to_string(), msm.to_value());
        }
        if let Some(boost) = self.boost {
            bools.insert("boost".to_string(), Value::from(boost));
        }

        bools
    }

    /// Returns the clauses of `group`.
    fn group(&self, group: ClauseGroup) -> &[Clause] {
        match group {
            ClauseGroup::Must => &self.must,
            ClauseGroup::Filter => &self.filter,
            ClauseGroup::MustNot => &self.must_not,
            ClauseGroup::Should => &self.should,
        }
    }

    /// Returns the mutable clause list of `group`.
    fn group_mut(&mut self, group: ClauseGroup) -> &mut Vec<Clause> {
        match group {
            ClauseGroup::Must => &mut self.must,
            ClauseGroup::Filter => &mut self.filter,
            ClauseGroup::MustNot => &mut self.must_not,
            ClauseGroup::Should => &mut self.should,
        }
    }
}

impl Build for QueryBuilder {
    /// Builds the query.
    ///
    /// When the only key is `must`, its value is returned unwrapped so a tree
    /// of plain top-level clauses needs no `bool` envelope. Otherwise the
    /// result is `{ "bool": { .. } }`.
    fn build(&self) -> Value {
        let mut bools = self.build_bools(PrimaryKey::Must);

        if bools.len() == 1 {
            if let Some(must) = bools.remove(PrimaryKey::Must.as_str()) {
                return must;
            }
        }

        spec::single("bool", Value::Object(bools))
    }
}

impl Serialize for QueryBuilder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.build().serialize(serializer)
    }
}
