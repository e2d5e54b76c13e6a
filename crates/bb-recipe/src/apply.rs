//! Turning recipes into builders.

use bodybuilder::{
    AggName, AggregationBuilder, Arg, BodyBuilder, Build, ClauseArgs, ClauseGroup, QueryBuilder,
};
use serde_json::Value;

use crate::{
    RecipeError,
    parse::{AggRecipe, ClauseRecipe, QueryRecipe, Recipe},
};

/// Maximum number of positional arguments a clause accepts.
const MAX_CLAUSE_ARGS: usize = 3;

impl Recipe {
    /// Creates the body described by this recipe.
    pub fn to_body(&self) -> Result<BodyBuilder, RecipeError> {
        let query = match &self.query {
            Some(query) => query.to_builder()?,
            None => QueryBuilder::new(),
        };
        let aggs = aggs_to_builder(&self.aggs)?;

        let body = self
            .passthrough
            .iter()
            .fold(BodyBuilder::from_builders(query, aggs), |body, (key, value)| {
                body.set(key.as_str(), value.clone())
            });
        Ok(body)
    }

    /// Builds the body described by this recipe.
    pub fn build(&self) -> Result<Value, RecipeError> {
        Ok(self.to_body()?.build())
    }
}

impl QueryRecipe {
    /// Creates the clause tree described by this recipe.
    pub fn to_builder(&self) -> Result<QueryBuilder, RecipeError> {
        let groups = [
            (ClauseGroup::Must, &self.must),
            (ClauseGroup::Filter, &self.filter),
            (ClauseGroup::MustNot, &self.must_not),
            (ClauseGroup::Should, &self.should),
        ];

        let mut builder = QueryBuilder::new();
        for (group, clauses) in groups {
            for clause in clauses {
                builder = builder.add_clause(group, clause.kind.as_str(), clause.to_args()?);
            }
        }

        if let Some(msm) = &self.minimum_should_match {
            builder = builder.minimum_should_match(msm.clone());
        }
        if let Some(boost) = self.boost {
            builder = builder.boost(boost);
        }

        Ok(builder)
    }
}

impl ClauseRecipe {
    /// Collects the positional arguments, the nested query last.
    fn to_args(&self) -> Result<ClauseArgs, RecipeError> {
        let mut slots: Vec<Arg> = self.args.iter().cloned().map(Arg::Spec).collect();
        if let Some(nested) = &self.query {
            slots.push(Arg::Query(nested.to_builder()?));
        }

        if slots.len() > MAX_CLAUSE_ARGS {
            return Err(RecipeError::TooManyArguments {
                clause_type: self.kind.clone(),
                count: slots.len(),
            });
        }

        let mut slots = slots.into_iter();
        Ok(ClauseArgs::new(slots.next(), slots.next(), slots.next()))
    }
}

impl AggRecipe {
    /// Adds this entry, and its sub-aggregations, to `builder`.
    fn add_to(&self, builder: AggregationBuilder) -> Result<AggregationBuilder, RecipeError> {
        let spec = match (&self.spec, &self.field) {
            (Some(spec), _) => spec.clone(),
            (None, Some(field)) => Value::String(field.clone()),
            (None, None) => {
                return Err(RecipeError::MissingFieldOrSpec {
                    name: self.name.clone(),
                });
            }
        };

        let mut name = AggName::new(&self.name);
        if let Some(meta) = &self.meta {
            name = name.with_meta(meta.clone());
        }

        if self.aggs.is_empty() {
            return Ok(builder.add(name, self.kind.as_str(), spec));
        }
        let nested = aggs_to_builder(&self.aggs)?;
        Ok(builder.add_nested(name, self.kind.as_str(), spec, nested))
    }
}

/// Creates one aggregation level from a list of entries.
fn aggs_to_builder(recipes: &[AggRecipe]) -> Result<AggregationBuilder, RecipeError> {
    recipes
        .iter()
        .try_fold(AggregationBuilder::new(), |builder, recipe| recipe.add_to(builder))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{RecipeFormat, parse_recipe_str};

    fn toml(contents: &str) -> Recipe {
        parse_recipe_str(contents, RecipeFormat::Toml).unwrap()
    }

    #[test]
    fn empty_recipe_builds_empty_body() {
        assert_eq!(
            Recipe::default().build().unwrap(),
            json!({"query": {"bool": {}}, "aggs": {}})
        );
    }

    #[test]
    fn field_only_clause() {
        let recipe = toml("[[query.must]]\ntype = \"exists\"\nargs = [\"user\"]\n");
        assert_eq!(
            recipe.build().unwrap()["query"],
            json!({"exists": {"field": "user"}})
        );
    }

    #[test]
    fn nested_query_is_last_argument() {
        let recipe = toml(
            r#"
[[query.must]]
type = "has_child"
args = ["type", "blog_tag"]

[[query.must.query.must]]
type = "term"
args = ["tag", "something"]
"#,
        );
        assert_eq!(
            recipe.build().unwrap()["query"],
            json!({
                "has_child": {"type": "blog_tag", "query": {"term": {"tag": "something"}}}
            })
        );
    }

    #[test]
    fn too_many_arguments() {
        let recipe = toml(
            r#"
[[query.filter]]
type = "ids"
args = ["type", "my_ids", { values = ["1"] }]

[query.filter.query]
boost = 1.0
"#,
        );
        let err = recipe.build().unwrap_err();
        assert!(matches!(
            err,
            RecipeError::TooManyArguments { ref clause_type, count: 4 } if clause_type == "ids"
        ));
    }

    #[test]
    fn aggregation_needs_field_or_spec() {
        let recipe = toml("[[aggs]]\nname = \"x\"\ntype = \"avg\"\n");
        let err = recipe.build().unwrap_err();
        assert_eq!(err.to_string(), "aggregation 'x' needs either a field or a spec");
    }

    #[test]
    fn spec_wins_over_field() {
        let recipe = toml(
            "[[aggs]]\nname = \"x\"\ntype = \"avg\"\nfield = \"a\"\nspec = { field = \"b\" }\n",
        );
        assert_eq!(
            recipe.build().unwrap()["aggs"],
            json!({"x": {"avg": {"field": "b"}}})
        );
    }

    #[test]
    fn modifiers_are_applied() {
        let recipe = toml(
            r#"
[query]
minimum_should_match = 2
boost = 1.5

[[query.should]]
type = "term"
args = ["status", "alert"]

[[query.should]]
type = "term"
args = ["status", "normal"]
"#,
        );
        assert_eq!(
            recipe.build().unwrap()["query"],
            json!({
                "bool": {
                    "should": [
                        {"term": {"status": "alert"}},
                        {"term": {"status": "normal"}}
                    ],
                    "minimum_should_match": 2,
                    "boost": 1.5
                }
            })
        );
    }
}
