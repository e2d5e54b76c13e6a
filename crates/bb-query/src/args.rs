//! Positional clause arguments.
//!
//! A clause accepts up to three positional arguments whose meaning depends on
//! their types. [`ClauseArgs`] carries the raw slots and [`ClauseArgs::resolve`]
//! turns them into a [`Condition`] exactly once, when the clause is added.
//!
//! | call                                   | field     | value        | options          |
//! |----------------------------------------|-----------|--------------|------------------|
//! | `("user", "kimchy")`                   | `user`    | `"kimchy"`   | -                |
//! | `("type", "blog_tag", builder)`        | `type`    | `"blog_tag"` | builder          |
//! | `("user",)`                            | `user`    | -            | -                |
//! | `(json!({..}),)`                       | -         | object       | -                |
//! | `(json!({..}), builder)`               | -         | object       | builder          |
//! | `(json!({..}), json!({..}))`           | -         | object       | second object    |
//! | `(json!([..]),)`                       | -         | array        | -                |

use serde_json::Value;

use crate::{
    builder::{PrimaryKey, QueryBuilder},
    condition::Condition,
};

/// One positional clause argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A plain JSON value: a field name, a scalar, an array, or an object.
    Spec(Value),
    /// A nested clause tree, resolved with its `must` group under `query`.
    Query(QueryBuilder),
}

impl Arg {
    /// Resolves the argument into a plain specification.
    pub fn resolve(&self) -> Value {
        match self {
            Self::Spec(value) => value.clone(),
            Self::Query(builder) => Value::Object(builder.build_bools(PrimaryKey::Query)),
        }
    }

    /// Returns true for JSON objects and nested builders.
    ///
    /// These are the arguments that can stand in as clause options.
    fn is_options_like(&self) -> bool {
        matches!(self, Self::Query(_) | Self::Spec(Value::Object(_)))
    }
}

/// Implements `From<$ty> for Arg` via `serde_json::Value::from`.
macro_rules! spec_arg_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Spec(Value::from(value))
                }
            }
        )*
    };
}

spec_arg_from!(&str, String, bool, i32, i64, u32, u64, f32, f64, Value);

impl From<QueryBuilder> for Arg {
    fn from(builder: QueryBuilder) -> Self {
        Self::Query(builder)
    }
}

/// Up to three positional arguments for one clause.
///
/// Build one from `()`, a single string, value or builder, or a tuple of up
/// to three items convertible into [`Arg`]. A JSON `null` in any slot counts
/// as an absent argument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseArgs {
    /// Field name or value.
    first: Option<Arg>,
    /// Value or options.
    second: Option<Arg>,
    /// Options.
    third: Option<Arg>,
}

impl ClauseArgs {
    /// Creates arguments from explicit slots.
    pub fn new(first: Option<Arg>, second: Option<Arg>, third: Option<Arg>) -> Self {
        Self {
            first: present(first),
            second: present(second),
            third: present(third),
        }
    }

    /// Returns true when no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none() && self.third.is_none()
    }

    /// Decides what each slot means and produces the clause's condition.
    ///
    /// - A string in the first slot is the field name; the second slot is the
    ///   value and the third the options.
    /// - Otherwise the first slot is the value. The second slot becomes the
    ///   options when it is an object or a nested builder; any other second
    ///   argument is dropped and the third slot supplies the options.
    pub fn resolve(self) -> Condition {
        let Self {
            first,
            second,
            third,
        } = self;

        match first {
            Some(Arg::Spec(Value::String(field))) => Condition::new(Some(field), second, third),
            value => match second {
                Some(options) if options.is_options_like() => {
                    Condition::new(None, value, Some(options))
                }
                _ => Condition::new(None, value, third),
            },
        }
    }
}

/// Treats a JSON `null` the same as a missing argument.
fn present(arg: Option<Arg>) -> Option<Arg> {
    arg.filter(|arg| !matches!(arg, Arg::Spec(Value::Null)))
}

impl From<()> for ClauseArgs {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<&str> for ClauseArgs {
    fn from(first: &str) -> Self {
        Self::new(Some(first.into()), None, None)
    }
}

impl From<String> for ClauseArgs {
    fn from(first: String) -> Self {
        Self::new(Some(first.into()), None, None)
    }
}

impl From<Value> for ClauseArgs {
    fn from(first: Value) -> Self {
        Self::new(Some(first.into()), None, None)
    }
}

impl From<QueryBuilder> for ClauseArgs {
    fn from(first: QueryBuilder) -> Self {
        Self::new(Some(first.into()), None, None)
    }
}

impl<A: Into<Arg>> From<(A,)> for ClauseArgs {
    fn from((first,): (A,)) -> Self {
        Self::new(Some(first.into()), None, None)
    }
}

impl<A: Into<Arg>, B: Into<Arg>> From<(A, B)> for ClauseArgs {
    fn from((first, second): (A, B)) -> Self {
        Self::new(Some(first.into()), Some(second.into()), None)
    }
}

impl<A: Into<Arg>, B: Into<Arg>, C: Into<Arg>> From<(A, B, C)> for ClauseArgs {
    fn from((first, second, third): (A, B, C)) -> Self {
        Self::new(Some(first.into()), Some(second.into()), Some(third.into()))
    }
}
