//! A single clause condition.

use serde_json::{Map, Value};

use crate::{
    args::{Arg, ClauseArgs},
    spec,
};

/// The body of one clause occurrence, such as the `{ "user": "kimchy" }` in
/// `{ "term": { "user": "kimchy" } }`.
///
/// Conditions are created by [`ClauseArgs::resolve`] when a clause is added
/// and are not resolved into JSON until the owning tree is built, so nested
/// builders are always serialized in their final form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    /// Field the clause targets, if any.
    field: Option<String>,
    /// Clause value: scalar, array, object, or nested builder.
    value: Option<Arg>,
    /// Extra keys merged into the serialized condition.
    options: Option<Arg>,
}

impl Condition {
    /// Creates a condition from already-dispatched parts.
    pub(crate) fn new(field: Option<String>, value: Option<Arg>, options: Option<Arg>) -> Self {
        Self {
            field,
            value,
            options,
        }
    }

    /// Creates the condition for one entry of a pre-built specification.
    ///
    /// The raw value goes through the same dispatch as a one-argument clause,
    /// so a string is read as a field name and an object is kept as the value.
    pub fn from_seed(raw: Value) -> Self {
        ClauseArgs::new(Some(Arg::Spec(raw)), None, None).resolve()
    }

    /// Field the clause targets, if one was given.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Serializes the condition.
    ///
    /// - No field and no value: an empty object.
    /// - No field: an array value is returned verbatim and options are
    ///   ignored; otherwise the value (when an object) is merged with the
    ///   options.
    /// - A field and a value: `{ field: value, ..options }`.
    /// - A field without a value: `{ "field": field, ..options }`, which is
    ///   the shape `exists` and `missing` expect.
    pub fn to_spec(&self) -> Value {
        if self.field.is_none() && self.value.is_none() {
            return spec::empty();
        }

        let value = self.value.as_ref().map(Arg::resolve);
        let options = self.options.as_ref().map(Arg::resolve);
        let mut out = Map::new();

        match &self.field {
            None => {
                if let Some(Value::Array(items)) = value {
                    return Value::Array(items);
                }
                spec::spread(&mut out, value);
            }
            Some(field) => match value {
                Some(value) => {
                    out.insert(field.clone(), value);
                }
                None => {
                    out.insert("field".to_string(), Value::String(field.clone()));
                }
            },
        }

        spec::spread(&mut out, options);
        Value::Object(out)
    }
}
