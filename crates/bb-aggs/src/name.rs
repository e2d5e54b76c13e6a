//! Aggregation names with optional metadata.

use serde_json::Value;

/// The name of an aggregation entry, optionally paired with metadata.
///
/// Converts from a bare name or from a `(name, meta)` tuple. A `null` meta is
/// treated as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct AggName {
    /// Entry name, unique within one tree level.
    pub name: String,
    /// Metadata emitted under the entry's `meta` key.
    pub meta: Option<Value>,
}

impl AggName {
    /// Creates a name without metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meta: None,
        }
    }

    /// Attaches metadata.
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta).filter(|meta| !meta.is_null());
        self
    }
}

impl From<&str> for AggName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AggName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<(&str, Value)> for AggName {
    fn from((name, meta): (&str, Value)) -> Self {
        Self::new(name).with_meta(meta)
    }
}

impl From<(String, Value)> for AggName {
    fn from((name, meta): (String, Value)) -> Self {
        Self::new(name).with_meta(meta)
    }
}
