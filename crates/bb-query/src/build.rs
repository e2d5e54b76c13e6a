//! The capability shared by every builder in the workspace.

use serde_json::Value;

/// A builder that can be resolved into a JSON specification.
///
/// Implemented by the clause tree, the aggregation tree, and the composed
/// request body. Whether an argument is a nested builder is decided by its
/// type, never by inspecting the shape of a value.
pub trait Build {
    /// Resolves the accumulated state into a specification.
    ///
    /// Building never mutates the builder; calling it repeatedly yields the
    /// same result.
    fn build(&self) -> Value;

    /// Renders the built specification as compact JSON text.
    fn to_json_string(&self) -> String {
        self.build().to_string()
    }
}
