//! Error type for layout parsing and key geometry.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading, building or editing a KLE layout.
#[derive(Debug, Error)]
pub enum KleError {
    /// A key's legend text has more lines than there are legend slots.
    #[error("too many legends for key: got {got}, max is {max}")]
    LegendOverflow {
        /// Number of newline-separated legends found
        got: usize,
        /// Number of legend slots available
        max: usize,
    },

    /// A recognized field holds a value that cannot be coerced to its type.
    #[error("field '{field}' expected {expected}, found {found}")]
    Conversion {
        /// Field name as it appears in the JSON
        field: String,
        /// Description of the accepted type
        expected: &'static str,
        /// The offending JSON value
        found: String,
    },

    /// A row or row item has the wrong JSON kind.
    #[error("unexpected {found} in {context}")]
    UnexpectedItem {
        /// Where the item was found (e.g. "layout row 3")
        context: String,
        /// JSON kind of the item
        found: &'static str,
    },

    /// Spacing must be a positive, finite scale.
    #[error("invalid spacing {0}: must be positive and finite")]
    InvalidSpacing(f64),

    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A layout file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for layout operations.
pub type Result<T> = std::result::Result<T, KleError>;

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Checks that a spacing value can be used as a scale factor.
pub(crate) fn check_spacing(spacing: f64) -> Result<f64> {
    if spacing.is_finite() && spacing > 0.0 {
        Ok(spacing)
    } else {
        Err(KleError::InvalidSpacing(spacing))
    }
}
