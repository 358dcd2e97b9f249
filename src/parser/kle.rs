//! KLE JSON parser and writer.
//!
//! A KLE layout is a JSON array. Object elements at the top level are
//! layout metadata; array elements are rows. Inside a row, objects update
//! the pending key properties and the persistent style settings, and
//! strings emit a key with that legend text.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, trace};

use crate::error::{json_kind, KleError, Result};
use crate::models::{Keyboard, KeyProperties};

/// Builds a keyboard from an already-decoded KLE JSON value.
///
/// # Errors
///
/// - [`KleError::LegendOverflow`] if a key has more than 12 legends
/// - [`KleError::Conversion`] if a recognized field has the wrong type
/// - [`KleError::UnexpectedItem`] if the layout, a row or a row item has
///   the wrong JSON kind
/// - [`KleError::InvalidSpacing`] if `spacing` is not positive
pub fn parse_kle_value(layout: &Value, spacing: f64) -> Result<Keyboard> {
    let rows = layout.as_array().ok_or_else(|| KleError::UnexpectedItem {
        context: "layout root".to_string(),
        found: json_kind(layout),
    })?;

    let mut keyboard = Keyboard::new(spacing)?;
    // Pending per-key properties survive the end of a row: an object at
    // the end of one row applies to the first key of the next.
    let mut props = KeyProperties::default();

    for (index, row) in rows.iter().enumerate() {
        match row {
            Value::Object(obj) => {
                trace!(fields = obj.len(), "Merging layout metadata");
                keyboard.merge_metadata(obj);
            }
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(text) => {
                            keyboard.add_key(&props, text)?;
                            props = KeyProperties::default();
                        }
                        Value::Object(obj) => {
                            props = apply_property_object(&mut keyboard, obj)?;
                        }
                        other => {
                            return Err(KleError::UnexpectedItem {
                                context: format!("layout row {index}"),
                                found: json_kind(other),
                            });
                        }
                    }
                }
                keyboard.add_row();
            }
            other => {
                return Err(KleError::UnexpectedItem {
                    context: format!("layout element {index}"),
                    found: json_kind(other),
                });
            }
        }
    }

    info!(
        keys = keyboard.key_count(),
        rows = keyboard.row(),
        "Parsed KLE layout"
    );
    Ok(keyboard)
}

/// Handles a property object inside a row and returns the new pending
/// per-key properties.
fn apply_property_object(keyboard: &mut Keyboard, obj: &Map<String, Value>) -> Result<KeyProperties> {
    let props = KeyProperties::from_json(obj)?;
    keyboard.global_props_mut().update(obj)?;

    // A new rotation origin starts a fresh local frame.
    if obj.contains_key("rx") {
        keyboard.reset_x();
    }
    if obj.contains_key("ry") {
        keyboard.reset_y();
    }
    Ok(props)
}

/// Parses KLE JSON text.
pub fn parse_kle_str(text: &str, spacing: f64) -> Result<Keyboard> {
    let layout: Value = serde_json::from_str(text)?;
    parse_kle_value(&layout, spacing)
}

/// Reads and parses a KLE JSON file.
///
/// # Errors
///
/// [`KleError::Io`] if the file cannot be read, [`KleError::Json`] if it is
/// not valid JSON, and any error of [`parse_kle_value`].
pub fn parse_kle_file(path: &Path, spacing: f64) -> Result<Keyboard> {
    debug!(path = %path.display(), spacing, "Reading KLE layout");
    let content = fs::read_to_string(path).map_err(|source| KleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_kle_str(&content, spacing)
}

/// Serializes a keyboard to KLE JSON text.
pub fn to_kle_string(keyboard: &Keyboard, pretty: bool) -> Result<String> {
    let json = keyboard.to_json();
    let text = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(text)
}

/// Writes a keyboard to a KLE JSON file.
pub fn save_kle_file(keyboard: &Keyboard, path: &Path, pretty: bool) -> Result<()> {
    let mut text = to_kle_string(keyboard, pretty)?;
    text.push('\n');
    fs::write(path, text).map_err(|source| KleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), keys = keyboard.key_count(), "Wrote KLE layout");
    Ok(())
}
