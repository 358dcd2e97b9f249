//! Keyboard: the ordered key collection built from a KLE layout.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::DEFAULT_SPACING;
use crate::error::{check_spacing, Result};
use crate::models::key::Key;
use crate::models::point::{Point, Rect};
use crate::models::properties::{number, KbProperties, KeyProperties};

/// Axis a layout is mirrored across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAxis {
    /// Flip horizontally: x becomes -x
    X,
    /// Flip vertically: y becomes -y
    Y,
}

impl MirrorAxis {
    /// Component-wise factor applied to a key center.
    const fn factor(self) -> Point {
        match self {
            Self::X => Point::new(-1.0, 1.0),
            Self::Y => Point::new(1.0, -1.0),
        }
    }
}

impl FromStr for MirrorAxis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            other => Err(format!("invalid mirror axis '{other}': expected 'x' or 'y'")),
        }
    }
}

impl fmt::Display for MirrorAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// An ordered collection of keys plus the cursor state used to lay them out.
///
/// Keys are kept in creation order, which is also the traversal and
/// serialization order. Keys are only ever appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyboard {
    keys: Vec<Key>,
    col: usize,
    row: usize,
    global_props: KbProperties,
    cur_x: f64,
    cur_y: f64,
    spacing: f64,
    metadata: Map<String, Value>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            col: 0,
            row: 0,
            global_props: KbProperties::default(),
            cur_x: 0.0,
            cur_y: 0.0,
            spacing: DEFAULT_SPACING,
            metadata: Map::new(),
        }
    }
}

impl Keyboard {
    /// Creates an empty keyboard with the given drawing scale.
    pub fn new(spacing: f64) -> Result<Self> {
        Ok(Self {
            spacing: check_spacing(spacing)?,
            ..Self::default()
        })
    }

    /// Drawing units per layout unit.
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// All keys in creation order.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Mutable access to the keys for geometry and legend edits.
    pub fn keys_mut(&mut self) -> &mut [Key] {
        &mut self.keys
    }

    /// Gets a key by creation index.
    #[must_use]
    pub fn key(&self, index: usize) -> Option<&Key> {
        self.keys.get(index)
    }

    /// Gets the total number of keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no key has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Current cursor position in unit space.
    #[must_use]
    pub const fn cursor(&self) -> Point {
        Point::new(self.cur_x, self.cur_y)
    }

    /// Number of completed rows.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Number of keys added to the current row.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Moves the cursor.
    pub fn reset_pos(&mut self, u_x: f64, u_y: f64) {
        self.cur_x = u_x;
        self.cur_y = u_y;
    }

    /// Resets only the cursor's x coordinate.
    pub fn reset_x(&mut self) {
        self.cur_x = 0.0;
    }

    /// Resets only the cursor's y coordinate.
    pub fn reset_y(&mut self) {
        self.cur_y = 0.0;
    }

    /// Finishes the current row: the cursor moves to the start of the next line.
    pub fn add_row(&mut self) {
        self.cur_x = 0.0;
        self.cur_y += 1.0;
        self.col = 0;
        self.row += 1;
    }

    /// Running style and rotation settings applied to new keys.
    #[must_use]
    pub const fn global_props(&self) -> &KbProperties {
        &self.global_props
    }

    /// Mutable access to the running style settings.
    ///
    /// Changes only affect keys added afterwards.
    pub fn global_props_mut(&mut self) -> &mut KbProperties {
        &mut self.global_props
    }

    /// Layout metadata (name, author, background, ...).
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Mutable access to the layout metadata.
    pub fn metadata_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.metadata
    }

    /// Copies every field of `obj` into the metadata, overwriting existing ones.
    pub fn merge_metadata(&mut self, obj: &Map<String, Value>) {
        for (name, value) in obj {
            self.metadata.insert(name.clone(), value.clone());
        }
    }

    /// Adds a key at the cursor.
    ///
    /// The cursor first moves by `props.x`/`props.y`, the key is created
    /// there with a snapshot of the running [`KbProperties`], and the cursor
    /// then advances by the key's width. On error the keyboard is unchanged.
    pub fn add_key(&mut self, props: &KeyProperties, text: &str) -> Result<&Key> {
        let pos_x = self.cur_x + props.x;
        let pos_y = self.cur_y + props.y;

        let key = Key::new(
            pos_x,
            pos_y,
            props.w,
            props.h,
            text,
            &self.global_props,
            self.spacing,
        )?
        .with_shape(props);

        debug!(
            row = self.row,
            col = self.col,
            x = pos_x,
            y = pos_y,
            r = key.r(),
            legend = ?key.legend_str(),
            "Added key"
        );

        self.cur_x = pos_x + props.w;
        self.cur_y = pos_y;
        self.col += 1;
        self.keys.push(key);
        Ok(&self.keys[self.keys.len() - 1])
    }

    /// Mirrors every key across `axis`.
    ///
    /// Each key's center is reflected and its angle negated, so rotated keys
    /// stay in place relative to their mirrored neighbours. Mirroring twice
    /// across the same axis restores the layout.
    pub fn mirror(&mut self, axis: MirrorAxis) {
        let factor = axis.factor();
        for key in &mut self.keys {
            let center = key.center();
            key.set_center(factor.x * center.x, factor.y * center.y);
            key.set_angle(-key.r());
        }
        debug!(%axis, keys = self.keys.len(), "Mirrored layout");
    }

    /// Axis-aligned box enclosing all keys, or `None` for an empty keyboard.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        self.keys
            .iter()
            .map(Key::bounding_box)
            .reduce(Rect::union)
    }

    /// Serializes the layout as a KLE JSON array.
    ///
    /// Metadata (if any) comes first, followed by one `[properties, legends]`
    /// row per key. Each properties object carries the key's non-default
    /// geometry plus `r`, `rx` and `ry`, so every row re-parses to the same
    /// key on its own. Style fields are not written.
    ///
    /// JSON has no NaN or infinity, so a non-finite angle or size (possible
    /// when a layout gave it as a string such as `"nan"`) is left out of its
    /// key's properties object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut result = Vec::with_capacity(self.keys.len() + 1);

        if !self.metadata.is_empty() {
            result.push(Value::Object(self.metadata.clone()));
        }

        for key in &self.keys {
            let mut props = key.key_properties().to_json();
            if let Some(r) = number(key.r()) {
                props.insert("r".to_string(), r);
            }
            result.push(Value::Array(vec![
                Value::Object(props),
                Value::String(key.legend_str()),
            ]));
        }

        Value::Array(result)
    }
}
