//! Per-key and keyboard-wide property snapshots.
//!
//! KLE property objects carry two kinds of fields. Positional deltas and
//! shape flags (`x`, `w`, `d`, ...) apply only to the next key and are
//! captured in [`KeyProperties`]. Style and rotation fields (`c`, `r`,
//! `rx`, ...) persist until overwritten and are captured in
//! [`KbProperties`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{KleError, Result};

/// Default keycap colour.
pub const DEFAULT_KEYCAP_COLOR: &str = "#ffffff";
/// Default legend colour.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
/// Default font index for both primary and secondary legends.
pub const DEFAULT_FONT_SIZE: i64 = 3;

/// Positional deltas and shape flags for a single key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyProperties {
    /// X offset from the cursor, in units
    pub x: f64,
    /// Y offset from the cursor, in units
    pub y: f64,
    /// Width in units
    pub w: f64,
    /// Height in units
    pub h: f64,
    /// Secondary rectangle X offset (ISO enter, big-ass enter)
    pub x2: Option<f64>,
    /// Secondary rectangle Y offset
    pub y2: Option<f64>,
    /// Secondary rectangle width
    pub w2: Option<f64>,
    /// Secondary rectangle height
    pub h2: Option<f64>,
    /// Rotation origin X; only set when a key reports its own properties
    pub rx: Option<f64>,
    /// Rotation origin Y; only set when a key reports its own properties
    pub ry: Option<f64>,
    /// Stepped keycap
    pub stepped: bool,
    /// Homing nub
    pub homing: bool,
    /// Decal (label only, no keycap)
    pub decal: bool,
}

impl Default for KeyProperties {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
            x2: None,
            y2: None,
            w2: None,
            h2: None,
            rx: None,
            ry: None,
            stepped: false,
            homing: false,
            decal: false,
        }
    }
}

impl KeyProperties {
    /// Reads the per-key fields of a KLE property object.
    ///
    /// Missing fields keep their defaults; unknown fields are ignored.
    pub fn from_json(obj: &Map<String, Value>) -> Result<Self> {
        let mut props = Self::default();
        if let Some(v) = obj.get("x") {
            props.x = coerce_f64("x", v)?;
        }
        if let Some(v) = obj.get("y") {
            props.y = coerce_f64("y", v)?;
        }
        if let Some(v) = obj.get("w") {
            props.w = coerce_f64("w", v)?;
        }
        if let Some(v) = obj.get("h") {
            props.h = coerce_f64("h", v)?;
        }
        if let Some(v) = obj.get("x2") {
            props.x2 = Some(coerce_f64("x2", v)?);
        }
        if let Some(v) = obj.get("y2") {
            props.y2 = Some(coerce_f64("y2", v)?);
        }
        if let Some(v) = obj.get("w2") {
            props.w2 = Some(coerce_f64("w2", v)?);
        }
        if let Some(v) = obj.get("h2") {
            props.h2 = Some(coerce_f64("h2", v)?);
        }
        if let Some(v) = obj.get("d") {
            props.decal = truthy(v);
        }
        if let Some(v) = obj.get("l") {
            props.stepped = truthy(v);
        }
        if let Some(v) = obj.get("n") {
            props.homing = truthy(v);
        }
        Ok(props)
    }

    /// Writes the fields that differ from their defaults.
    ///
    /// `rx`/`ry` are written whenever they are set.
    #[must_use]
    pub fn to_json(&self) -> Map<String, Value> {
        let mut obj = Map::new();
        let mut put = |name: &str, value: f64| {
            if let Some(value) = number(value) {
                obj.insert(name.to_string(), value);
            }
        };

        if self.x != 0.0 {
            put("x", self.x);
        }
        if self.y != 0.0 {
            put("y", self.y);
        }
        if self.w != 1.0 {
            put("w", self.w);
        }
        if self.h != 1.0 {
            put("h", self.h);
        }
        for (name, value) in [
            ("x2", self.x2),
            ("y2", self.y2),
            ("w2", self.w2),
            ("h2", self.h2),
            ("rx", self.rx),
            ("ry", self.ry),
        ] {
            if let Some(value) = value {
                put(name, value);
            }
        }

        for (name, flag) in [("d", self.decal), ("l", self.stepped), ("n", self.homing)] {
            if flag {
                obj.insert(name.to_string(), Value::Bool(true));
            }
        }
        obj
    }
}

/// Style and rotation settings that persist across keys until overwritten.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KbProperties {
    /// Keycap colour (`c`)
    pub bg: String,
    /// Legend colour (`t`)
    pub fg: String,
    /// Ghosted keycap (`g`)
    pub ghosted: bool,
    /// Legend alignment flags (`a`)
    pub text_alignment: Option<i64>,
    /// Primary legend font index (`f`)
    pub font_primary: i64,
    /// Secondary legend font index (`f2`)
    pub font_secondary: i64,
    /// Keycap profile name (`p`)
    pub profile: Option<String>,
    /// Rotation angle in degrees (`r`)
    pub r: f64,
    /// Rotation origin X in units (`rx`)
    pub rx: f64,
    /// Rotation origin Y in units (`ry`)
    pub ry: f64,
}

impl Default for KbProperties {
    fn default() -> Self {
        Self {
            bg: DEFAULT_KEYCAP_COLOR.to_string(),
            fg: DEFAULT_TEXT_COLOR.to_string(),
            ghosted: false,
            text_alignment: None,
            font_primary: DEFAULT_FONT_SIZE,
            font_secondary: DEFAULT_FONT_SIZE,
            profile: None,
            r: 0.0,
            rx: 0.0,
            ry: 0.0,
        }
    }
}

impl KbProperties {
    /// Merges the style and rotation fields present in `obj`.
    ///
    /// Fields absent from `obj` keep their current value. On a conversion
    /// error the fields before the failing one have already been applied.
    pub fn update(&mut self, obj: &Map<String, Value>) -> Result<()> {
        if let Some(v) = obj.get("c") {
            self.bg = text(v);
        }
        if let Some(v) = obj.get("t") {
            self.fg = text(v);
        }
        if let Some(v) = obj.get("g") {
            self.ghosted = truthy(v);
        }
        if let Some(v) = obj.get("a") {
            self.text_alignment = Some(coerce_i64("a", v)?);
        }
        if let Some(v) = obj.get("f") {
            self.font_primary = coerce_i64("f", v)?;
        }
        if let Some(v) = obj.get("f2") {
            self.font_secondary = coerce_i64("f2", v)?;
        }
        if let Some(v) = obj.get("p") {
            self.profile = Some(text(v));
        }
        if let Some(v) = obj.get("r") {
            self.r = coerce_f64("r", v)?;
        }
        if let Some(v) = obj.get("rx") {
            self.rx = coerce_f64("rx", v)?;
        }
        if let Some(v) = obj.get("ry") {
            self.ry = coerce_f64("ry", v)?;
        }
        Ok(())
    }
}

/// Encodes a float as a JSON number, writing integral values without a
/// fractional part so that `2.0` round-trips as `2`.
///
/// NaN and infinities have no JSON form and yield `None`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn number(value: f64) -> Option<Value> {
    if !value.is_finite() {
        None
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        Some(Value::from(value as i64))
    } else {
        serde_json::Number::from_f64(value).map(Value::Number)
    }
}

fn conversion(field: &str, expected: &'static str, found: &Value) -> KleError {
    KleError::Conversion {
        field: field.to_string(),
        expected,
        found: found.to_string(),
    }
}

fn coerce_f64(field: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| conversion(field, "a number", value))
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_i64(field: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| conversion(field, "an integer", value))
}

/// Truthiness: `null`, `false`, zero and empty strings, arrays or objects
/// are false; everything else is true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Strings are taken as-is; any other value is rendered as JSON text.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_key_properties_defaults() {
        let props = KeyProperties::default();
        assert_eq!((props.x, props.y, props.w, props.h), (0.0, 0.0, 1.0, 1.0));
        assert!(props.x2.is_none());
        assert!(!props.decal && !props.stepped && !props.homing);
    }

    #[test]
    fn test_key_properties_from_json() {
        let props = KeyProperties::from_json(&obj(json!({
            "x": 0.25, "w": 1.5, "h": 2, "x2": -0.25, "w2": 1.5, "h2": 1,
            "d": true, "l": true, "n": 1, "c": "#ff0000"
        })))
        .unwrap();
        assert_eq!(props.x, 0.25);
        assert_eq!(props.y, 0.0);
        assert_eq!(props.w, 1.5);
        assert_eq!(props.h, 2.0);
        assert_eq!(props.x2, Some(-0.25));
        assert_eq!(props.y2, None);
        assert_eq!(props.w2, Some(1.5));
        assert_eq!(props.h2, Some(1.0));
        assert!(props.decal && props.stepped && props.homing);
    }

    #[test]
    fn test_key_properties_numeric_string() {
        let props = KeyProperties::from_json(&obj(json!({"w": "2.25"}))).unwrap();
        assert_eq!(props.w, 2.25);
    }

    #[test]
    fn test_key_properties_rejects_non_numeric() {
        let err = KeyProperties::from_json(&obj(json!({"w": "wide"}))).unwrap_err();
        match err {
            KleError::Conversion { field, .. } => assert_eq!(field, "w"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(KeyProperties::from_json(&obj(json!({"x": [1]}))).is_err());
        assert!(KeyProperties::from_json(&obj(json!({"y": null}))).is_err());
    }

    #[test]
    fn test_booleans_coerce_numbers() {
        let props = KeyProperties::from_json(&obj(json!({"w": true, "h": false, "x": "1.5"}))).unwrap();
        assert_eq!(props.w, 1.0);
        assert_eq!(props.h, 0.0);
        assert_eq!(props.x, 1.5);

        let mut kb = KbProperties::default();
        kb.update(&obj(json!({"a": true, "f": false}))).unwrap();
        assert_eq!(kb.text_alignment, Some(1));
        assert_eq!(kb.font_primary, 0);
        assert!(kb.update(&obj(json!({"f2": "4.5"}))).is_err());
        assert!(kb.update(&obj(json!({"f2": null}))).is_err());
    }

    #[test]
    fn test_flags_use_truthiness() {
        let props = KeyProperties::from_json(&obj(json!({"d": "yes", "l": [0], "n": {"a": 1}}))).unwrap();
        assert!(props.decal && props.stepped && props.homing);

        let props = KeyProperties::from_json(&obj(json!({"d": "", "l": [], "n": {}}))).unwrap();
        assert!(!props.decal && !props.stepped && !props.homing);

        let props = KeyProperties::from_json(&obj(json!({"d": null, "l": 0, "n": 0.5}))).unwrap();
        assert!(!props.decal && !props.stepped && props.homing);

        let mut kb = KbProperties::default();
        kb.update(&obj(json!({"g": "false"}))).unwrap();
        assert!(kb.ghosted);
    }

    #[test]
    fn test_strings_render_any_value() {
        let mut kb = KbProperties::default();
        kb.update(&obj(json!({"c": null, "t": 42, "p": ["DCS", 1]}))).unwrap();
        assert_eq!(kb.bg, "null");
        assert_eq!(kb.fg, "42");
        assert_eq!(kb.profile.as_deref(), Some(r#"["DCS",1]"#));

        kb.update(&obj(json!({"c": true, "p": {"row": 2}}))).unwrap();
        assert_eq!(kb.bg, "true");
        assert_eq!(kb.profile.as_deref(), Some(r#"{"row":2}"#));
    }

    #[test]
    fn test_key_properties_to_json_skips_defaults() {
        assert!(KeyProperties::default().to_json().is_empty());

        let props = KeyProperties {
            x: 1.0,
            w: 2.25,
            h2: Some(2.0),
            rx: Some(0.0),
            decal: true,
            ..KeyProperties::default()
        };
        let json = Value::Object(props.to_json());
        assert_eq!(json, json!({"x": 1, "w": 2.25, "h2": 2, "rx": 0, "d": true}));
    }

    #[test]
    fn test_kb_properties_update_merges() {
        let mut props = KbProperties::default();
        props
            .update(&obj(json!({"c": "#cccccc", "r": 15, "rx": 1, "a": 7})))
            .unwrap();
        assert_eq!(props.bg, "#cccccc");
        assert_eq!(props.fg, DEFAULT_TEXT_COLOR);
        assert_eq!(props.r, 15.0);
        assert_eq!(props.rx, 1.0);
        assert_eq!(props.ry, 0.0);
        assert_eq!(props.text_alignment, Some(7));

        props
            .update(&obj(json!({"t": "#111111", "f": 4.9, "f2": "5", "p": "DSA", "g": true})))
            .unwrap();
        assert_eq!(props.bg, "#cccccc");
        assert_eq!(props.fg, "#111111");
        assert_eq!(props.font_primary, 4);
        assert_eq!(props.font_secondary, 5);
        assert_eq!(props.profile.as_deref(), Some("DSA"));
        assert!(props.ghosted);
        assert_eq!(props.r, 15.0);
    }

    #[test]
    fn test_kb_properties_rejects_bad_angle() {
        let mut props = KbProperties::default();
        let err = props.update(&obj(json!({"r": {"deg": 15}}))).unwrap_err();
        assert!(matches!(err, KleError::Conversion { ref field, .. } if field == "r"));
    }

    #[test]
    fn test_number_encoding() {
        assert_eq!(number(2.0), Some(json!(2)));
        assert_eq!(number(-0.5), Some(json!(-0.5)));
        assert_eq!(number(1.25), Some(json!(1.25)));
        assert_eq!(number(f64::NAN), None);
        assert_eq!(number(f64::INFINITY), None);
    }

    #[test]
    fn test_to_json_skips_non_finite() {
        let props = KeyProperties {
            x: f64::NAN,
            w: f64::INFINITY,
            h: 2.0,
            ..KeyProperties::default()
        };
        assert_eq!(Value::Object(props.to_json()), json!({"h": 2}));
    }
}
