//! Key entity and its rotation-aware geometry.
//!
//! # Coordinate spaces
//!
//! A key stores its position in *unit space* (1u = one standard keycap),
//! relative to its rotation origin `(rx, ry)` and expressed in the rotated
//! frame of angle `r`. Drawing-space values are obtained by rotating the
//! unit offset about the origin and scaling by `spacing`:
//!
//! ```text
//! pos = spacing * ((rx, ry) + rotate((u_x, u_y), r))
//! ```
//!
//! The rotation origin itself is never rotated. All setters invert this
//! transform exactly, so `set_pos(pos())` leaves the stored unit offset
//! unchanged.

use std::fmt;

use crate::error::{check_spacing, KleError, Result};
use crate::models::legend::{LegendAnchor, LegendSlot, LEGEND_SLOTS};
use crate::models::point::{Point, Rect};
use crate::models::properties::{KbProperties, KeyProperties};

/// A single key of a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    u_x: f64,
    u_y: f64,
    u_w: f64,
    u_h: f64,
    r: f64,
    u_rx: f64,
    u_ry: f64,
    spacing: f64,
    decal: bool,
    stepped: bool,
    homing: bool,
    x2: Option<f64>,
    y2: Option<f64>,
    w2: Option<f64>,
    h2: Option<f64>,
    properties: KbProperties,
    legends: [String; LEGEND_SLOTS],
}

impl Key {
    /// Creates a key at unit offset `(u_x, u_y)` with size `(u_w, u_h)`.
    ///
    /// `properties` is cloned; the key's rotation angle and origin are taken
    /// from it. `text` holds up to 12 newline-separated legends in slot
    /// order.
    ///
    /// # Errors
    ///
    /// [`KleError::LegendOverflow`] if `text` has more than 12 lines,
    /// [`KleError::InvalidSpacing`] if `spacing` is not positive.
    pub fn new(
        u_x: f64,
        u_y: f64,
        u_w: f64,
        u_h: f64,
        text: &str,
        properties: &KbProperties,
        spacing: f64,
    ) -> Result<Self> {
        let spacing = check_spacing(spacing)?;
        let legends = split_legends(text)?;
        let properties = properties.clone();

        Ok(Self {
            u_x,
            u_y,
            u_w,
            u_h,
            r: properties.r,
            u_rx: properties.rx,
            u_ry: properties.ry,
            spacing,
            decal: false,
            stepped: false,
            homing: false,
            x2: None,
            y2: None,
            w2: None,
            h2: None,
            properties,
            legends,
        })
    }

    /// Copies the shape flags and secondary rectangle from per-key properties.
    ///
    /// The primary position and size are not touched.
    #[must_use]
    pub fn with_shape(mut self, shape: &KeyProperties) -> Self {
        self.decal = shape.decal;
        self.stepped = shape.stepped;
        self.homing = shape.homing;
        self.x2 = shape.x2;
        self.y2 = shape.y2;
        self.w2 = shape.w2;
        self.h2 = shape.h2;
        self
    }

    // ----- legends -----

    /// Legend text in `slot` (empty when unset).
    #[must_use]
    pub fn legend(&self, slot: LegendSlot) -> &str {
        &self.legends[slot.index()]
    }

    /// Replaces the legend in `slot`.
    ///
    /// The text should not contain newlines; they would shift the following
    /// slots when the key is serialized.
    pub fn set_legend(&mut self, slot: LegendSlot, value: impl Into<String>) {
        self.legends[slot.index()] = value.into();
    }

    /// Non-empty legends with their anchors, in slot order.
    #[must_use]
    pub fn legend_list(&self) -> Vec<(LegendAnchor, &str)> {
        LegendSlot::all()
            .map(|slot| (slot.anchor(), self.legend(slot)))
            .filter(|(_, text)| !text.is_empty())
            .collect()
    }

    /// All legends joined by newlines, with trailing empty slots trimmed.
    #[must_use]
    pub fn legend_str(&self) -> String {
        self.legends.join("\n").trim_end_matches('\n').to_string()
    }

    // ----- plain accessors -----

    /// Drawing units per layout unit.
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Changes the drawing scale. Unit-space geometry is unaffected.
    pub fn set_spacing(&mut self, spacing: f64) -> Result<()> {
        self.spacing = check_spacing(spacing)?;
        Ok(())
    }

    /// Unrotated absolute X: `spacing * (u_x + rx)`.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.spacing * (self.u_x + self.u_rx)
    }

    /// Unrotated absolute Y: `spacing * (u_y + ry)`.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.spacing * (self.u_y + self.u_ry)
    }

    /// Width in drawing units.
    #[must_use]
    pub fn w(&self) -> f64 {
        self.spacing * self.u_w
    }

    /// Height in drawing units.
    #[must_use]
    pub fn h(&self) -> f64 {
        self.spacing * self.u_h
    }

    /// Rotation angle in degrees.
    #[must_use]
    pub const fn r(&self) -> f64 {
        self.r
    }

    /// Rotation angle in radians.
    #[must_use]
    pub fn r_rad(&self) -> f64 {
        self.r.to_radians()
    }

    /// Rotation origin X in drawing units.
    #[must_use]
    pub fn rx(&self) -> f64 {
        self.u_rx * self.spacing
    }

    /// Rotation origin Y in drawing units.
    #[must_use]
    pub fn ry(&self) -> f64 {
        self.u_ry * self.spacing
    }

    /// Rotation origin in unit space.
    #[must_use]
    pub const fn u_origin(&self) -> Point {
        Point::new(self.u_rx, self.u_ry)
    }

    /// Unit X including the rotation origin (unrotated).
    #[must_use]
    pub fn u_x(&self) -> f64 {
        self.u_x + self.u_rx
    }

    /// Unit Y including the rotation origin (unrotated).
    #[must_use]
    pub fn u_y(&self) -> f64 {
        self.u_y + self.u_ry
    }

    /// Width in units.
    #[must_use]
    pub const fn u_w(&self) -> f64 {
        self.u_w
    }

    /// Height in units.
    #[must_use]
    pub const fn u_h(&self) -> f64 {
        self.u_h
    }

    /// Stored unit offset, relative to the rotation origin.
    #[must_use]
    pub const fn u_pos(&self) -> Point {
        Point::new(self.u_x, self.u_y)
    }

    /// Overwrites the unit offset and, when given, the rotation angle and
    /// origin.
    ///
    /// Unlike [`Key::set_angle`] this does not keep the key's center in place.
    pub fn set_u_pos(
        &mut self,
        u_x: f64,
        u_y: f64,
        r: Option<f64>,
        u_rx: Option<f64>,
        u_ry: Option<f64>,
    ) {
        self.u_x = u_x;
        self.u_y = u_y;
        if let Some(r) = r {
            self.r = r;
        }
        if let Some(u_rx) = u_rx {
            self.u_rx = u_rx;
        }
        if let Some(u_ry) = u_ry {
            self.u_ry = u_ry;
        }
    }

    /// Whether the key is a decal.
    #[must_use]
    pub const fn is_decal(&self) -> bool {
        self.decal
    }

    /// Whether the keycap is stepped.
    #[must_use]
    pub const fn is_stepped(&self) -> bool {
        self.stepped
    }

    /// Whether the keycap has a homing nub.
    #[must_use]
    pub const fn is_homing(&self) -> bool {
        self.homing
    }

    /// Style snapshot captured when the key was created.
    #[must_use]
    pub const fn properties(&self) -> &KbProperties {
        &self.properties
    }

    /// Unit geometry of this key as per-key properties, for serialization.
    ///
    /// `x`/`y` hold the stored offset from the rotation origin, and `rx`/`ry`
    /// are always set.
    #[must_use]
    pub fn key_properties(&self) -> KeyProperties {
        KeyProperties {
            x: self.u_x,
            y: self.u_y,
            w: self.u_w,
            h: self.u_h,
            x2: self.x2,
            y2: self.y2,
            w2: self.w2,
            h2: self.h2,
            rx: Some(self.u_rx),
            ry: Some(self.u_ry),
            stepped: self.stepped,
            homing: self.homing,
            decal: self.decal,
        }
    }

    // ----- geometry -----

    /// Absolute top-left corner of the (rotated) key.
    #[must_use]
    pub fn pos(&self) -> Point {
        (self.u_origin() + self.u_pos().rotate(self.r_rad())) * self.spacing
    }

    /// Moves the key so that [`Key::pos`] returns `(x, y)`.
    pub fn set_pos(&mut self, x: f64, y: f64) {
        let unscaled = Point::new(x, y) / self.spacing;
        let unrotated = (unscaled - self.u_origin()).rotate(-self.r_rad());
        self.u_x = unrotated.x;
        self.u_y = unrotated.y;
    }

    /// Vector from the top-left corner to the center, in drawing units.
    fn half_diagonal(&self) -> Point {
        (Point::new(self.w(), self.h()) * 0.5).rotate(self.r_rad())
    }

    /// Absolute center of the key.
    #[must_use]
    pub fn center(&self) -> Point {
        self.pos() + self.half_diagonal()
    }

    /// Moves the key so that [`Key::center`] returns `(x, y)`.
    pub fn set_center(&mut self, x: f64, y: f64) {
        let corner = Point::new(x, y) - self.half_diagonal();
        self.set_pos(corner.x, corner.y);
    }

    /// Changes the rotation angle while keeping the key's center fixed.
    pub fn set_angle(&mut self, r: f64) {
        let center = self.center();
        self.r = r;
        self.set_center(center.x, center.y);
    }

    /// Corners of the rotated key: top-left, top-right, bottom-right,
    /// bottom-left (named in the key's own frame).
    #[must_use]
    pub fn corner_points(&self) -> [Point; 4] {
        let angle = self.r_rad();
        let pos = self.pos();
        let edge_w = Point::new(self.w(), 0.0).rotate(angle);
        let edge_h = Point::new(0.0, self.h()).rotate(angle);

        [pos, pos + edge_w, pos + edge_w + edge_h, pos + edge_h]
    }

    /// Axis-aligned box enclosing the rotated key.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        Rect::enclosing(self.corner_points()).unwrap_or_default()
    }

    /// Corners of [`Key::bounding_box`].
    #[must_use]
    pub fn bounding_box_points(&self) -> [Point; 4] {
        self.bounding_box().points()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key(legend={:?}, ux={}, uy={}, uw={}, uh={}, r={})",
            self.legend_list(),
            self.u_x,
            self.u_y,
            self.u_w,
            self.u_h,
            self.r
        )
    }
}

/// Splits newline-separated legend text into the 12 slots.
fn split_legends(text: &str) -> Result<[String; LEGEND_SLOTS]> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() > LEGEND_SLOTS {
        return Err(KleError::LegendOverflow {
            got: lines.len(),
            max: LEGEND_SLOTS,
        });
    }

    let mut legends: [String; LEGEND_SLOTS] = Default::default();
    for (slot, line) in legends.iter_mut().zip(lines) {
        *slot = line.to_string();
    }
    Ok(legends)
}
