//! Legend slots and their anchor positions on the keycap.

use serde::Serialize;
use std::fmt;

/// Number of legend slots on a key.
pub const LEGEND_SLOTS: usize = 12;

/// One of the twelve legend positions on a keycap.
///
/// The discriminant is the slot index used by the newline-separated legend
/// string in KLE JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendSlot {
    /// Slot 0
    TopLeft = 0,
    /// Slot 1
    BottomLeft = 1,
    /// Slot 2
    TopRight = 2,
    /// Slot 3
    BottomRight = 3,
    /// Slot 4
    FrontLeft = 4,
    /// Slot 5
    FrontRight = 5,
    /// Slot 6
    CenterLeft = 6,
    /// Slot 7
    CenterRight = 7,
    /// Slot 8
    TopCenter = 8,
    /// Slot 9
    Center = 9,
    /// Slot 10
    BottomCenter = 10,
    /// Slot 11
    FrontCenter = 11,
}

/// Anchor code of a legend: `x` in {-1, 0, 1} (left, center, right) and
/// `y` in {-1, 0, 1, 2} (top, center, bottom, front face).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LegendAnchor {
    /// Horizontal anchor
    pub x: i8,
    /// Vertical anchor
    pub y: i8,
}

impl LegendAnchor {
    const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

/// Anchor table, indexed by slot.
pub const LEGEND_MAP: [(LegendSlot, LegendAnchor); LEGEND_SLOTS] = [
    (LegendSlot::TopLeft, LegendAnchor::new(-1, -1)),
    (LegendSlot::BottomLeft, LegendAnchor::new(-1, 1)),
    (LegendSlot::TopRight, LegendAnchor::new(1, -1)),
    (LegendSlot::BottomRight, LegendAnchor::new(1, 1)),
    (LegendSlot::FrontLeft, LegendAnchor::new(-1, 2)),
    (LegendSlot::FrontRight, LegendAnchor::new(1, 2)),
    (LegendSlot::CenterLeft, LegendAnchor::new(-1, 0)),
    (LegendSlot::CenterRight, LegendAnchor::new(1, 0)),
    (LegendSlot::TopCenter, LegendAnchor::new(0, -1)),
    (LegendSlot::Center, LegendAnchor::new(0, 0)),
    (LegendSlot::BottomCenter, LegendAnchor::new(0, 1)),
    (LegendSlot::FrontCenter, LegendAnchor::new(0, 2)),
];

impl LegendSlot {
    /// Looks up a slot by its index (0-11).
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        LEGEND_MAP.get(index).map(|(slot, _)| *slot)
    }

    /// Index of this slot in the legend string.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Anchor position of this slot.
    #[must_use]
    pub const fn anchor(self) -> LegendAnchor {
        LEGEND_MAP[self as usize].1
    }

    /// Iterates all slots in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        LEGEND_MAP.iter().map(|(slot, _)| *slot)
    }

    /// Human readable name of the slot.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top left",
            Self::BottomLeft => "bottom left",
            Self::TopRight => "top right",
            Self::BottomRight => "bottom right",
            Self::FrontLeft => "front left",
            Self::FrontRight => "front right",
            Self::CenterLeft => "center left",
            Self::CenterRight => "center right",
            Self::TopCenter => "top center",
            Self::Center => "center",
            Self::BottomCenter => "bottom center",
            Self::FrontCenter => "front center",
        }
    }
}

impl fmt::Display for LegendSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
