//! Data models for keyboard layouts, keys and their geometry.
//!
//! This module contains the core data structures of the crate. Models are
//! independent of file formats and of the command-line front end.

pub mod key;
pub mod keyboard;
pub mod legend;
pub mod point;
pub mod properties;

// Re-export all model types
pub use key::Key;
pub use keyboard::{Keyboard, MirrorAxis};
pub use legend::{LegendAnchor, LegendSlot, LEGEND_MAP, LEGEND_SLOTS};
pub use point::{Point, Rect};
pub use properties::{KbProperties, KeyProperties};
