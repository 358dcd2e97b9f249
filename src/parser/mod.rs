//! Parsing and serialization of KLE layout files.
//!
//! This module turns KLE JSON (text, files or decoded values) into a
//! [`Keyboard`](crate::models::Keyboard) and writes keyboards back out.

pub mod kle;

// Re-export commonly used functions
pub use kle::{parse_kle_file, parse_kle_str, parse_kle_value, save_kle_file, to_kle_string};
