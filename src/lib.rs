//! KLE layout library
//!
//! This library parses keyboard-layout-editor (KLE) JSON into keys with
//! exact, rotation-aware geometry, supports editing and mirroring that
//! geometry, and serializes layouts back to KLE JSON.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;

pub use error::{KleError, Result};
