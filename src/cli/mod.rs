//! CLI command handlers.
//!
//! This module provides headless, scriptable access to layout parsing,
//! inspection and transformation.

pub mod common;
pub mod convert;
pub mod inspect;
pub mod mirror;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use convert::ConvertArgs;
pub use inspect::{InspectArgs, Section};
pub use mirror::MirrorArgs;
