//! Mirror command: flip a layout across an axis and write it back out.

use crate::cli::common::{load_config, load_layout, write_layout, CliResult};
use crate::models::MirrorAxis;
use clap::Args;
use std::path::PathBuf;

/// Mirror a KLE layout across the x or y axis
#[derive(Debug, Clone, Args)]
pub struct MirrorArgs {
    /// Path to KLE JSON file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Axis to mirror across: "x" flips left/right, "y" flips top/bottom
    #[arg(long, value_name = "AXIS", default_value = "x")]
    pub axis: MirrorAxis,

    /// Output path (prints to stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Drawing units per layout unit (defaults to the configured spacing)
    #[arg(long, value_name = "UNITS")]
    pub spacing: Option<f64>,

    /// Write compact JSON regardless of the configured style
    #[arg(long)]
    pub compact: bool,
}

impl MirrorArgs {
    /// Execute the mirror command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mut keyboard = load_layout(&self.layout, self.spacing, &config)?;

        keyboard.mirror(self.axis);
        tracing::info!(axis = %self.axis, keys = keyboard.key_count(), "Mirrored layout");

        let pretty = config.output.pretty && !self.compact;
        write_layout(&keyboard, self.output.as_ref(), pretty)
    }
}
