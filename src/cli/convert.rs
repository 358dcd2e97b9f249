//! Convert command: parse a layout and re-serialize it.
//!
//! Every key is written with its absolute geometry and rotation frame, so the
//! output is independent of the cursor tricks used in the input.

use crate::cli::common::{load_config, load_layout, write_layout, CliResult};
use clap::Args;
use std::path::PathBuf;

/// Re-serialize a KLE layout
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Path to KLE JSON file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Output path (prints to stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write compact JSON regardless of the configured style
    #[arg(long)]
    pub compact: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let keyboard = load_layout(&self.layout, None, &config)?;

        let pretty = config.output.pretty && !self.compact;
        write_layout(&keyboard, self.output.as_ref(), pretty)
    }
}
