//! kle-layout - inspect and transform keyboard-layout-editor JSON files
//!
//! # Usage
//!
//! ```bash
//! # Print every key with its geometry
//! kle-layout inspect --layout ergodox.json
//!
//! # Mirror a split half and write it to a new file
//! kle-layout mirror --layout left.json --axis x --output right.json
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kle_layout::cli::{CliResult, ConvertArgs, ExitCode, InspectArgs, MirrorArgs};

/// kle-layout - keyboard-layout-editor JSON tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print key geometry, metadata or layout bounds
    Inspect(InspectArgs),
    /// Mirror a layout across the x or y axis
    Mirror(MirrorArgs),
    /// Parse and re-serialize a layout
    Convert(ConvertArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Inspect(args) => args.execute(),
            Self::Mirror(args) => args.execute(),
            Self::Convert(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match cli.command.execute() {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code
        }
    };
    std::process::exit(code.code());
}
