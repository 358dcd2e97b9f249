//! Inspect command: print key geometry, metadata or layout bounds.

use crate::cli::common::{load_config, load_layout, CliError, CliResult};
use crate::models::{Key, KbProperties, Keyboard, LegendAnchor, LegendSlot, Point, Rect};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

/// Part of the layout to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    /// Per-key geometry and legends
    Keys,
    /// Layout metadata object
    Metadata,
    /// Bounding box of the whole layout
    Bounds,
}

/// Inspect a KLE layout file
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to KLE JSON file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Section to print
    #[arg(long, value_enum, default_value = "keys")]
    pub section: Section,

    /// Drawing units per layout unit (defaults to the configured spacing)
    #[arg(long, value_name = "UNITS")]
    pub spacing: Option<f64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One legend of a key.
#[derive(Debug, Clone, Serialize)]
struct LegendReport<'a> {
    slot: LegendSlot,
    anchor: LegendAnchor,
    text: &'a str,
}

/// Unit-space size and offset of a key.
///
/// `x`/`y` are the stored offset from the rotation origin, measured in the
/// key's rotated frame.
#[derive(Debug, Clone, Serialize)]
struct UnitReport {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Geometry of a single key.
#[derive(Debug, Clone, Serialize)]
struct KeyReport<'a> {
    index: usize,
    legends: Vec<LegendReport<'a>>,
    unit: UnitReport,
    rotation: f64,
    rotation_origin: Point,
    position: Point,
    center: Point,
    bounding_box: Rect,
    decal: bool,
    stepped: bool,
    homing: bool,
    style: &'a KbProperties,
}

impl<'a> KeyReport<'a> {
    fn new(index: usize, key: &'a Key) -> Self {
        let legends = LegendSlot::all()
            .filter(|slot| !key.legend(*slot).is_empty())
            .map(|slot| LegendReport {
                slot,
                anchor: slot.anchor(),
                text: key.legend(slot),
            })
            .collect();

        Self {
            index,
            legends,
            unit: UnitReport {
                x: key.u_pos().x,
                y: key.u_pos().y,
                w: key.u_w(),
                h: key.u_h(),
            },
            rotation: key.r(),
            rotation_origin: key.u_origin(),
            position: key.pos(),
            center: key.center(),
            bounding_box: key.bounding_box(),
            decal: key.is_decal(),
            stepped: key.is_stepped(),
            homing: key.is_homing(),
            style: key.properties(),
        }
    }
}

/// JSON response for the keys section.
#[derive(Debug, Clone, Serialize)]
struct KeysResponse<'a> {
    spacing: f64,
    count: usize,
    keys: Vec<KeyReport<'a>>,
}

/// JSON response for the bounds section.
#[derive(Debug, Clone, Serialize)]
struct BoundsResponse {
    spacing: f64,
    count: usize,
    bounding_box: Option<Rect>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let keyboard = load_layout(&self.layout, self.spacing, &config)?;

        match self.section {
            Section::Keys => self.print_keys(&keyboard),
            Section::Metadata => self.print_metadata(&keyboard),
            Section::Bounds => self.print_bounds(&keyboard),
        }
    }

    fn print_keys(&self, keyboard: &Keyboard) -> CliResult<()> {
        let keys: Vec<_> = keyboard
            .keys()
            .iter()
            .enumerate()
            .map(|(index, key)| KeyReport::new(index, key))
            .collect();

        if self.json {
            let response = KeysResponse {
                spacing: keyboard.spacing(),
                count: keys.len(),
                keys,
            };
            return print_json(&response);
        }

        println!("{} keys (spacing {}):", keys.len(), keyboard.spacing());
        for key in &keys {
            let legends: Vec<String> = key
                .legends
                .iter()
                .map(|l| format!("{}={:?}", l.slot, l.text))
                .collect();
            println!(
                "  #{:<3} unit ({}, {}) {}x{}  r={}  center ({:.2}, {:.2})  [{}]",
                key.index,
                key.unit.x,
                key.unit.y,
                key.unit.w,
                key.unit.h,
                key.rotation,
                key.center.x,
                key.center.y,
                legends.join(", ")
            );
        }
        Ok(())
    }

    fn print_metadata(&self, keyboard: &Keyboard) -> CliResult<()> {
        if self.json {
            return print_json(keyboard.metadata());
        }

        if keyboard.metadata().is_empty() {
            println!("No metadata");
            return Ok(());
        }
        println!("Metadata:");
        for (name, value) in keyboard.metadata() {
            println!("  {name}: {value}");
        }
        Ok(())
    }

    fn print_bounds(&self, keyboard: &Keyboard) -> CliResult<()> {
        let bounding_box = keyboard.bounding_box();

        if self.json {
            let response = BoundsResponse {
                spacing: keyboard.spacing(),
                count: keyboard.key_count(),
                bounding_box,
            };
            return print_json(&response);
        }

        match bounding_box {
            Some(rect) => println!(
                "Bounds: x={:.3} y={:.3} w={:.3} h={:.3} ({} keys)",
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                keyboard.key_count()
            ),
            None => println!("Bounds: empty layout"),
        }
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
    );
    Ok(())
}
