//! Expand a lattice spec into atom-site coordinates.
//!
//! Runs without the native library; useful for checking a layout
//! before rendering with it.

use std::path::PathBuf;

use clap::Parser;

use tweezercam::{lattice_sites, LatticeSpec};

#[derive(Parser, Debug)]
#[command(version, about = "Print the atom-site coordinates of a rotated lattice")]
struct Args {
    /// Column spacing (x)
    #[arg(long, default_value_t = 0.168)]
    spacing_x: f64,

    /// Row spacing (y)
    #[arg(long, default_value_t = 0.168)]
    spacing_y: f64,

    /// Number of columns
    #[arg(long, default_value_t = 5)]
    columns: u32,

    /// Number of rows
    #[arg(long, default_value_t = 4)]
    rows: u32,

    /// Position of the first site (x)
    #[arg(long, default_value_t = 0.156)]
    offset_x: f64,

    /// Position of the first site (y)
    #[arg(long, default_value_t = 0.27)]
    offset_y: f64,

    /// Grid rotation about the first site (radians)
    #[arg(long, default_value_t = 0.0)]
    angle_rad: f64,

    /// Write JSON here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let spec = LatticeSpec {
        spacing: (args.spacing_x, args.spacing_y),
        count: (args.columns, args.rows),
        offset: (args.offset_x, args.offset_y),
        angle_rad: args.angle_rad,
    };
    let sites = lattice_sites(&spec);
    let json = serde_json::to_string_pretty(&sites)?;

    match args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
