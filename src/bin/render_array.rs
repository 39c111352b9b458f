//! Render a synthetic tweezer-array image with the native library.
//!
//! Usage:
//! ```
//! cargo run --bin render_array -- --library ./libcreateSampleImage.so --output frame.png
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tweezercam::camera::models;
use tweezercam::{image_io, CameraSection, ImageGenerator, LatticeSpec, Scenario, TweezerArray};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Render a synthetic image of a neutral-atom tweezer array"
)]
struct Args {
    /// Path to the native image-synthesis library; defaults to the
    /// TWEEZERCAM_LIBRARY environment variable or the platform library name
    #[arg(long)]
    library: Option<PathBuf>,

    /// Scenario description (JSON); omit for the built-in demo scenario
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Native key=value settings file forwarded to the library's own parser
    #[arg(long)]
    native_config: Option<PathBuf>,

    /// Output image path
    #[arg(long, default_value = "tweezer_array.png")]
    output: PathBuf,

    /// Write per-site ground truth to this JSON file
    #[arg(long)]
    truth_output: Option<PathBuf>,

    /// Write the convolved light-source kernel to this JSON file
    #[arg(long)]
    psf_output: Option<PathBuf>,

    /// Kernel resolution used with --psf-output
    #[arg(long, default_value_t = 64)]
    psf_resolution: u32,

    /// Per-pixel subdivisions for the optical simulation
    #[arg(long, default_value_t = 1)]
    approximation_steps: u32,
}

/// Demo scenario patterned on the library's sample driver: a 512x256
/// EMCCD frame of a 5x4 grid at 60 % fill.
fn demo_scenario() -> Scenario {
    let mut camera = models::EMCCD_REFERENCE.clone();
    camera.resolution = (512, 256);

    let mut experiment = TweezerArray::new();
    experiment.scattering_rate = Some(29_000.0);
    experiment.fill_rate = Some(0.6);

    Scenario {
        camera: CameraSection::Emccd(camera),
        experiment,
        lattice: Some(LatticeSpec {
            spacing: (0.168, 0.168),
            count: (5, 4),
            offset: (0.156, 0.27),
            angle_rad: 0.0,
        }),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("loading scenario from `{}`", path.display()))?,
        None => demo_scenario(),
    };

    let mut generator = match &args.library {
        Some(path) => ImageGenerator::from_library_path(path)?,
        None => ImageGenerator::new()?,
    };

    if let Some(path) = &args.native_config {
        generator.read_config_file(path)?;
    }

    let (camera, experiment) = scenario.into_parts();
    let site_count = experiment.sites.len();
    camera.install(&mut generator)?;
    generator.set_experiment(experiment)?;

    info!(sites = site_count, "rendering");
    let frame = generator.render(args.approximation_steps)?;

    let stretched = image_io::stretch_to_u8(&frame.image);
    image_io::save_u8_image(&stretched, &args.output)?;
    info!(path = %args.output.display(), "wrote image");

    if let Some(path) = &args.truth_output {
        std::fs::write(path, serde_json::to_string_pretty(&frame.ground_truth)?)?;
        info!(path = %path.display(), "wrote ground truth");
    }

    if let Some(path) = &args.psf_output {
        let psf = generator.psf(args.psf_resolution)?;
        let rows: Vec<Vec<f64>> = psf.outer_iter().map(|row| row.to_vec()).collect();
        std::fs::write(path, serde_json::to_string(&rows)?)?;
        info!(path = %path.display(), "wrote psf kernel");
    }

    let filled = frame.ground_truth.iter().filter(|&&t| t > 0.0).count();
    info!(filled, sites = site_count, "done");
    Ok(())
}
