//! Driving the native library to produce synthetic frames.

use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use crate::camera::{CameraModel, SensorKind};
use crate::error::{Error, Result};
use crate::experiment::{Experiment, Site};
use crate::native::ImagingLibrary;

/// One rendered exposure.
#[derive(Debug, Clone)]
pub struct SyntheticFrame {
    /// Binned sensor image, row-major (height x width).
    pub image: Array2<f64>,
    /// Ground truth per atom site, index-aligned with the experiment's
    /// site list: 0 for an empty site, 1 for an atom present through
    /// the whole exposure, a fractional value for an atom lost partway
    /// through (the fraction of the exposure it was imaged for).
    pub ground_truth: Vec<f64>,
}

/// Owns the loaded native library together with the camera and
/// experiment configured against it.
///
/// Installing a camera or experiment relays its parameters to the
/// library immediately; the library's settings are process-global, so
/// the last installed configuration wins.
pub struct ImageGenerator {
    library: ImagingLibrary,
    camera: Option<Box<dyn CameraModel>>,
    experiment: Option<Box<dyn Experiment>>,
}

impl ImageGenerator {
    /// Load the library from the default location (environment
    /// override or the platform library name).
    pub fn new() -> Result<Self> {
        Ok(Self::with_library(ImagingLibrary::load_default()?))
    }

    /// Load the library from an explicit path.
    pub fn from_library_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_library(ImagingLibrary::load(path)?))
    }

    /// Wrap an already-loaded library.
    pub fn with_library(library: ImagingLibrary) -> Self {
        Self {
            library,
            camera: None,
            experiment: None,
        }
    }

    /// The underlying library, for ad-hoc setter calls.
    pub fn library(&self) -> &ImagingLibrary {
        &self.library
    }

    /// Install a camera and relay its settings to the library.
    pub fn set_camera(&mut self, camera: impl CameraModel + 'static) -> Result<()> {
        if camera.binning() == 0 {
            return Err(Error::InvalidConfig(
                "camera binning must be at least 1".into(),
            ));
        }
        camera.apply_settings(&self.library)?;
        debug!(kind = ?camera.kind(), resolution = ?camera.resolution(), "camera installed");
        self.camera = Some(Box::new(camera));
        Ok(())
    }

    /// Install an experiment and relay its settings to the library.
    pub fn set_experiment(&mut self, experiment: impl Experiment + 'static) -> Result<()> {
        experiment.apply_settings(&self.library)?;
        debug!(sites = experiment.sites().len(), "experiment installed");
        self.experiment = Some(Box::new(experiment));
        Ok(())
    }

    /// Render one exposure.
    ///
    /// `approximation_steps` subdivides each pixel for the optical
    /// simulation; 1 keeps the native per-pixel resolution.
    pub fn render(&mut self, approximation_steps: u32) -> Result<SyntheticFrame> {
        let camera = self.camera.as_ref().ok_or(Error::CameraNotSet)?;
        let experiment = self.experiment.as_ref().ok_or(Error::ExperimentNotSet)?;
        if approximation_steps == 0 {
            return Err(Error::InvalidConfig(
                "approximation_steps must be at least 1".into(),
            ));
        }

        let (res_x, res_y) = camera.resolution();
        let binning = camera.binning();
        let width = (res_x / binning) as usize;
        let height = (res_y / binning) as usize;

        let pairs: Vec<[f64; 2]> = experiment.sites().iter().map(Site::as_pair).collect();
        let camera_space = experiment.coordinate_space().camera_space_flag();
        let mut image = vec![0.0; width * height];
        let mut ground_truth = vec![0.0; pairs.len()];

        debug!(
            sites = pairs.len(),
            width, height, approximation_steps, "rendering synthetic frame"
        );
        match camera.kind() {
            SensorKind::Emccd => self.library.create_image_emccd(
                &mut image,
                &pairs,
                camera_space,
                &mut ground_truth,
                approximation_steps as i32,
            )?,
            SensorKind::Cmos => self.library.create_image_cmos(
                &mut image,
                &pairs,
                camera_space,
                &mut ground_truth,
                approximation_steps as i32,
            )?,
        }

        let image = Array2::from_shape_vec((height, width), image)
            .map_err(|err| Error::InvalidConfig(format!("image buffer shape mismatch: {err}")))?;
        Ok(SyntheticFrame {
            image,
            ground_truth,
        })
    }

    /// Fetch the convolved light-source kernel at the given resolution.
    pub fn psf(&self, resolution: u32) -> Result<Array2<f64>> {
        let side = resolution as usize;
        let psf = self.library.convolved_light_source(side)?;
        Array2::from_shape_vec((side, side), psf)
            .map_err(|err| Error::InvalidConfig(format!("psf buffer shape mismatch: {err}")))
    }

    /// Forward a key=value settings file to the library's own parser.
    ///
    /// The native parser silently ignores unreadable paths, so the
    /// existence check happens here.
    pub fn read_config_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("native settings file `{}` not found", path.display()),
            )));
        }
        self.library.read_config(path)?;
        Ok(())
    }
}
