//! Optical-tweezer array experiments.

use serde::{Deserialize, Serialize};

use super::lattice::{lattice_sites, LatticeSpec};
use super::{CoordinateSpace, Experiment, Site};
use crate::error::NativeError;
use crate::native::ImagingLibrary;

/// An optical-tweezer array: photon/atom statistics plus the sites at
/// which atoms may reside.
///
/// Parameters left unset are never relayed; the library keeps its own
/// defaults for them. Each render fills every site independently with
/// probability `fill_rate`, so a grid of `cols * rows` sites carries
/// `cols * rows * fill_rate` atoms on average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweezerArray {
    /// Rate of stray light reaching the sensor (photons/s).
    pub stray_light_rate: Option<f64>,
    /// Imaging wavelength (um).
    pub imaging_wavelength_um: Option<f64>,
    /// Average photons emitted by an atom per second (photons/s).
    pub scattering_rate: Option<f64>,
    /// Chance for an atom to survive being imaged, in [0, 1].
    pub survival_probability: Option<f64>,
    /// Chance for any site to hold an atom, in [0, 1].
    pub fill_rate: Option<f64>,
    /// Sites at which an atom may reside.
    pub sites: Vec<Site>,
    /// Coordinate space of `sites`.
    pub coordinate_space: CoordinateSpace,
}

impl TweezerArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter set matching the native library's built-in defaults.
    pub fn reference() -> Self {
        Self {
            stray_light_rate: Some(0.4),
            imaging_wavelength_um: Some(0.4619),
            scattering_rate: Some(30_000.0),
            survival_probability: Some(1.0),
            fill_rate: Some(1.0),
            ..Self::default()
        }
    }

    /// Replace the site list with normalized camera-space coordinates.
    pub fn set_sites_camera_space(&mut self, sites: Vec<Site>) {
        self.coordinate_space = CoordinateSpace::CameraNormalized;
        self.sites = sites;
    }

    /// Replace the site list with physical object-space coordinates (um).
    pub fn set_sites_physical_space(&mut self, sites: Vec<Site>) {
        self.coordinate_space = CoordinateSpace::Physical;
        self.sites = sites;
    }

    /// Lay the sites out on a rotated lattice in camera space.
    pub fn layout_camera_space(&mut self, spec: &LatticeSpec) {
        self.set_sites_camera_space(lattice_sites(spec));
    }

    /// Lay the sites out on a rotated lattice in physical space.
    pub fn layout_physical_space(&mut self, spec: &LatticeSpec) {
        self.set_sites_physical_space(lattice_sites(spec));
    }
}

impl Default for TweezerArray {
    fn default() -> Self {
        Self {
            stray_light_rate: None,
            imaging_wavelength_um: None,
            scattering_rate: None,
            survival_probability: None,
            fill_rate: None,
            sites: Vec::new(),
            coordinate_space: CoordinateSpace::CameraNormalized,
        }
    }
}

impl Experiment for TweezerArray {
    fn apply_settings(&self, library: &ImagingLibrary) -> Result<(), NativeError> {
        if let Some(value) = self.stray_light_rate {
            library.set_stray_light_rate(value)?;
        }
        if let Some(value) = self.imaging_wavelength_um {
            library.set_wavelength(value)?;
        }
        if let Some(value) = self.scattering_rate {
            library.set_scattering_rate(value)?;
        }
        if let Some(value) = self.survival_probability {
            library.set_survival_probability(value)?;
        }
        if let Some(value) = self.fill_rate {
            library.set_filling_ratio(value)?;
        }
        Ok(())
    }

    fn sites(&self) -> &[Site] {
        &self.sites
    }

    fn coordinate_space(&self) -> CoordinateSpace {
        self.coordinate_space
    }
}
