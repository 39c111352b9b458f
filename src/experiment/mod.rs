//! Experiment setups that place atoms in front of the simulated camera.

mod lattice;
mod tweezer;

pub use lattice::{lattice_sites, LatticeSpec};
pub use tweezer::TweezerArray;

use serde::{Deserialize, Serialize};

use crate::error::NativeError;
use crate::native::ImagingLibrary;

/// Coordinate space a site list is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Normalized camera coordinates; both axes span [0, 1] across the
    /// frame.
    CameraNormalized,
    /// Physical object-space coordinates in micrometers; the library
    /// maps them onto the frame through pixel size and magnification.
    Physical,
}

impl CoordinateSpace {
    /// Flag value the native create entry points expect.
    pub(crate) fn camera_space_flag(self) -> bool {
        matches!(self, CoordinateSpace::CameraNormalized)
    }
}

/// A single atom site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub x: f64,
    pub y: f64,
}

impl Site {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Pair layout the native library consumes.
    pub(crate) fn as_pair(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Site {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Common interface of simulated experiments.
pub trait Experiment {
    /// Relay the experiment's statistical parameters to the library.
    fn apply_settings(&self, library: &ImagingLibrary) -> Result<(), NativeError>;

    /// Sites at which an atom may reside, in render order; ground
    /// truth from a render is index-aligned with this list.
    fn sites(&self) -> &[Site];

    /// Coordinate space the sites are expressed in.
    fn coordinate_space(&self) -> CoordinateSpace;
}
