//! Synthetic camera images of neutral-atom tweezer arrays.
//!
//! This crate configures and drives the `createSampleImage` native
//! library. Cameras ([`EmccdCamera`], [`CmosCamera`]) and experiments
//! ([`TweezerArray`]) are plain structs whose parameters are relayed
//! through the library's C setters, and [`ImageGenerator`] invokes the
//! library to produce a binned sensor image together with per-site
//! ground truth. The image synthesis itself (PSF convolution, sensor
//! noise, electron multiplication) happens entirely inside the native
//! library; the one piece of geometry computed here is the rotated
//! lattice layout of atom sites.

pub mod camera;
pub mod config;
pub mod error;
pub mod experiment;
pub mod generator;
pub mod image_io;
pub mod native;

// Re-exports for easier access
pub use camera::{CameraModel, CmosCamera, EmccdCamera, SensorKind, ZernikeCoefficients};
pub use config::{CameraSection, Scenario};
pub use error::{Error, Result};
pub use experiment::{
    lattice_sites, CoordinateSpace, Experiment, LatticeSpec, Site, TweezerArray,
};
pub use generator::{ImageGenerator, SyntheticFrame};
pub use native::ImagingLibrary;
