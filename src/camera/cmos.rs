//! CMOS sensor simulation parameters.

use serde::{Deserialize, Serialize};

use super::{CameraModel, SensorKind, ZernikeCoefficients};
use crate::error::NativeError;
use crate::native::ImagingLibrary;

/// Parameters for images that should look like they were taken by a
/// CMOS camera.
///
/// Dark current is sampled per pixel from a Gamma distribution with the
/// alpha/beta parameters below; row, column and flicker noise model the
/// rolling readout. As with [`super::EmccdCamera`], `None` fields are
/// never relayed to the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmosCamera {
    /// Number of pixels per dimension (x, y).
    pub resolution: (u32, u32),
    /// Shape parameter of the dark-current Gamma distribution.
    pub dark_current_alpha: Option<f64>,
    /// Rate parameter of the dark-current Gamma distribution.
    pub dark_current_beta: Option<f64>,
    /// Quantum efficiency at the imaging wavelength, in [0, 1].
    pub quantum_efficiency: Option<f64>,
    /// Numerical aperture of the objective.
    pub numerical_aperture: Option<f64>,
    /// Physical size of a single pixel (um).
    pub physical_pixel_size_um: Option<f64>,
    /// Magnification of the optical system.
    pub magnification: Option<f64>,
    /// Bias clamp level.
    pub bias_clamp: Option<f64>,
    /// Standard deviation of the bias clamp.
    pub bias_stdev: Option<f64>,
    /// Standard deviation of the per-row noise.
    pub row_noise_stdev: Option<f64>,
    /// Scale of the zero-mean Gumbel column noise.
    pub column_noise_scale: Option<f64>,
    /// Scale of the zero-mean Gumbel flicker noise.
    pub flicker_noise_scale: Option<f64>,
    /// Pre-amplifier gain.
    pub preamp_gain: Option<f64>,
    /// Standard deviation of the final readout.
    pub readout_stdev: Option<f64>,
    /// Exposure time (s).
    pub exposure_time_s: Option<f64>,
    /// Binning factor for the final image.
    pub binning: u32,
    /// Optical aberrations of the imaging system.
    pub zernike: Option<ZernikeCoefficients>,
}

impl CmosCamera {
    /// Camera with the given sensor resolution; everything else stays
    /// with the library defaults.
    pub fn new(resolution: (u32, u32)) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }
}

impl Default for CmosCamera {
    fn default() -> Self {
        Self {
            resolution: (512, 512),
            dark_current_alpha: None,
            dark_current_beta: None,
            quantum_efficiency: None,
            numerical_aperture: None,
            physical_pixel_size_um: None,
            magnification: None,
            bias_clamp: None,
            bias_stdev: None,
            row_noise_stdev: None,
            column_noise_scale: None,
            flicker_noise_scale: None,
            preamp_gain: None,
            readout_stdev: None,
            exposure_time_s: None,
            binning: 1,
            zernike: None,
        }
    }
}

impl CameraModel for CmosCamera {
    fn kind(&self) -> SensorKind {
        SensorKind::Cmos
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn binning(&self) -> u32 {
        self.binning
    }

    fn apply_settings(&self, library: &ImagingLibrary) -> Result<(), NativeError> {
        if let Some(value) = self.dark_current_alpha {
            library.set_dark_current_sampling_alpha(value)?;
        }
        if let Some(value) = self.dark_current_beta {
            library.set_dark_current_sampling_beta(value)?;
        }
        if let Some(value) = self.quantum_efficiency {
            library.set_quantum_efficiency(value)?;
        }
        if let Some(value) = self.numerical_aperture {
            library.set_numerical_aperture(value)?;
        }
        if let Some(value) = self.physical_pixel_size_um {
            library.set_physical_pixel_size(value)?;
        }
        if let Some(value) = self.magnification {
            library.set_magnification(value)?;
        }
        if let Some(value) = self.bias_clamp {
            library.set_bias_clamp(value)?;
        }
        if let Some(value) = self.bias_stdev {
            library.set_bias_stdev(value)?;
        }
        if let Some(value) = self.row_noise_stdev {
            library.set_row_noise_stdev(value)?;
        }
        if let Some(value) = self.column_noise_scale {
            library.set_column_noise_scale(value)?;
        }
        if let Some(value) = self.flicker_noise_scale {
            library.set_flicker_noise_scale(value)?;
        }
        if let Some(value) = self.preamp_gain {
            library.set_preamp_gain(value)?;
        }
        if let Some(value) = self.readout_stdev {
            library.set_readout_stdev(value)?;
        }
        if let Some(value) = self.exposure_time_s {
            library.set_exposure_time(value)?;
        }
        library.set_binning(self.binning as i32)?;
        if let Some(zernike) = &self.zernike {
            library.set_zernike_coefficients(zernike.as_array())?;
        }
        library.set_resolution(self.resolution.0 as i32, self.resolution.1 as i32)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_only_sets_resolution() {
        let camera = CmosCamera::new((2048, 2048));
        assert_eq!(camera.resolution, (2048, 2048));
        assert_eq!(camera.binning, 1);
        assert!(camera.dark_current_alpha.is_none());
        assert!(camera.flicker_noise_scale.is_none());
    }

    #[test]
    fn serde_round_trip_preserves_options() {
        let mut camera = CmosCamera::new((128, 128));
        camera.row_noise_stdev = Some(0.5);
        camera.binning = 2;

        let json = serde_json::to_string(&camera).expect("serialize");
        let back: CmosCamera = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, camera);
    }
}
