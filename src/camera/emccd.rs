//! Electron-multiplying CCD sensor simulation parameters.

use serde::{Deserialize, Serialize};

use super::{CameraModel, SensorKind, ZernikeCoefficients};
use crate::error::NativeError;
use crate::native::ImagingLibrary;

/// Parameters for images that should look like they were taken by an
/// electron-multiplying CCD camera.
///
/// Every tunable parameter is optional; `None` is never relayed and the
/// native library keeps its built-in default for that parameter. See
/// [`crate::camera::models::EMCCD_REFERENCE`] for a fully-populated set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmccdCamera {
    /// Number of pixels per dimension (x, y).
    pub resolution: (u32, u32),
    /// Dark current rate (photons/s).
    pub dark_current_rate: Option<f64>,
    /// Chance for any pixel to pick up a clock-induced charge.
    pub cic_chance: Option<f64>,
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
    /// Pre-amplifier gain.
    pub preamp_gain: Option<f64>,
    /// Chance for a serial clock-induced charge in any gain register,
    /// in [0, 1].
    pub scic_chance: Option<f64>,
    /// Standard deviation of the final readout.
    pub readout_stdev: Option<f64>,
    /// Number of electron-multiplying gain registers.
    pub gain_registers: Option<u32>,
    /// Secondary-electron chance per gain register, in [0, 1];
    /// `(1 + p0)^registers` is the EM gain.
    pub p0: Option<f64>,
    /// Exposure time (s).
    pub exposure_time_s: Option<f64>,
    /// Binning factor for the final image.
    pub binning: u32,
    /// Optical aberrations of the imaging system.
    pub zernike: Option<ZernikeCoefficients>,
}

impl EmccdCamera {
    /// Camera with the given sensor resolution; everything else stays
    /// with the library defaults.
    pub fn new(resolution: (u32, u32)) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }
}

impl Default for EmccdCamera {
    fn default() -> Self {
        Self {
            resolution: (512, 512),
            dark_current_rate: None,
            cic_chance: None,
            quantum_efficiency: None,
            numerical_aperture: None,
            physical_pixel_size_um: None,
            magnification: None,
            bias_clamp: None,
            preamp_gain: None,
            scic_chance: None,
            readout_stdev: None,
            gain_registers: None,
            p0: None,
            exposure_time_s: None,
            binning: 1,
            zernike: None,
        }
    }
}

impl CameraModel for EmccdCamera {
    fn kind(&self) -> SensorKind {
        SensorKind::Emccd
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn binning(&self) -> u32 {
        self.binning
    }

    fn apply_settings(&self, library: &ImagingLibrary) -> Result<(), NativeError> {
        if let Some(value) = self.dark_current_rate {
            library.set_dark_current_rate(value)?;
        }
        if let Some(value) = self.cic_chance {
            library.set_cic_chance(value)?;
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
        if let Some(value) = self.preamp_gain {
            library.set_preamp_gain(value)?;
        }
        if let Some(value) = self.scic_chance {
            library.set_scic_chance(value)?;
        }
        if let Some(value) = self.readout_stdev {
            library.set_readout_stdev(value)?;
        }
        if let Some(registers) = self.gain_registers {
            library.set_number_gain_registers(f64::from(registers))?;
        }
        if let Some(value) = self.p0 {
            library.set_p0(value)?;
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
        let camera = EmccdCamera::new((1024, 768));
        assert_eq!(camera.resolution, (1024, 768));
        assert_eq!(camera.binning, 1);
        assert!(camera.dark_current_rate.is_none());
        assert!(camera.p0.is_none());
        assert!(camera.zernike.is_none());
    }

    #[test]
    fn serde_round_trip_preserves_options() {
        let mut camera = EmccdCamera::new((256, 256));
        camera.quantum_efficiency = Some(0.9);
        camera.zernike = Some(ZernikeCoefficients::from([0.01; 15]));

        let json = serde_json::to_string(&camera).expect("serialize");
        let back: EmccdCamera = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, camera);
    }

    #[test]
    fn missing_fields_deserialize_as_unset() {
        let camera: EmccdCamera =
            serde_json::from_str(r#"{"resolution": [64, 32], "bias_clamp": 500.0}"#)
                .expect("deserialize");
        assert_eq!(camera.resolution, (64, 32));
        assert_eq!(camera.bias_clamp, Some(500.0));
        assert!(camera.readout_stdev.is_none());
        assert_eq!(camera.binning, 1);
    }
}
