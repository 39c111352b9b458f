//! Camera configurations for the simulated imaging system.
//!
//! A camera is a flat set of sensor parameters plus the knowledge of
//! which native create entry point renders it. Parameters left unset
//! are never communicated to the library, which then keeps its own
//! defaults for them.

mod cmos;
mod emccd;
mod zernike;

pub use cmos::CmosCamera;
pub use emccd::EmccdCamera;
pub use zernike::{ZernikeCoefficients, ZERNIKE_TERMS};

use serde::{Deserialize, Serialize};

use crate::error::NativeError;
use crate::native::ImagingLibrary;

/// Which native create entry point renders images for a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Electron-multiplying CCD.
    Emccd,
    /// CMOS active-pixel sensor.
    Cmos,
}

/// Common interface of the simulated cameras.
pub trait CameraModel {
    /// The sensor simulation this camera selects.
    fn kind(&self) -> SensorKind;

    /// Full sensor resolution in pixels (x, y).
    fn resolution(&self) -> (u32, u32);

    /// Binning factor applied to the output image.
    fn binning(&self) -> u32;

    /// Relay every configured parameter through the native setters.
    fn apply_settings(&self, library: &ImagingLibrary) -> Result<(), NativeError>;
}

/// Reference parameter sets matching the native library's built-in
/// defaults, published the same way as named sensor models.
pub mod models {
    use once_cell::sync::Lazy;

    use super::{CmosCamera, EmccdCamera};

    /// Fully-populated EMCCD parameter set mirroring the library's
    /// built-in defaults (EM gain 300 via 536 registers at p0 = 0.0107).
    pub static EMCCD_REFERENCE: Lazy<EmccdCamera> = Lazy::new(|| EmccdCamera {
        resolution: (512, 512),
        dark_current_rate: Some(2.9e-4),
        cic_chance: Some(3.7e-4),
        quantum_efficiency: Some(0.86),
        numerical_aperture: Some(0.65),
        physical_pixel_size_um: Some(16.0),
        magnification: Some(156.25),
        bias_clamp: Some(500.0),
        preamp_gain: Some(4.11),
        scic_chance: Some(2.0e-5),
        readout_stdev: Some(4.0),
        gain_registers: Some(536),
        p0: Some(0.010_698_206_1),
        exposure_time_s: Some(0.1),
        binning: 1,
        zernike: None,
    });

    /// Fully-populated CMOS parameter set mirroring the library's
    /// built-in defaults.
    pub static CMOS_REFERENCE: Lazy<CmosCamera> = Lazy::new(|| CmosCamera {
        resolution: (512, 512),
        dark_current_alpha: Some(0.006),
        dark_current_beta: Some(1.0),
        quantum_efficiency: Some(0.86),
        numerical_aperture: Some(0.65),
        physical_pixel_size_um: Some(16.0),
        magnification: Some(156.25),
        bias_clamp: Some(500.0),
        bias_stdev: Some(1.0),
        row_noise_stdev: Some(0.5),
        column_noise_scale: Some(0.5),
        flicker_noise_scale: Some(0.2),
        preamp_gain: Some(4.11),
        readout_stdev: Some(4.0),
        exposure_time_s: Some(0.1),
        binning: 1,
        zernike: None,
    });
}

#[cfg(test)]
mod model_tests {
    use super::*;

    #[test]
    fn emccd_reference_carries_library_defaults() {
        let camera = &models::EMCCD_REFERENCE;
        assert_eq!(camera.resolution, (512, 512));
        assert_eq!(camera.dark_current_rate, Some(2.9e-4));
        assert_eq!(camera.cic_chance, Some(3.7e-4));
        assert_eq!(camera.quantum_efficiency, Some(0.86));
        assert_eq!(camera.gain_registers, Some(536));
        assert_eq!(camera.p0, Some(0.010_698_206_1));
        assert_eq!(camera.exposure_time_s, Some(0.1));
        assert_eq!(camera.binning, 1);
        assert_eq!(camera.kind(), SensorKind::Emccd);
    }

    #[test]
    fn cmos_reference_carries_library_defaults() {
        let camera = &models::CMOS_REFERENCE;
        assert_eq!(camera.resolution, (512, 512));
        assert_eq!(camera.dark_current_alpha, Some(0.006));
        assert_eq!(camera.dark_current_beta, Some(1.0));
        assert_eq!(camera.row_noise_stdev, Some(0.5));
        assert_eq!(camera.column_noise_scale, Some(0.5));
        assert_eq!(camera.flicker_noise_scale, Some(0.2));
        assert_eq!(camera.kind(), SensorKind::Cmos);
    }
}
