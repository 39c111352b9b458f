//! Runtime binding to the `createSampleImage` native library.
//!
//! The library keeps one process-global settings block; every setter
//! exported here mutates that block and the create entry points read it
//! when rendering. This module confines all `unsafe` in the crate: it
//! resolves the fixed-name C symbols and exposes one typed safe method
//! per entry point.

use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::debug;

use crate::error::NativeError;

/// Environment variable that overrides where the library is loaded from.
pub const LIBRARY_PATH_ENV: &str = "TWEEZERCAM_LIBRARY";

/// Platform-specific file name of the image-synthesis library.
///
/// Handing a bare file name to [`ImagingLibrary::load`] defers to the
/// system loader's search path.
pub fn default_library_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "createSampleImage.dll"
    } else if cfg!(target_os = "macos") {
        "libcreateSampleImage.dylib"
    } else {
        "libcreateSampleImage.so"
    }
}

/// Entry points resolved at load time so an incompatible build of the
/// library fails immediately instead of at first use.
const REQUIRED_SYMBOLS: [&str; 4] = [
    "createImageEMCCD",
    "createImageCMOS",
    "readConfig",
    "getConvolutedLightSource",
];

macro_rules! f64_setters {
    ($($(#[$doc:meta])* $method:ident => $symbol:literal),+ $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $method(&self, value: f64) -> Result<(), NativeError> {
                self.set_f64($symbol, value)
            }
        )+
    };
}

/// A loaded instance of the image-synthesis library.
///
/// The settings behind this handle are global to the loaded library, so
/// two handles in one process configure the same state.
pub struct ImagingLibrary {
    library: Library,
    path: PathBuf,
}

impl ImagingLibrary {
    /// Load the library from an explicit path or bare library name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NativeError> {
        let path = path.as_ref().to_path_buf();
        let library = unsafe { Library::new(&path) }.map_err(|source| NativeError::Load {
            path: path.clone(),
            source,
        })?;
        let library = Self { library, path };
        for name in REQUIRED_SYMBOLS {
            library.check_symbol(name)?;
        }
        debug!(path = %library.path.display(), "loaded imaging library");
        Ok(library)
    }

    /// Load the library from [`LIBRARY_PATH_ENV`], falling back to the
    /// platform library name.
    pub fn load_default() -> Result<Self, NativeError> {
        match std::env::var_os(LIBRARY_PATH_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Self::load(default_library_name()),
        }
    }

    /// Path or library name this instance was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_symbol(&self, name: &'static str) -> Result<(), NativeError> {
        unsafe { self.library.get::<unsafe extern "C" fn()>(name.as_bytes()) }
            .map(|_| ())
            .map_err(|source| NativeError::MissingSymbol { name, source })
    }

    fn set_f64(&self, name: &'static str, value: f64) -> Result<(), NativeError> {
        let setter: Symbol<'_, unsafe extern "C" fn(f64)> =
            unsafe { self.library.get(name.as_bytes()) }
                .map_err(|source| NativeError::MissingSymbol { name, source })?;
        unsafe { setter(value) };
        Ok(())
    }

    f64_setters! {
        /// Rate of stray light reaching the sensor (photons/s).
        set_stray_light_rate => "setStrayLightRate",
        /// EMCCD dark current rate (photons/s).
        set_dark_current_rate => "setDarkCurrentRate",
        /// Shape parameter of the CMOS dark-current Gamma distribution.
        set_dark_current_sampling_alpha => "setDarkCurrentSamplingAlpha",
        /// Rate parameter of the CMOS dark-current Gamma distribution.
        set_dark_current_sampling_beta => "setDarkCurrentSamplingBeta",
        /// Chance for any pixel to pick up a clock-induced charge.
        set_cic_chance => "setCicChance",
        /// Quantum efficiency at the imaging wavelength.
        set_quantum_efficiency => "setQuantumEfficiency",
        /// Imaging wavelength (um).
        set_wavelength => "setWavelength",
        /// Numerical aperture of the objective.
        set_numerical_aperture => "setNumericalAperture",
        /// Physical size of a single pixel (um).
        set_physical_pixel_size => "setPhysicalPixelSize",
        /// Magnification of the optical system.
        set_magnification => "setMagnification",
        /// Bias clamp level.
        set_bias_clamp => "setBiasClamp",
        /// Standard deviation of the CMOS bias clamp.
        set_bias_stdev => "setBiasStdev",
        /// Standard deviation of the CMOS per-row noise.
        set_row_noise_stdev => "setRowNoiseStdev",
        /// Scale of the zero-mean Gumbel column noise.
        set_column_noise_scale => "setColumnNoiseScale",
        /// Scale of the zero-mean Gumbel flicker noise.
        set_flicker_noise_scale => "setFlickerNoiseScale",
        /// Pre-amplifier gain.
        set_preamp_gain => "setPreampgain",
        /// Chance for a serial clock-induced charge per gain register.
        set_scic_chance => "setSCICChance",
        /// Standard deviation of the final readout.
        set_readout_stdev => "setReadoutStdev",
        /// Number of EM gain registers; the native setter takes a double.
        set_number_gain_registers => "setNumberGainRegisters",
        /// Secondary-electron chance per gain register.
        set_p0 => "setP0",
        /// Average photons emitted by an atom per second.
        set_scattering_rate => "setScatteringRate",
        /// Exposure time (s).
        set_exposure_time => "setExposureTime",
        /// Chance for an atom to survive being imaged.
        set_survival_probability => "setSurvivalProbability",
        /// Chance for any site to hold an atom.
        set_filling_ratio => "setFillingRatio",
        /// Standard deviation of the finite light-source extent.
        set_light_source_stdev => "setLightSourceStdev",
    }

    /// Binning factor applied to the output image.
    pub fn set_binning(&self, binning: i32) -> Result<(), NativeError> {
        let name = "setBinning";
        let setter: Symbol<'_, unsafe extern "C" fn(c_int)> =
            unsafe { self.library.get(name.as_bytes()) }
                .map_err(|source| NativeError::MissingSymbol { name, source })?;
        unsafe { setter(binning) };
        Ok(())
    }

    /// Sensor resolution in pixels.
    pub fn set_resolution(&self, x: i32, y: i32) -> Result<(), NativeError> {
        let name = "setResolution";
        let setter: Symbol<'_, unsafe extern "C" fn(c_int, c_int)> =
            unsafe { self.library.get(name.as_bytes()) }
                .map_err(|source| NativeError::MissingSymbol { name, source })?;
        unsafe { setter(x, y) };
        Ok(())
    }

    /// All 15 Zernike aberration coefficients, Noll-ordered.
    pub fn set_zernike_coefficients(&self, coefficients: &[f64; 15]) -> Result<(), NativeError> {
        let name = "setZernikeCoefficients";
        let setter: Symbol<'_, unsafe extern "C" fn(*const f64)> =
            unsafe { self.library.get(name.as_bytes()) }
                .map_err(|source| NativeError::MissingSymbol { name, source })?;
        unsafe { setter(coefficients.as_ptr()) };
        Ok(())
    }

    /// Hand a key=value settings file to the library's own parser.
    pub fn read_config(&self, path: &Path) -> Result<(), NativeError> {
        let name = "readConfig";
        let utf8 = path
            .to_str()
            .ok_or_else(|| NativeError::InvalidPath(path.to_path_buf()))?;
        let c_path =
            CString::new(utf8).map_err(|_| NativeError::InvalidPath(path.to_path_buf()))?;
        let reader: Symbol<'_, unsafe extern "C" fn(*const c_char)> =
            unsafe { self.library.get(name.as_bytes()) }
                .map_err(|source| NativeError::MissingSymbol { name, source })?;
        unsafe { reader(c_path.as_ptr()) };
        Ok(())
    }

    /// Fetch the convolved light-source kernel as a flat
    /// `resolution * resolution` buffer.
    pub fn convolved_light_source(&self, resolution: usize) -> Result<Vec<f64>, NativeError> {
        let name = "getConvolutedLightSource";
        let fetch: Symbol<'_, unsafe extern "C" fn(*mut f64, c_int)> =
            unsafe { self.library.get(name.as_bytes()) }
                .map_err(|source| NativeError::MissingSymbol { name, source })?;
        let mut psf = vec![0.0; resolution * resolution];
        unsafe { fetch(psf.as_mut_ptr(), resolution as c_int) };
        Ok(psf)
    }

    /// Render an EMCCD frame into `image`, writing per-site ground
    /// truth into `truth`.
    ///
    /// `image` must hold one element per binned pixel and `truth` one
    /// per site; `camera_space` selects normalized camera coordinates
    /// over physical object-space coordinates for `sites`.
    pub fn create_image_emccd(
        &self,
        image: &mut [f64],
        sites: &[[f64; 2]],
        camera_space: bool,
        truth: &mut [f64],
        approximation_steps: i32,
    ) -> Result<(), NativeError> {
        self.create_image(
            "createImageEMCCD",
            image,
            sites,
            camera_space,
            truth,
            approximation_steps,
        )
    }

    /// Render a CMOS frame; same contract as [`Self::create_image_emccd`].
    pub fn create_image_cmos(
        &self,
        image: &mut [f64],
        sites: &[[f64; 2]],
        camera_space: bool,
        truth: &mut [f64],
        approximation_steps: i32,
    ) -> Result<(), NativeError> {
        self.create_image(
            "createImageCMOS",
            image,
            sites,
            camera_space,
            truth,
            approximation_steps,
        )
    }

    fn create_image(
        &self,
        name: &'static str,
        image: &mut [f64],
        sites: &[[f64; 2]],
        camera_space: bool,
        truth: &mut [f64],
        approximation_steps: i32,
    ) -> Result<(), NativeError> {
        debug_assert_eq!(truth.len(), sites.len());
        type CreateImageFn =
            unsafe extern "C" fn(*mut f64, *const [f64; 2], u16, *mut f64, c_int, c_int);
        let create: Symbol<'_, CreateImageFn> = unsafe { self.library.get(name.as_bytes()) }
            .map_err(|source| NativeError::MissingSymbol { name, source })?;
        unsafe {
            create(
                image.as_mut_ptr(),
                sites.as_ptr(),
                u16::from(camera_space),
                truth.as_mut_ptr(),
                sites.len() as c_int,
                approximation_steps,
            )
        };
        Ok(())
    }
}

impl std::fmt::Debug for ImagingLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagingLibrary")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_reports_path() {
        let err = ImagingLibrary::load("/definitely/not/here/libcreateSampleImage.so")
            .expect_err("load must fail for a nonexistent path");
        match err {
            NativeError::Load { path, .. } => {
                assert!(path.ends_with("libcreateSampleImage.so"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn default_library_name_matches_platform() {
        let name = default_library_name();
        assert!(name.contains("createSampleImage"));
        #[cfg(target_os = "linux")]
        assert_eq!(name, "libcreateSampleImage.so");
    }
}
