//! Optical aberrations as Zernike wavefront coefficients.

use serde::{Deserialize, Serialize};

/// Number of aberration terms the native library accepts.
pub const ZERNIKE_TERMS: usize = 15;

/// Noll-ordered Zernike coefficients describing the wavefront
/// aberrations of the imaging system.
///
/// The native library consumes exactly [`ZERNIKE_TERMS`] values, so the
/// vector is a fixed-size array rather than a slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZernikeCoefficients([f64; ZERNIKE_TERMS]);

impl ZernikeCoefficients {
    /// An unaberrated (flat) wavefront.
    pub fn flat() -> Self {
        Self([0.0; ZERNIKE_TERMS])
    }

    /// Coefficient array in the layout the native setter expects.
    pub fn as_array(&self) -> &[f64; ZERNIKE_TERMS] {
        &self.0
    }

    pub fn piston(&self) -> f64 {
        self.0[0]
    }

    pub fn tilt_y(&self) -> f64 {
        self.0[1]
    }

    pub fn tilt_x(&self) -> f64 {
        self.0[2]
    }

    pub fn defocus(&self) -> f64 {
        self.0[3]
    }

    pub fn astigmatism_oblique(&self) -> f64 {
        self.0[4]
    }

    pub fn astigmatism_vertical(&self) -> f64 {
        self.0[5]
    }

    pub fn coma_vertical(&self) -> f64 {
        self.0[6]
    }

    pub fn coma_horizontal(&self) -> f64 {
        self.0[7]
    }

    pub fn trefoil_vertical(&self) -> f64 {
        self.0[8]
    }

    pub fn trefoil_oblique(&self) -> f64 {
        self.0[9]
    }

    pub fn spherical(&self) -> f64 {
        self.0[10]
    }

    pub fn secondary_astigmatism_vertical(&self) -> f64 {
        self.0[11]
    }

    pub fn secondary_astigmatism_oblique(&self) -> f64 {
        self.0[12]
    }

    pub fn quadrafoil_vertical(&self) -> f64 {
        self.0[13]
    }

    pub fn quadrafoil_oblique(&self) -> f64 {
        self.0[14]
    }
}

impl Default for ZernikeCoefficients {
    fn default() -> Self {
        Self::flat()
    }
}

impl From<[f64; ZERNIKE_TERMS]> for ZernikeCoefficients {
    fn from(coefficients: [f64; ZERNIKE_TERMS]) -> Self {
        Self(coefficients)
    }
}

impl From<ZernikeCoefficients> for [f64; ZERNIKE_TERMS] {
    fn from(coefficients: ZernikeCoefficients) -> Self {
        coefficients.0
    }
}
