//! Chromatic adaptation transforms.
//!
//! A [`Cat`] is a named 3x3 matrix that maps tristimulus values between
//! illuminant white points through a cone-response intermediate space.
//! Adapting a color from one illuminant to another is a three step process:
//!
//! 1. Project XYZ (and both white points) into cone space via the matrix.
//! 2. Scale each cone component by the target/source white ratio
//!    (von-Kries-style diagonal scaling).
//! 3. Project back to XYZ via the matrix inverse.
//!
//! # Supported Methods
//!
//! - [`Cat::BRADFORD`] - Best overall accuracy (default choice)
//! - [`Cat::VON_KRIES`] - Classic Hunt-Pointer-Estevez cone model
//! - [`Cat::CAT02`] - From the CIECAM02 appearance model
//! - [`Cat::CAT16`] - From CIECAM16
//! - [`Cat::SHARP`] - Spectrally sharpened sensors
//! - [`Cat::CMCCAT2000`] - CMC 2000 transform
//! - [`Cat::XYZ_SCALING`] - Simple diagonal scaling, least accurate
//!
//! # Usage
//!
//! ```rust
//! use tinct_math::{Cat, Vec3};
//!
//! let d65 = Vec3::new(0.95047, 1.0, 1.08883);
//! let d50 = Vec3::new(0.96422, 1.0, 0.82521);
//!
//! let adapted = Cat::BRADFORD.adapt(d65, d65, d50).unwrap();
//! assert!((adapted.x - d50.x).abs() < 1e-3);
//! ```

use serde::Serialize;

use tinct_core::{Error, Result};

use crate::{Mat3, Vec3};

/// A named chromatic adaptation transform.
///
/// Immutable; [`Cat::inverse`] returns a new transform tagged as inverted.
/// The tag affects display only — the math is the plain matrix inverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cat {
    name: &'static str,
    matrix: Mat3,
    inverted: bool,
}

impl Cat {
    /// Bradford transform (Lam 1985). The usual default.
    pub const BRADFORD: Self = Self::new(
        "bradford",
        Mat3::from_rows([
            [0.8951, 0.2664, -0.1614],
            [-0.7502, 1.7135, 0.0367],
            [0.0389, -0.0685, 1.0296],
        ]),
    );

    /// Von Kries transform over Hunt-Pointer-Estevez cone responses.
    pub const VON_KRIES: Self = Self::new(
        "von_kries",
        Mat3::from_rows([
            [0.40024, 0.70760, -0.08081],
            [-0.22630, 1.16532, 0.04570],
            [0.00000, 0.00000, 0.91822],
        ]),
    );

    /// CAT02 transform from the CIECAM02 color appearance model.
    pub const CAT02: Self = Self::new(
        "cat02",
        Mat3::from_rows([
            [0.7328, 0.4296, -0.1624],
            [-0.7036, 1.6975, 0.0061],
            [0.0030, 0.0136, 0.9834],
        ]),
    );

    /// CAT16 transform from the CIECAM16 color appearance model.
    pub const CAT16: Self = Self::new(
        "cat16",
        Mat3::from_rows([
            [0.401288, 0.650173, -0.051461],
            [-0.250268, 1.204414, 0.045854],
            [-0.002079, 0.048952, 0.953127],
        ]),
    );

    /// Spectrally sharpened transform (Finlayson & Süsstrunk).
    pub const SHARP: Self = Self::new(
        "sharp",
        Mat3::from_rows([
            [1.2694, -0.0988, -0.1706],
            [-0.8364, 1.8006, 0.0357],
            [0.0297, -0.0315, 1.0018],
        ]),
    );

    /// CMCCAT2000 transform.
    pub const CMCCAT2000: Self = Self::new(
        "cmccat2000",
        Mat3::from_rows([
            [0.7982, 0.3389, -0.1371],
            [-0.5918, 1.5512, 0.0406],
            [0.0008, 0.0239, 0.9753],
        ]),
    );

    /// Plain XYZ scaling (identity cone space). Fast, least accurate.
    pub const XYZ_SCALING: Self = Self::new("xyz_scaling", Mat3::IDENTITY);

    /// Creates a named transform from its cone-projection matrix.
    pub const fn new(name: &'static str, matrix: Mat3) -> Self {
        Self {
            name,
            matrix,
            inverted: false,
        }
    }

    /// Transform name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The cone-projection matrix.
    #[inline]
    pub const fn matrix(&self) -> Mat3 {
        self.matrix
    }

    /// Whether this transform was produced by [`Cat::inverse`].
    #[inline]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Returns the inverse transform, tagged as inverted.
    ///
    /// The tag swaps the semantic row/column labels used for display;
    /// mathematically this is the standard matrix inverse.
    pub fn inverse(&self) -> Result<Self> {
        let matrix = self
            .matrix
            .inverse()
            .ok_or_else(|| Error::singular(self.matrix.determinant()))?;
        Ok(Self {
            name: self.name,
            matrix,
            inverted: !self.inverted,
        })
    }

    /// Adapts a tristimulus value from one white point to another.
    ///
    /// A zero source cone component is a domain error — the per-channel
    /// ratio would otherwise divide by zero.
    pub fn adapt(&self, xyz: Vec3, source_white: Vec3, target_white: Vec3) -> Result<Vec3> {
        let cone = self.matrix * xyz;
        let source_cone = self.matrix * source_white;
        let target_cone = self.matrix * target_white;

        if source_cone.x == 0.0 || source_cone.y == 0.0 || source_cone.z == 0.0 {
            return Err(Error::division_by_zero("chromatic adaptation cone ratio"));
        }

        let scaled = cone * (target_cone / source_cone);
        let back = self
            .matrix
            .inverse()
            .ok_or_else(|| Error::singular(self.matrix.determinant()))?;
        Ok(back * scaled)
    }

    /// Builds the composite adaptation matrix `M⁻¹ · S · M` for a white
    /// point pair.
    ///
    /// Applying the returned matrix to a tristimulus value is equivalent to
    /// [`Cat::adapt`] with the same white points.
    pub fn adapt_matrix(&self, source_white: Vec3, target_white: Vec3) -> Result<Mat3> {
        let source_cone = self.matrix * source_white;
        let target_cone = self.matrix * target_white;

        if source_cone.x == 0.0 || source_cone.y == 0.0 || source_cone.z == 0.0 {
            return Err(Error::division_by_zero("chromatic adaptation cone ratio"));
        }

        let scale = Mat3::diagonal_vec(target_cone / source_cone);
        let back = self
            .matrix
            .inverse()
            .ok_or_else(|| Error::singular(self.matrix.determinant()))?;
        Ok(back * scale * self.matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D65: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);
    const D50: Vec3 = Vec3::new(0.96422, 1.0, 0.82521);

    #[test]
    fn test_white_point_maps_to_target() {
        for cat in [Cat::BRADFORD, Cat::VON_KRIES, Cat::CAT02, Cat::XYZ_SCALING] {
            let adapted = cat.adapt(D65, D65, D50).unwrap();
            assert!((adapted.x - D50.x).abs() < 1e-6, "{}: {:?}", cat.name(), adapted);
            assert!((adapted.y - D50.y).abs() < 1e-6);
            assert!((adapted.z - D50.z).abs() < 1e-6);
        }
    }

    #[test]
    fn test_same_white_is_identity() {
        let xyz = Vec3::new(0.3, 0.4, 0.5);
        let adapted = Cat::BRADFORD.adapt(xyz, D65, D65).unwrap();
        assert!((adapted.x - xyz.x).abs() < 1e-9);
        assert!((adapted.y - xyz.y).abs() < 1e-9);
        assert!((adapted.z - xyz.z).abs() < 1e-9);
    }

    #[test]
    fn test_adapt_matrix_matches_adapt() {
        let xyz = Vec3::new(0.2, 0.5, 0.7);
        let via_matrix = Cat::BRADFORD.adapt_matrix(D65, D50).unwrap() * xyz;
        let direct = Cat::BRADFORD.adapt(xyz, D65, D50).unwrap();
        assert!((via_matrix.x - direct.x).abs() < 1e-12);
        assert!((via_matrix.y - direct.y).abs() < 1e-12);
        assert!((via_matrix.z - direct.z).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let xyz = Vec3::new(0.41, 0.21, 0.02);
        let there = Cat::BRADFORD.adapt(xyz, D65, D50).unwrap();
        let back = Cat::BRADFORD.adapt(there, D50, D65).unwrap();
        assert!((back.x - xyz.x).abs() < 1e-9);
        assert!((back.y - xyz.y).abs() < 1e-9);
        assert!((back.z - xyz.z).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_tagging() {
        let inv = Cat::BRADFORD.inverse().unwrap();
        assert!(inv.is_inverted());
        assert_eq!(inv.name(), "bradford");
        let double = inv.inverse().unwrap();
        assert!(!double.is_inverted());
        // Inverting twice recovers the original matrix.
        for i in 0..3 {
            for j in 0..3 {
                assert!((double.matrix().m[i][j] - Cat::BRADFORD.matrix().m[i][j]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_source_white_is_domain_error() {
        let err = Cat::XYZ_SCALING.adapt(D65, Vec3::ZERO, D50).unwrap_err();
        assert!(matches!(err, Error::DivisionByZero { .. }));
    }
}
