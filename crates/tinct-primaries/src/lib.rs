//! # tinct-primaries
//!
//! Chromaticities, illuminants, observers, and RGB color space descriptors.
//!
//! This crate provides the configuration objects the encoding layer
//! consumes: white points as CIE xy chromaticities, standard illuminant and
//! observer descriptors, viewing conditions, and RGB color spaces defined
//! by their primaries and transfer function. It also derives the native
//! RGB-to-XYZ matrix for a set of primaries by solving the white point
//! system through the general matrix layer.
//!
//! # What are Color Primaries?
//!
//! Color primaries define the gamut a color space can represent. Each
//! primary is specified as CIE xy chromaticity coordinates; the white point
//! pins the neutral axis.
//!
//! # Usage
//!
//! ```rust
//! use tinct_primaries::{RgbColorSpace, rgb_to_xyz_for_white};
//!
//! let srgb = RgbColorSpace::SRGB;
//! let m = rgb_to_xyz_for_white(&srgb, srgb.white_point()).unwrap();
//!
//! // White (1,1,1) maps to the white point tristimulus.
//! let white = m * tinct_math::Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-9);
//! ```
//!
//! # Dependencies
//!
//! - [`tinct-core`] - Error types
//! - [`tinct-math`] - Matrix solve for the white point system

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod transfer;

pub use transfer::Transfer;

use serde::Serialize;

use tinct_core::{Error, Result};
use tinct_math::{ColVector, Mat3, Matrix, Vec3};

/// CIE xy chromaticity coordinates.
///
/// A chromaticity names a color direction independent of luminance; lifting
/// it to tristimulus assumes `Y = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chromaticity {
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
}

impl Chromaticity {
    /// Creates a chromaticity.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Lifts to XYZ tristimulus with `Y = 1`.
    ///
    /// A zero `y` has no defined luminance lift and maps to the zero
    /// vector.
    #[inline]
    pub fn to_xyz(self) -> Vec3 {
        if self.y.abs() < 1e-10 {
            Vec3::ZERO
        } else {
            Vec3::new(self.x / self.y, 1.0, (1.0 - self.x - self.y) / self.y)
        }
    }

    /// Projects a tristimulus value down to chromaticity.
    ///
    /// The sum `X + Y + Z` must be nonzero.
    pub fn from_xyz(xyz: Vec3) -> Result<Self> {
        let sum = xyz.x + xyz.y + xyz.z;
        if sum.abs() < 1e-10 {
            return Err(Error::division_by_zero("chromaticity projection"));
        }
        Ok(Self::new(xyz.x / sum, xyz.y / sum))
    }
}

// ============================================================================
// Standard Illuminants
// ============================================================================

/// A standard illuminant: a named white point chromaticity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Illuminant {
    name: &'static str,
    chromaticity: Chromaticity,
}

impl Illuminant {
    /// Incandescent / tungsten (~2856K).
    pub const A: Self = Self::new("A", Chromaticity::new(0.44757, 0.40745));

    /// Average daylight (obsolete north-sky standard).
    pub const C: Self = Self::new("C", Chromaticity::new(0.31006, 0.31616));

    /// Horizon light (~5000K). Printing industry reference.
    pub const D50: Self = Self::new("D50", Chromaticity::new(0.34567, 0.35850));

    /// Mid-morning daylight (~5500K).
    pub const D55: Self = Self::new("D55", Chromaticity::new(0.33242, 0.34743));

    /// Noon daylight (~6504K). sRGB and Rec.709/2020 reference.
    pub const D65: Self = Self::new("D65", Chromaticity::new(0.31270, 0.32900));

    /// North-sky daylight (~7500K).
    pub const D75: Self = Self::new("D75", Chromaticity::new(0.29902, 0.31485));

    /// Equal-energy radiator.
    pub const E: Self = Self::new("E", Chromaticity::new(1.0 / 3.0, 1.0 / 3.0));

    /// Cool white fluorescent.
    pub const F2: Self = Self::new("F2", Chromaticity::new(0.37208, 0.37529));

    /// Broadband daylight fluorescent.
    pub const F7: Self = Self::new("F7", Chromaticity::new(0.31292, 0.32933));

    /// Narrowband tri-phosphor fluorescent.
    pub const F11: Self = Self::new("F11", Chromaticity::new(0.38052, 0.37713));

    /// Creates a named illuminant.
    pub const fn new(name: &'static str, chromaticity: Chromaticity) -> Self {
        Self { name, chromaticity }
    }

    /// Illuminant name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// White point chromaticity.
    #[inline]
    pub const fn chromaticity(&self) -> Chromaticity {
        self.chromaticity
    }

    /// White point tristimulus (`Y = 1`).
    #[inline]
    pub fn white_point(&self) -> Vec3 {
        self.chromaticity.to_xyz()
    }
}

// ============================================================================
// Observers & Viewing Conditions
// ============================================================================

/// A CIE standard colorimetric observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observer {
    name: &'static str,
    degrees: u8,
}

impl Observer {
    /// CIE 1931 2-degree observer.
    pub const CIE_1931: Self = Self {
        name: "CIE 1931",
        degrees: 2,
    };

    /// CIE 1964 10-degree observer.
    pub const CIE_1964: Self = Self {
        name: "CIE 1964",
        degrees: 10,
    };

    /// Observer name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Field of view in degrees.
    #[inline]
    pub const fn degrees(&self) -> u8 {
        self.degrees
    }
}

/// Surround classification for a viewing condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Surround {
    /// Typical office/daylight viewing.
    Average,
    /// Dim surround (television viewing).
    Dim,
    /// Dark surround (cinema).
    Dark,
}

/// Viewing environment parameters.
///
/// Carried by the encoding specification for identity purposes; the
/// conversion pipeline itself only branches on the surround class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewingCondition {
    name: &'static str,
    surround: Surround,
    /// Adapting field luminance in cd/m².
    adapting_luminance: f64,
    /// Background relative luminance (percent of white).
    background_luminance: f64,
}

impl ViewingCondition {
    /// Average surround, 64 cd/m² adapting field, 20% background.
    pub const AVERAGE: Self = Self {
        name: "average",
        surround: Surround::Average,
        adapting_luminance: 64.0,
        background_luminance: 20.0,
    };

    /// Dim surround.
    pub const DIM: Self = Self {
        name: "dim",
        surround: Surround::Dim,
        adapting_luminance: 32.0,
        background_luminance: 20.0,
    };

    /// Dark surround.
    pub const DARK: Self = Self {
        name: "dark",
        surround: Surround::Dark,
        adapting_luminance: 16.0,
        background_luminance: 20.0,
    };

    /// Condition name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Surround classification.
    #[inline]
    pub const fn surround(&self) -> Surround {
        self.surround
    }

    /// Adapting field luminance in cd/m².
    #[inline]
    pub const fn adapting_luminance(&self) -> f64 {
        self.adapting_luminance
    }

    /// Background relative luminance.
    #[inline]
    pub const fn background_luminance(&self) -> f64 {
        self.background_luminance
    }
}

// ============================================================================
// RGB Color Spaces
// ============================================================================

/// An RGB color space: three primaries, a native white, and a transfer
/// function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbColorSpace {
    name: &'static str,
    red: Chromaticity,
    green: Chromaticity,
    blue: Chromaticity,
    white: Illuminant,
    transfer: Transfer,
}

impl RgbColorSpace {
    /// sRGB / Rec.709 primaries with the piecewise sRGB transfer (D65).
    pub const SRGB: Self = Self {
        name: "sRGB",
        red: Chromaticity::new(0.6400, 0.3300),
        green: Chromaticity::new(0.3000, 0.6000),
        blue: Chromaticity::new(0.1500, 0.0600),
        white: Illuminant::D65,
        transfer: Transfer::Srgb,
    };

    /// Display P3: DCI-P3 primaries with the sRGB transfer and D65 white.
    pub const DISPLAY_P3: Self = Self {
        name: "Display P3",
        red: Chromaticity::new(0.6800, 0.3200),
        green: Chromaticity::new(0.2650, 0.6900),
        blue: Chromaticity::new(0.1500, 0.0600),
        white: Illuminant::D65,
        transfer: Transfer::Srgb,
    };

    /// Adobe RGB (1998): gamma 2.2-class transfer, D65 white.
    pub const ADOBE_RGB: Self = Self {
        name: "Adobe RGB (1998)",
        red: Chromaticity::new(0.6400, 0.3300),
        green: Chromaticity::new(0.2100, 0.7100),
        blue: Chromaticity::new(0.1500, 0.0600),
        white: Illuminant::D65,
        transfer: Transfer::Gamma(563.0 / 256.0),
    };

    /// Rec.2020 ultra-wide gamut with the Rec.709-style camera transfer.
    pub const REC2020: Self = Self {
        name: "Rec.2020",
        red: Chromaticity::new(0.7080, 0.2920),
        green: Chromaticity::new(0.1700, 0.7970),
        blue: Chromaticity::new(0.1310, 0.0460),
        white: Illuminant::D65,
        transfer: Transfer::Rec709,
    };

    /// ProPhoto RGB (ROMM): very wide gamut, gamma 1.8, D50 white.
    pub const PROPHOTO_RGB: Self = Self {
        name: "ProPhoto RGB",
        red: Chromaticity::new(0.7347, 0.2653),
        green: Chromaticity::new(0.1596, 0.8404),
        blue: Chromaticity::new(0.0366, 0.0001),
        white: Illuminant::D50,
        transfer: Transfer::Gamma(1.8),
    };

    /// Creates a custom color space.
    pub const fn new(
        name: &'static str,
        red: Chromaticity,
        green: Chromaticity,
        blue: Chromaticity,
        white: Illuminant,
        transfer: Transfer,
    ) -> Self {
        Self {
            name,
            red,
            green,
            blue,
            white,
            transfer,
        }
    }

    /// Color space name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Red primary chromaticity.
    #[inline]
    pub const fn red(&self) -> Chromaticity {
        self.red
    }

    /// Green primary chromaticity.
    #[inline]
    pub const fn green(&self) -> Chromaticity {
        self.green
    }

    /// Blue primary chromaticity.
    #[inline]
    pub const fn blue(&self) -> Chromaticity {
        self.blue
    }

    /// The native illuminant.
    #[inline]
    pub const fn native_illuminant(&self) -> Illuminant {
        self.white
    }

    /// Native white point tristimulus (`Y = 1`).
    #[inline]
    pub fn white_point(&self) -> Vec3 {
        self.white.white_point()
    }

    /// The transfer function.
    #[inline]
    pub const fn transfer(&self) -> Transfer {
        self.transfer
    }
}

// ============================================================================
// Matrix Generation
// ============================================================================

/// Computes the RGB-to-XYZ matrix for a set of primaries and a white point.
///
/// The primary chromaticities are lifted to tristimulus and placed as
/// matrix columns, then a diagonal scaling `S` is solved from
/// `P * S = white` so that RGB (1,1,1) maps exactly onto the white point.
/// The solve goes through the general [`Matrix`] layer.
///
/// Degenerate primaries (collinear chromaticities) surface as a singular
/// matrix error.
pub fn rgb_to_xyz_for_white(space: &RgbColorSpace, white: Vec3) -> Result<Mat3> {
    let r = space.red().to_xyz();
    let g = space.green().to_xyz();
    let b = space.blue().to_xyz();

    let primaries = Matrix::from_rows(vec![
        vec![r.x, g.x, b.x],
        vec![r.y, g.y, b.y],
        vec![r.z, g.z, b.z],
    ])?;

    // S = P^-1 * W
    let scale = primaries.inverse()?.mul_col(&ColVector::from(white))?;
    let s = scale.to_vec3()?;

    Ok(Mat3::from_col_vecs(r * s.x, g * s.y, b * s.z))
}

/// Computes the XYZ-to-RGB matrix: the inverse of
/// [`rgb_to_xyz_for_white`].
pub fn xyz_to_rgb_for_white(space: &RgbColorSpace, white: Vec3) -> Result<Mat3> {
    let forward = rgb_to_xyz_for_white(space, white)?;
    forward
        .inverse()
        .ok_or_else(|| Error::singular(forward.determinant()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromaticity_lift() {
        let d65 = Illuminant::D65.white_point();
        assert!((d65.x - 0.95047).abs() < 1e-4);
        assert_eq!(d65.y, 1.0);
        assert!((d65.z - 1.08883).abs() < 1e-3);
    }

    #[test]
    fn test_chromaticity_round_trip() {
        let c = Chromaticity::new(0.3127, 0.3290);
        let back = Chromaticity::from_xyz(c.to_xyz()).unwrap();
        assert!((back.x - c.x).abs() < 1e-12);
        assert!((back.y - c.y).abs() < 1e-12);
    }

    #[test]
    fn test_zero_sum_projection_raises() {
        assert!(Chromaticity::from_xyz(Vec3::ZERO).is_err());
    }

    #[test]
    fn test_srgb_matrix_matches_reference() {
        use approx::assert_abs_diff_eq;

        let m = rgb_to_xyz_for_white(&RgbColorSpace::SRGB, RgbColorSpace::SRGB.white_point())
            .unwrap();
        // IEC 61966-2-1 reference values.
        assert_abs_diff_eq!(m.m[0][0], 0.4124564, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m[1][0], 0.2126729, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m[2][2], 0.9503041, epsilon = 1e-3);
    }

    #[test]
    fn test_white_maps_to_white_point() {
        for space in [
            RgbColorSpace::SRGB,
            RgbColorSpace::DISPLAY_P3,
            RgbColorSpace::ADOBE_RGB,
            RgbColorSpace::REC2020,
            RgbColorSpace::PROPHOTO_RGB,
        ] {
            let m = rgb_to_xyz_for_white(&space, space.white_point()).unwrap();
            let white = m * Vec3::ONE;
            let expected = space.white_point();
            assert!(
                (white.x - expected.x).abs() < 1e-9,
                "{}: {white:?}",
                space.name()
            );
            assert!((white.y - expected.y).abs() < 1e-9);
            assert!((white.z - expected.z).abs() < 1e-9);
        }
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let white = RgbColorSpace::SRGB.white_point();
        let to_xyz = rgb_to_xyz_for_white(&RgbColorSpace::SRGB, white).unwrap();
        let to_rgb = xyz_to_rgb_for_white(&RgbColorSpace::SRGB, white).unwrap();

        let rgb = Vec3::new(0.5, 0.3, 0.8);
        let back = to_rgb * (to_xyz * rgb);
        assert!((rgb.x - back.x).abs() < 1e-9);
        assert!((rgb.y - back.y).abs() < 1e-9);
        assert!((rgb.z - back.z).abs() < 1e-9);
    }

    #[test]
    fn test_observers() {
        assert_eq!(Observer::CIE_1931.degrees(), 2);
        assert_eq!(Observer::CIE_1964.degrees(), 10);
    }

    #[test]
    fn test_illuminants_have_unit_luminance() {
        for illuminant in [
            Illuminant::A,
            Illuminant::C,
            Illuminant::D50,
            Illuminant::D55,
            Illuminant::D65,
            Illuminant::D75,
            Illuminant::E,
        ] {
            assert_eq!(illuminant.white_point().y, 1.0, "{}", illuminant.name());
        }
    }
}
