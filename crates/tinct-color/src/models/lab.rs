//! CIE L*a*b*.
//!
//! Lightness on 0..100, opponent axes unbound. The conversion is relative
//! to the encoding specification's adapted white point, using the standard
//! CIE f-function with the 216/24389 junction.

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, Error, NormalizationLaw, Result,
};
use tinct_math::Vec3;

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};
use crate::models::Xyz;

/// CIE junction constant (216/24389).
pub(crate) const EPSILON: f64 = 216.0 / 24389.0;

/// CIE slope constant (24389/27).
pub(crate) const KAPPA: f64 = 24389.0 / 27.0;

const CHANNELS: [ChannelDefinition; 3] = [
    ChannelDefinition::new(
        "lightness",
        "L*",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Decimal(2),
    ),
    ChannelDefinition::new(
        "a",
        "a*",
        NormalizationLaw::Opponent,
        Boundary::unbound(),
        DisplayFormat::Signed(2),
    ),
    ChannelDefinition::new(
        "b",
        "b*",
        NormalizationLaw::Opponent,
        Boundary::unbound(),
        DisplayFormat::Signed(2),
    ),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("lab", &CHANNELS);

define_model! {
    /// A CIE L*a*b* color.
    Lab, "lab", 3, SET;
    0 => lightness, with_lightness,
        (increment_lightness, with_lightness_incremented_by),
        (decrement_lightness, with_lightness_decremented_by),
        (scale_lightness, with_lightness_scaled_by),
        (contract_lightness, with_lightness_contracted_by);
    1 => a, with_a,
        (increment_a, with_a_incremented_by),
        (decrement_a, with_a_decremented_by),
        (scale_a, with_a_scaled_by),
        (contract_a, with_a_contracted_by);
    2 => b, with_b,
        (increment_b, with_b_incremented_by),
        (decrement_b, with_b_decremented_by),
        (scale_b, with_b_scaled_by),
        (contract_b, with_b_contracted_by);
}

impl Lab {
    /// Creates a Lab color at full opacity.
    pub fn new(lightness: f64, a: f64, b: f64) -> Result<Self> {
        Self::from_parts(&[lightness, a, b], 100.0, None)
    }

    /// Builds without boundary validation, for converter output.
    pub(crate) fn intermediate(lightness: f64, a: f64, b: f64) -> Result<Self> {
        Self::from_intermediate(&[lightness, a, b], 100.0, None)
    }

    /// Chroma: the Euclidean magnitude of the opponent axes.
    #[inline]
    pub fn chroma(&self) -> f64 {
        self.a().hypot(self.b())
    }

    /// Hue angle in degrees, wrapped to [0, 360).
    #[inline]
    pub fn hue_degrees(&self) -> f64 {
        self.b().atan2(self.a()).to_degrees().rem_euclid(360.0)
    }
}

/// Checks a white point is usable as a Lab reference.
fn reference_white(spec: &EncodingSpecification) -> Result<Vec3> {
    let white = spec.adapted_white_point();
    if white.x.abs() < 1e-12 || white.y.abs() < 1e-12 || white.z.abs() < 1e-12 {
        return Err(Error::division_by_zero("Lab reference white"));
    }
    Ok(white)
}

impl IntoXyz for Lab {
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz> {
        let white = reference_white(spec)?;
        let l = self.lightness();

        let fy = (l + 16.0) / 116.0;
        let fx = fy + self.a() / 500.0;
        let fz = fy - self.b() / 200.0;

        let xr = if fx.powi(3) > EPSILON {
            fx.powi(3)
        } else {
            (116.0 * fx - 16.0) / KAPPA
        };
        let yr = if l > KAPPA * EPSILON {
            fy.powi(3)
        } else {
            l / KAPPA
        };
        let zr = if fz.powi(3) > EPSILON {
            fz.powi(3)
        } else {
            (116.0 * fz - 16.0) / KAPPA
        };

        Xyz::from_vec(
            Vec3::new(xr * white.x, yr * white.y, zr * white.z),
            self.opacity(),
            self.encoding.clone(),
        )
    }
}

impl FromXyz for Lab {
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self> {
        let white = reference_white(spec)?;
        let r = xyz.vec() / white;

        let f = |t: f64| {
            if t > EPSILON {
                t.cbrt()
            } else {
                (KAPPA * t + 16.0) / 116.0
            }
        };
        let (fx, fy, fz) = (f(r.x), f(r.y), f(r.z));

        Self::from_intermediate(
            &[
                116.0 * fy - 16.0,
                500.0 * (fx - fy),
                200.0 * (fy - fz),
            ],
            ColorModel::opacity(xyz),
            ColorModel::encoding(xyz).cloned(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_white_is_l100() {
        let spec = Config::default().specification().unwrap();
        let white = Xyz::from_vec(spec.adapted_white_point(), 100.0, None).unwrap();
        let lab = Lab::from_xyz(&white, &spec).unwrap();
        assert!((lab.lightness() - 100.0).abs() < 1e-9);
        assert!(lab.a().abs() < 1e-9);
        assert!(lab.b().abs() < 1e-9);
    }

    #[test]
    fn test_black_is_l0() {
        let spec = Config::default().specification().unwrap();
        let black = Xyz::new(0.0, 0.0, 0.0).unwrap();
        let lab = Lab::from_xyz(&black, &spec).unwrap();
        assert!(lab.lightness().abs() < 1e-9);
    }

    #[test]
    fn test_xyz_round_trip() {
        let spec = Config::default().specification().unwrap();
        for (x, y, z) in [(0.2, 0.3, 0.4), (0.01, 0.005, 0.002), (0.95, 1.0, 1.08)] {
            let xyz = Xyz::new(x, y, z).unwrap();
            let lab = Lab::from_xyz(&xyz, &spec).unwrap();
            let back = lab.to_xyz(&spec).unwrap();
            assert!((back.x() - x).abs() < 1e-9, "x={x}");
            assert!((back.y() - y).abs() < 1e-9, "y={y}");
            assert!((back.z() - z).abs() < 1e-9, "z={z}");
        }
    }

    #[test]
    fn test_chroma_and_hue() {
        let lab = Lab::new(50.0, 3.0, 4.0).unwrap();
        assert!((lab.chroma() - 5.0).abs() < 1e-12);
        let gray = Lab::new(50.0, 0.0, 0.0).unwrap();
        assert_eq!(gray.chroma(), 0.0);
    }
}
