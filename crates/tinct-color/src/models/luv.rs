//! CIE L*u*v*.
//!
//! The chromaticity-linear sibling of Lab, relative to the specification's
//! adapted white point through the u′v′ uniform chromaticity diagram.

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, Error, NormalizationLaw, Result,
};
use tinct_math::Vec3;

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};
use crate::models::lab::{EPSILON, KAPPA};
use crate::models::Xyz;

const CHANNELS: [ChannelDefinition; 3] = [
    ChannelDefinition::new(
        "lightness",
        "L*",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Decimal(2),
    ),
    ChannelDefinition::new(
        "u",
        "u*",
        NormalizationLaw::Opponent,
        Boundary::unbound(),
        DisplayFormat::Signed(2),
    ),
    ChannelDefinition::new(
        "v",
        "v*",
        NormalizationLaw::Opponent,
        Boundary::unbound(),
        DisplayFormat::Signed(2),
    ),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("luv", &CHANNELS);

define_model! {
    /// A CIE L*u*v* color.
    Luv, "luv", 3, SET;
    0 => lightness, with_lightness,
        (increment_lightness, with_lightness_incremented_by),
        (decrement_lightness, with_lightness_decremented_by),
        (scale_lightness, with_lightness_scaled_by),
        (contract_lightness, with_lightness_contracted_by);
    1 => u, with_u,
        (increment_u, with_u_incremented_by),
        (decrement_u, with_u_decremented_by),
        (scale_u, with_u_scaled_by),
        (contract_u, with_u_contracted_by);
    2 => v, with_v,
        (increment_v, with_v_incremented_by),
        (decrement_v, with_v_decremented_by),
        (scale_v, with_v_scaled_by),
        (contract_v, with_v_contracted_by);
}

impl Luv {
    /// Creates a Luv color at full opacity.
    pub fn new(lightness: f64, u: f64, v: f64) -> Result<Self> {
        Self::from_parts(&[lightness, u, v], 100.0, None)
    }
}

/// u′v′ chromaticity of a tristimulus value; `None` for a zero stimulus.
fn uv_prime(xyz: Vec3) -> Option<(f64, f64)> {
    let denom = xyz.x + 15.0 * xyz.y + 3.0 * xyz.z;
    if denom.abs() < 1e-12 {
        None
    } else {
        Some((4.0 * xyz.x / denom, 9.0 * xyz.y / denom))
    }
}

fn white_uv_prime(spec: &EncodingSpecification) -> Result<(f64, f64)> {
    uv_prime(spec.adapted_white_point())
        .ok_or_else(|| Error::division_by_zero("Luv reference white chromaticity"))
}

impl IntoXyz for Luv {
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz> {
        let white = spec.adapted_white_point();
        let (un, vn) = white_uv_prime(spec)?;
        let l = self.lightness();

        // L* of zero has no chromaticity; the stimulus is black.
        if l.abs() < 1e-12 {
            return Xyz::from_vec(Vec3::ZERO, self.opacity(), self.encoding.clone());
        }

        let u_prime = self.u() / (13.0 * l) + un;
        let v_prime = self.v() / (13.0 * l) + vn;
        if v_prime.abs() < 1e-12 {
            return Err(Error::division_by_zero("Luv v' chromaticity"));
        }

        let y = if l > KAPPA * EPSILON {
            ((l + 16.0) / 116.0).powi(3)
        } else {
            l / KAPPA
        } * white.y;

        let x = y * 9.0 * u_prime / (4.0 * v_prime);
        let z = y * (12.0 - 3.0 * u_prime - 20.0 * v_prime) / (4.0 * v_prime);

        Xyz::from_vec(Vec3::new(x, y, z), self.opacity(), self.encoding.clone())
    }
}

impl FromXyz for Luv {
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self> {
        let white = spec.adapted_white_point();
        let (un, vn) = white_uv_prime(spec)?;
        // A zero stimulus sits at the neutral axis.
        let (u_prime, v_prime) = uv_prime(xyz.vec()).unwrap_or((un, vn));

        let yr = xyz.y() / white.y;
        let l = if yr > EPSILON {
            116.0 * yr.cbrt() - 16.0
        } else {
            KAPPA * yr
        };

        Self::from_intermediate(
            &[l, 13.0 * l * (u_prime - un), 13.0 * l * (v_prime - vn)],
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
    fn test_white_is_neutral() {
        let spec = Config::default().specification().unwrap();
        let white = Xyz::from_vec(spec.adapted_white_point(), 100.0, None).unwrap();
        let luv = Luv::from_xyz(&white, &spec).unwrap();
        assert!((luv.lightness() - 100.0).abs() < 1e-9);
        assert!(luv.u().abs() < 1e-9);
        assert!(luv.v().abs() < 1e-9);
    }

    #[test]
    fn test_black_round_trip() {
        let spec = Config::default().specification().unwrap();
        let black = Xyz::new(0.0, 0.0, 0.0).unwrap();
        let luv = Luv::from_xyz(&black, &spec).unwrap();
        assert_eq!(luv.lightness(), 0.0);
        let back = luv.to_xyz(&spec).unwrap();
        assert_eq!(back.y(), 0.0);
    }

    #[test]
    fn test_xyz_round_trip() {
        let spec = Config::default().specification().unwrap();
        for (x, y, z) in [(0.2, 0.3, 0.4), (0.5, 0.2, 0.1), (0.9, 1.0, 1.0)] {
            let xyz = Xyz::new(x, y, z).unwrap();
            let luv = Luv::from_xyz(&xyz, &spec).unwrap();
            let back = luv.to_xyz(&spec).unwrap();
            assert!((back.x() - x).abs() < 1e-9, "x={x}");
            assert!((back.y() - y).abs() < 1e-9);
            assert!((back.z() - z).abs() < 1e-9);
        }
    }
}
