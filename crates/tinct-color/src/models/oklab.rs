//! Oklab.
//!
//! Björn Ottosson's perceptual space: lightness on [0, 1], bipolar a/b
//! axes roughly within ±0.4. Oklab is defined against D65; when the
//! encoding specification targets a different white, the pivot adapts
//! tristimulus values to and from D65 with the specification's CAT.

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, NormalizationLaw, Result,
};
use tinct_math::{Mat3, Vec3};
use tinct_primaries::Illuminant;

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};
use crate::models::Xyz;

const CHANNELS: [ChannelDefinition; 3] = [
    ChannelDefinition::new(
        "lightness",
        "L",
        NormalizationLaw::Linear,
        Boundary::UNIT,
        DisplayFormat::Decimal(3),
    )
    .with_step(0.01),
    ChannelDefinition::new(
        "a",
        "a",
        NormalizationLaw::Bipolar,
        Boundary::unbound(),
        DisplayFormat::Signed(3),
    )
    .with_step(0.01),
    ChannelDefinition::new(
        "b",
        "b",
        NormalizationLaw::Bipolar,
        Boundary::unbound(),
        DisplayFormat::Signed(3),
    )
    .with_step(0.01),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("oklab", &CHANNELS);

// LMS matrices published for Oklab (color.js reference values).
const XYZ_TO_LMS: Mat3 = Mat3::from_rows([
    [0.8190224379967030, 0.3619062600528904, -0.1288737815209879],
    [0.0329836539323885, 0.9292868615863434, 0.0361446663506424],
    [0.0481771893596242, 0.2642395317527308, 0.6335478284694309],
]);

const LMS_TO_OKLAB: Mat3 = Mat3::from_rows([
    [0.2104542683093140, 0.7936177747023054, -0.0040720430116193],
    [1.9779985324311684, -2.4285922420485799, 0.4505937096174110],
    [0.0259040424655478, 0.7827717124575296, -0.8086757549230774],
]);

const OKLAB_TO_LMS: Mat3 = Mat3::from_rows([
    [1.0000000000000000, 0.3963377773761749, 0.2158037573099136],
    [1.0000000000000000, -0.1055613458156586, -0.0638541728258133],
    [1.0000000000000000, -0.0894841775298119, -1.2914855480194092],
]);

const LMS_TO_XYZ: Mat3 = Mat3::from_rows([
    [1.2268798758459243, -0.5578149944602171, 0.2813910456659647],
    [-0.0405757452148008, 1.1122868032803170, -0.0717110580655164],
    [-0.0763729366746601, -0.4214933324022432, 1.5869240198367816],
]);

define_model! {
    /// An Oklab color.
    Oklab, "oklab", 3, SET;
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

impl Oklab {
    /// Creates an Oklab color at full opacity.
    pub fn new(lightness: f64, a: f64, b: f64) -> Result<Self> {
        Self::from_parts(&[lightness, a, b], 100.0, None)
    }

    /// Chroma: the Euclidean magnitude of the a/b axes.
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

/// Whether the specification's white differs from D65 enough to need
/// adaptation around the fixed Oklab matrices.
fn needs_d65_bridge(spec: &EncodingSpecification) -> bool {
    let d65 = Illuminant::D65.white_point();
    let white = spec.adapted_white_point();
    (white.x - d65.x).abs() > 1e-6 || (white.z - d65.z).abs() > 1e-6
}

impl IntoXyz for Oklab {
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz> {
        let lab = Vec3::new(self.lightness(), self.a(), self.b());
        let lms = OKLAB_TO_LMS * lab;
        let mut xyz = LMS_TO_XYZ * (lms * lms * lms);

        if needs_d65_bridge(spec) {
            xyz = spec.chromatic_adaptation_transform().adapt(
                xyz,
                Illuminant::D65.white_point(),
                spec.adapted_white_point(),
            )?;
        }
        Xyz::from_vec(xyz, self.opacity(), self.encoding.clone())
    }
}

impl FromXyz for Oklab {
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self> {
        let mut v = xyz.vec();
        if needs_d65_bridge(spec) {
            v = spec.chromatic_adaptation_transform().adapt(
                v,
                spec.adapted_white_point(),
                Illuminant::D65.white_point(),
            )?;
        }
        let lab = LMS_TO_OKLAB * (XYZ_TO_LMS * v).cbrt();
        Self::from_intermediate(
            &[lab.x, lab.y, lab.z],
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
    fn test_d65_white_is_l1() {
        let spec = Config::default().specification().unwrap();
        let white = Xyz::from_vec(spec.adapted_white_point(), 100.0, None).unwrap();
        let ok = Oklab::from_xyz(&white, &spec).unwrap();
        assert!((ok.lightness() - 1.0).abs() < 1e-3, "L={}", ok.lightness());
        assert!(ok.a().abs() < 1e-3);
        assert!(ok.b().abs() < 1e-3);
    }

    #[test]
    fn test_xyz_round_trip() {
        let spec = Config::default().specification().unwrap();
        for (x, y, z) in [(0.2, 0.3, 0.4), (0.05, 0.02, 0.01), (0.9, 1.0, 1.05)] {
            let xyz = Xyz::new(x, y, z).unwrap();
            let ok = Oklab::from_xyz(&xyz, &spec).unwrap();
            let back = ok.to_xyz(&spec).unwrap();
            assert!((back.x() - x).abs() < 1e-9, "x={x}");
            assert!((back.y() - y).abs() < 1e-9);
            assert!((back.z() - z).abs() < 1e-9);
        }
    }

    #[test]
    fn test_negative_lms_round_trip() {
        // Out-of-gamut stimuli can push cone responses negative; the signed
        // cube root must keep the round trip exact.
        let spec = Config::default().specification().unwrap();
        let xyz = Xyz::new(0.0, 0.0, 0.5).unwrap();
        let ok = Oklab::from_xyz(&xyz, &spec).unwrap();
        let back = ok.to_xyz(&spec).unwrap();
        assert!(back.x().abs() < 1e-9);
        assert!((back.z() - 0.5).abs() < 1e-9);
    }
}
