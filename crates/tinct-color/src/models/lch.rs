//! CIE LCh(ab): the cylindrical form of Lab.
//!
//! Chroma is a non-negative magnitude without an upper bound; hue is
//! circular. The XYZ pivot goes through Lab.

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, NormalizationLaw, Result,
};

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};
use crate::models::{Lab, Xyz};

const CHANNELS: [ChannelDefinition; 3] = [
    ChannelDefinition::new(
        "lightness",
        "L*",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Decimal(2),
    ),
    ChannelDefinition::new(
        "chroma",
        "C*",
        NormalizationLaw::Linear,
        Boundary::at_least(0.0),
        DisplayFormat::Decimal(2),
    ),
    ChannelDefinition::new(
        "hue",
        "h",
        NormalizationLaw::Circular,
        Boundary::DEGREES,
        DisplayFormat::Degrees(1),
    ),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("lch", &CHANNELS);

define_model! {
    /// A CIE LCh(ab) color.
    Lch, "lch", 3, SET;
    0 => lightness, with_lightness,
        (increment_lightness, with_lightness_incremented_by),
        (decrement_lightness, with_lightness_decremented_by),
        (scale_lightness, with_lightness_scaled_by),
        (contract_lightness, with_lightness_contracted_by);
    1 => chroma, with_chroma,
        (increment_chroma, with_chroma_incremented_by),
        (decrement_chroma, with_chroma_decremented_by),
        (scale_chroma, with_chroma_scaled_by),
        (contract_chroma, with_chroma_contracted_by);
    2 => hue, with_hue,
        (increment_hue, with_hue_incremented_by),
        (decrement_hue, with_hue_decremented_by),
        (scale_hue, with_hue_scaled_by),
        (contract_hue, with_hue_contracted_by);
}

impl Lch {
    /// Creates an LCh color at full opacity.
    pub fn new(lightness: f64, chroma: f64, hue: f64) -> Result<Self> {
        Self::from_parts(&[lightness, chroma, hue], 100.0, None)
    }

    /// Converts to rectangular Lab.
    pub fn to_lab(&self) -> Result<Lab> {
        let radians = self.hue().to_radians();
        Lab::from_intermediate(
            &[
                self.lightness(),
                self.chroma() * radians.cos(),
                self.chroma() * radians.sin(),
            ],
            self.opacity(),
            self.encoding.clone(),
        )
    }

    /// Converts from rectangular Lab.
    pub fn from_lab(lab: &Lab) -> Result<Self> {
        Self::from_intermediate(
            &[lab.lightness(), lab.chroma(), lab.hue_degrees()],
            ColorModel::opacity(lab),
            ColorModel::encoding(lab).cloned(),
        )
    }
}

impl IntoXyz for Lch {
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz> {
        self.to_lab()?.to_xyz(spec)
    }
}

impl FromXyz for Lch {
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self> {
        Self::from_lab(&Lab::from_xyz(xyz, spec)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_round_trip() {
        let lch = Lch::new(52.0, 28.0, 130.0).unwrap();
        let back = Lch::from_lab(&lch.to_lab().unwrap()).unwrap();
        assert!((back.lightness() - 52.0).abs() < 1e-9);
        assert!((back.chroma() - 28.0).abs() < 1e-9);
        assert!((back.hue() - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_hue_wraps() {
        let lch = Lch::new(50.0, 20.0, 350.0).unwrap();
        let nudged = lch.with_hue_incremented_by(20.0 / 360.0).unwrap();
        assert!((nudged.hue() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadrants() {
        // Hue 180 lands on the negative a axis.
        let lab = Lch::new(50.0, 10.0, 180.0).unwrap().to_lab().unwrap();
        assert!((lab.a() + 10.0).abs() < 1e-9);
        assert!(lab.b().abs() < 1e-9);
    }
}
