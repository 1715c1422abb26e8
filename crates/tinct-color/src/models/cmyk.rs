//! CMYK: the naive subtractive model.
//!
//! Components are percentages. This is the device-independent arithmetic
//! conversion over encoded RGB, not an ICC press profile.

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, NormalizationLaw, Result,
};
use tinct_math::Vec3;

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};
use crate::models::{Rgb, Xyz};

const CHANNELS: [ChannelDefinition; 4] = [
    ChannelDefinition::new(
        "cyan",
        "Cyan",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Percent(1),
    ),
    ChannelDefinition::new(
        "magenta",
        "Magenta",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Percent(1),
    ),
    ChannelDefinition::new(
        "yellow",
        "Yellow",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Percent(1),
    ),
    ChannelDefinition::new(
        "key",
        "Key",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Percent(1),
    ),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("cmyk", &CHANNELS);

define_model! {
    /// A CMYK color with percentage components.
    Cmyk, "cmyk", 4, SET;
    0 => cyan, with_cyan,
        (increment_cyan, with_cyan_incremented_by),
        (decrement_cyan, with_cyan_decremented_by),
        (scale_cyan, with_cyan_scaled_by),
        (contract_cyan, with_cyan_contracted_by);
    1 => magenta, with_magenta,
        (increment_magenta, with_magenta_incremented_by),
        (decrement_magenta, with_magenta_decremented_by),
        (scale_magenta, with_magenta_scaled_by),
        (contract_magenta, with_magenta_contracted_by);
    2 => yellow, with_yellow,
        (increment_yellow, with_yellow_incremented_by),
        (decrement_yellow, with_yellow_decremented_by),
        (scale_yellow, with_yellow_scaled_by),
        (contract_yellow, with_yellow_contracted_by);
    3 => key, with_key,
        (increment_key, with_key_incremented_by),
        (decrement_key, with_key_decremented_by),
        (scale_key, with_key_scaled_by),
        (contract_key, with_key_contracted_by);
}

impl Cmyk {
    /// Creates a CMYK color at full opacity.
    pub fn new(cyan: f64, magenta: f64, yellow: f64, key: f64) -> Result<Self> {
        Self::from_parts(&[cyan, magenta, yellow, key], 100.0, None)
    }

    /// Converts to encoded RGB.
    pub fn to_rgb(&self) -> Result<Rgb> {
        let c = self.cyan() / 100.0;
        let m = self.magenta() / 100.0;
        let y = self.yellow() / 100.0;
        let k = self.key() / 100.0;

        let encoded = Vec3::new(
            (1.0 - c) * (1.0 - k),
            (1.0 - m) * (1.0 - k),
            (1.0 - y) * (1.0 - k),
        );
        Rgb::from_encoded(encoded, self.opacity(), self.encoding.clone())
    }

    /// Converts from encoded RGB.
    pub fn from_rgb(rgb: &Rgb) -> Result<Self> {
        let e = rgb.encoded();
        let k = 1.0 - e.max_element();
        let ink = 1.0 - k;

        // Pure black carries no chromatic ink.
        let (c, m, y) = if ink.abs() < 1e-12 {
            (0.0, 0.0, 0.0)
        } else {
            (
                (1.0 - e.x - k) / ink,
                (1.0 - e.y - k) / ink,
                (1.0 - e.z - k) / ink,
            )
        };

        Self::from_intermediate(
            &[c * 100.0, m * 100.0, y * 100.0, k * 100.0],
            ColorModel::opacity(rgb),
            ColorModel::encoding(rgb).cloned(),
        )
    }
}

impl IntoXyz for Cmyk {
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz> {
        self.to_rgb()?.to_xyz(spec)
    }
}

impl FromXyz for Cmyk {
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self> {
        Self::from_rgb(&Rgb::from_xyz(xyz, spec)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_black() {
        let black = Cmyk::from_rgb(&Rgb::new(0.0, 0.0, 0.0).unwrap()).unwrap();
        assert_eq!(black.key(), 100.0);
        assert_eq!(black.cyan(), 0.0);
    }

    #[test]
    fn test_pure_cyan() {
        let c = Cmyk::new(100.0, 0.0, 0.0, 0.0).unwrap().to_rgb().unwrap();
        assert_eq!(c.red(), 0.0);
        assert!((c.green() - 255.0).abs() < 1e-9);
        assert!((c.blue() - 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_round_trip() {
        for (r, g, b) in [(12.0, 200.0, 99.0), (255.0, 255.0, 255.0), (1.0, 2.0, 3.0)] {
            let rgb = Rgb::new(r, g, b).unwrap();
            let back = Cmyk::from_rgb(&rgb).unwrap().to_rgb().unwrap();
            assert!((back.red() - r).abs() < 1e-6);
            assert!((back.green() - g).abs() < 1e-6);
            assert!((back.blue() - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_four_channel_arity() {
        assert!(Cmyk::new(0.0, 0.0, 0.0, 101.0).is_err());
    }
}
