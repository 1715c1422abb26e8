//! HSV: hue, saturation, value.

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, NormalizationLaw, Result,
};

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};
use crate::models::hsl::{hue_degrees, sector_rgb};
use crate::models::{Rgb, Xyz};

const CHANNELS: [ChannelDefinition; 3] = [
    ChannelDefinition::new(
        "hue",
        "Hue",
        NormalizationLaw::Circular,
        Boundary::DEGREES,
        DisplayFormat::Degrees(1),
    ),
    ChannelDefinition::new(
        "saturation",
        "Saturation",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Percent(1),
    ),
    ChannelDefinition::new(
        "value",
        "Value",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Percent(1),
    ),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("hsv", &CHANNELS);

define_model! {
    /// An HSV color (hue 0..360, saturation and value 0..100).
    Hsv, "hsv", 3, SET;
    0 => hue, with_hue,
        (increment_hue, with_hue_incremented_by),
        (decrement_hue, with_hue_decremented_by),
        (scale_hue, with_hue_scaled_by),
        (contract_hue, with_hue_contracted_by);
    1 => saturation, with_saturation,
        (increment_saturation, with_saturation_incremented_by),
        (decrement_saturation, with_saturation_decremented_by),
        (scale_saturation, with_saturation_scaled_by),
        (contract_saturation, with_saturation_contracted_by);
    2 => value, with_value,
        (increment_value, with_value_incremented_by),
        (decrement_value, with_value_decremented_by),
        (scale_value, with_value_scaled_by),
        (contract_value, with_value_contracted_by);
}

impl Hsv {
    /// Creates an HSV color at full opacity.
    pub fn new(hue: f64, saturation: f64, value: f64) -> Result<Self> {
        Self::from_parts(&[hue, saturation, value], 100.0, None)
    }

    /// Converts to encoded RGB.
    pub fn to_rgb(&self) -> Result<Rgb> {
        let h = self.hue().rem_euclid(360.0);
        let s = self.saturation() / 100.0;
        let v = self.value() / 100.0;

        let chroma = v * s;
        let secondary = chroma * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let offset = v - chroma;

        let (r, g, b) = sector_rgb(h, chroma, secondary);
        Rgb::from_intermediate(
            &[
                (r + offset) * 255.0,
                (g + offset) * 255.0,
                (b + offset) * 255.0,
            ],
            self.opacity(),
            self.encoding.clone(),
        )
    }

    /// Converts from encoded RGB.
    pub fn from_rgb(rgb: &Rgb) -> Result<Self> {
        let e = rgb.encoded();
        let max = e.max_element();
        let min = e.min_element();
        let delta = max - min;

        let h = if delta.abs() < 1e-12 {
            0.0
        } else {
            hue_degrees(e.x, e.y, e.z, max, delta)
        };
        let s = if max.abs() < 1e-12 { 0.0 } else { delta / max };

        Self::from_intermediate(
            &[h, s * 100.0, max * 100.0],
            ColorModel::opacity(rgb),
            ColorModel::encoding(rgb).cloned(),
        )
    }
}

impl IntoXyz for Hsv {
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz> {
        self.to_rgb()?.to_xyz(spec)
    }
}

impl FromXyz for Hsv {
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self> {
        Self::from_rgb(&Rgb::from_xyz(xyz, spec)?)
    }
}
