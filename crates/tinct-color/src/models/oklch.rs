//! Oklch: the cylindrical form of Oklab.

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, NormalizationLaw, Result,
};

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};
use crate::models::{Oklab, Xyz};

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
        "chroma",
        "C",
        NormalizationLaw::Linear,
        Boundary::at_least(0.0),
        DisplayFormat::Decimal(3),
    )
    .with_step(0.01),
    ChannelDefinition::new(
        "hue",
        "h",
        NormalizationLaw::Circular,
        Boundary::DEGREES,
        DisplayFormat::Degrees(1),
    ),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("oklch", &CHANNELS);

define_model! {
    /// An Oklch color.
    Oklch, "oklch", 3, SET;
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

impl Oklch {
    /// Creates an Oklch color at full opacity.
    pub fn new(lightness: f64, chroma: f64, hue: f64) -> Result<Self> {
        Self::from_parts(&[lightness, chroma, hue], 100.0, None)
    }

    /// Converts to rectangular Oklab.
    pub fn to_oklab(&self) -> Result<Oklab> {
        let radians = self.hue().to_radians();
        Oklab::from_intermediate(
            &[
                self.lightness(),
                self.chroma() * radians.cos(),
                self.chroma() * radians.sin(),
            ],
            self.opacity(),
            self.encoding.clone(),
        )
    }

    /// Converts from rectangular Oklab.
    pub fn from_oklab(oklab: &Oklab) -> Result<Self> {
        Self::from_intermediate(
            &[oklab.lightness(), oklab.chroma(), oklab.hue_degrees()],
            ColorModel::opacity(oklab),
            ColorModel::encoding(oklab).cloned(),
        )
    }
}

impl IntoXyz for Oklch {
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz> {
        self.to_oklab()?.to_xyz(spec)
    }
}

impl FromXyz for Oklch {
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self> {
        Self::from_oklab(&Oklab::from_xyz(xyz, spec)?)
    }
}
