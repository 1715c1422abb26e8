//! Device RGB.
//!
//! Components are stored in the familiar 0..255 encoded range; the channel
//! system normalizes them onto [0, 1] for arithmetic. The encoding
//! specification supplies the transfer function and primaries that give
//! the components colorimetric meaning.

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, NormalizationLaw, Result,
};
use tinct_math::Vec3;

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};
use crate::models::Xyz;

const CHANNELS: [ChannelDefinition; 3] = [
    ChannelDefinition::new(
        "red",
        "Red",
        NormalizationLaw::Linear,
        Boundary::EIGHT_BIT,
        DisplayFormat::Integer,
    ),
    ChannelDefinition::new(
        "green",
        "Green",
        NormalizationLaw::Linear,
        Boundary::EIGHT_BIT,
        DisplayFormat::Integer,
    ),
    ChannelDefinition::new(
        "blue",
        "Blue",
        NormalizationLaw::Linear,
        Boundary::EIGHT_BIT,
        DisplayFormat::Integer,
    ),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("rgb", &CHANNELS);

define_model! {
    /// A device RGB color with 0..255 components.
    Rgb, "rgb", 3, SET;
    0 => red, with_red,
        (increment_red, with_red_incremented_by),
        (decrement_red, with_red_decremented_by),
        (scale_red, with_red_scaled_by),
        (contract_red, with_red_contracted_by);
    1 => green, with_green,
        (increment_green, with_green_incremented_by),
        (decrement_green, with_green_decremented_by),
        (scale_green, with_green_scaled_by),
        (contract_green, with_green_contracted_by);
    2 => blue, with_blue,
        (increment_blue, with_blue_incremented_by),
        (decrement_blue, with_blue_decremented_by),
        (scale_blue, with_blue_scaled_by),
        (contract_blue, with_blue_contracted_by);
}

impl Rgb {
    /// Creates an RGB color from 0..255 components at full opacity.
    pub fn new(red: f64, green: f64, blue: f64) -> Result<Self> {
        Self::from_parts(&[red, green, blue], 100.0, None)
    }

    /// The encoded components on [0, 1] (the channels' normalized form).
    #[inline]
    pub fn encoded(&self) -> Vec3 {
        Vec3::new(
            self.components.value(0).normalized(),
            self.components.value(1).normalized(),
            self.components.value(2).normalized(),
        )
    }

    /// Builds from encoded [0, 1] components without boundary validation.
    ///
    /// Conversion output may sit outside the cube until gamut mapping.
    pub(crate) fn from_encoded(
        encoded: Vec3,
        opacity: f64,
        encoding: Option<std::sync::Arc<EncodingSpecification>>,
    ) -> Result<Self> {
        Self::from_intermediate(
            &[encoded.x * 255.0, encoded.y * 255.0, encoded.z * 255.0],
            opacity,
            encoding,
        )
    }
}

impl IntoXyz for Rgb {
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz> {
        let transfer = spec.color_space().transfer();
        let encoded = self.encoded();
        let linear = Vec3::new(
            transfer.decode(encoded.x),
            transfer.decode(encoded.y),
            transfer.decode(encoded.z),
        );
        let xyz = spec.rgb_to_xyz_matrix() * linear;
        Xyz::from_vec(xyz, self.opacity(), self.encoding.clone())
    }
}

impl FromXyz for Rgb {
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self> {
        let transfer = spec.color_space().transfer();
        let linear = spec.xyz_to_rgb_matrix() * xyz.vec();
        let encoded = Vec3::new(
            transfer.encode(linear.x),
            transfer.encode(linear.y),
            transfer.encode(linear.z),
        );
        Self::from_encoded(encoded, ColorModel::opacity(xyz), ColorModel::encoding(xyz).cloned())
    }
}
