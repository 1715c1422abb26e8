//! CIE XYZ tristimulus.
//!
//! The device-independent pivot every conversion routes through. Channels
//! are unbound — tristimulus values outside the [0, 1] block are legal
//! (Z of D65 white is ~1.089, wide-gamut primaries go further).

use std::sync::Arc;

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, NormalizationLaw, Result,
};
use tinct_math::Vec3;

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};

const CHANNELS: [ChannelDefinition; 3] = [
    ChannelDefinition::new(
        "x",
        "X",
        NormalizationLaw::Linear,
        Boundary::unbound(),
        DisplayFormat::Decimal(4),
    )
    .with_step(0.01),
    ChannelDefinition::new(
        "y",
        "Y",
        NormalizationLaw::Linear,
        Boundary::unbound(),
        DisplayFormat::Decimal(4),
    )
    .with_step(0.01),
    ChannelDefinition::new(
        "z",
        "Z",
        NormalizationLaw::Linear,
        Boundary::unbound(),
        DisplayFormat::Decimal(4),
    )
    .with_step(0.01),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("xyz", &CHANNELS);

define_model! {
    /// A CIE XYZ tristimulus color.
    Xyz, "xyz", 3, SET;
    0 => x, with_x,
        (increment_x, with_x_incremented_by),
        (decrement_x, with_x_decremented_by),
        (scale_x, with_x_scaled_by),
        (contract_x, with_x_contracted_by);
    1 => y, with_y,
        (increment_y, with_y_incremented_by),
        (decrement_y, with_y_decremented_by),
        (scale_y, with_y_scaled_by),
        (contract_y, with_y_contracted_by);
    2 => z, with_z,
        (increment_z, with_z_incremented_by),
        (decrement_z, with_z_decremented_by),
        (scale_z, with_z_scaled_by),
        (contract_z, with_z_contracted_by);
}

impl Xyz {
    /// Creates a tristimulus color at full opacity.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::from_parts(&[x, y, z], 100.0, None)
    }

    /// The tristimulus triple as a vector.
    #[inline]
    pub fn vec(&self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    /// Builds from a vector, carrying opacity and encoding through a
    /// conversion.
    pub(crate) fn from_vec(
        v: Vec3,
        opacity: f64,
        encoding: Option<Arc<EncodingSpecification>>,
    ) -> Result<Self> {
        Self::from_intermediate(&[v.x, v.y, v.z], opacity, encoding)
    }
}

impl IntoXyz for Xyz {
    fn to_xyz(&self, _spec: &EncodingSpecification) -> Result<Xyz> {
        Ok(self.clone())
    }
}

impl FromXyz for Xyz {
    fn from_xyz(xyz: &Xyz, _spec: &EncodingSpecification) -> Result<Self> {
        Ok(xyz.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let c = Xyz::new(0.9505, 1.0, 1.0888).unwrap();
        assert_eq!(c.y(), 1.0);
        assert_eq!(c.opacity(), 100.0);
    }

    #[test]
    fn test_unbound_channels_accept_anything() {
        assert!(Xyz::new(-0.5, 2.0, 10.0).is_ok());
    }

    #[test]
    fn test_channel_derivatives() {
        let c = Xyz::new(0.5, 0.5, 0.5).unwrap();
        let up = c.increment_y().unwrap();
        assert!((up.y() - 0.51).abs() < 1e-12);
        let scaled = c.with_x_scaled_by(2.0).unwrap();
        assert!((scaled.x() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let c = Xyz::new(0.9505, 1.0, 1.0888).unwrap();
        assert_eq!(c.to_string(), "xyz(0.9505, 1.0000, 1.0888)");
    }
}
