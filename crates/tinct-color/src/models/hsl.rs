//! HSL: hue, saturation, lightness.
//!
//! A cylindrical view of encoded RGB. Hue is a circular channel — all hue
//! arithmetic wraps around the full turn.

use tinct_core::{
    Boundary, ChannelDefinition, ChannelSet, DisplayFormat, NormalizationLaw, Result,
};

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::{define_model, ColorModel};
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
        "lightness",
        "Lightness",
        NormalizationLaw::Linear,
        Boundary::PERCENT,
        DisplayFormat::Percent(1),
    ),
];

pub(crate) const SET: ChannelSet = ChannelSet::new("hsl", &CHANNELS);

define_model! {
    /// An HSL color (hue 0..360, saturation and lightness 0..100).
    Hsl, "hsl", 3, SET;
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
    2 => lightness, with_lightness,
        (increment_lightness, with_lightness_incremented_by),
        (decrement_lightness, with_lightness_decremented_by),
        (scale_lightness, with_lightness_scaled_by),
        (contract_lightness, with_lightness_contracted_by);
}

impl Hsl {
    /// Creates an HSL color at full opacity.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Result<Self> {
        Self::from_parts(&[hue, saturation, lightness], 100.0, None)
    }

    /// Converts to encoded RGB.
    pub fn to_rgb(&self) -> Result<Rgb> {
        let h = self.hue().rem_euclid(360.0);
        let s = self.saturation() / 100.0;
        let l = self.lightness() / 100.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let secondary = chroma * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let offset = l - chroma / 2.0;

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
        let l = (max + min) / 2.0;

        let (h, s) = if delta.abs() < 1e-12 {
            (0.0, 0.0)
        } else {
            let s = delta / (1.0 - (2.0 * l - 1.0).abs());
            (hue_degrees(e.x, e.y, e.z, max, delta), s)
        };

        Self::from_intermediate(
            &[h, s * 100.0, l * 100.0],
            ColorModel::opacity(rgb),
            ColorModel::encoding(rgb).cloned(),
        )
    }
}

/// Distributes chroma across the RGB sextant for a hue angle.
pub(crate) fn sector_rgb(h: f64, chroma: f64, secondary: f64) -> (f64, f64, f64) {
    match (h / 60.0) as u32 {
        0 => (chroma, secondary, 0.0),
        1 => (secondary, chroma, 0.0),
        2 => (0.0, chroma, secondary),
        3 => (0.0, secondary, chroma),
        4 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    }
}

/// Hue angle in degrees from encoded components.
pub(crate) fn hue_degrees(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (h * 60.0).rem_euclid(360.0)
}

impl IntoXyz for Hsl {
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz> {
        self.to_rgb()?.to_xyz(spec)
    }
}

impl FromXyz for Hsl {
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self> {
        Self::from_rgb(&Rgb::from_xyz(xyz, spec)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        let red = Hsl::new(0.0, 100.0, 50.0).unwrap().to_rgb().unwrap();
        assert!((red.red() - 255.0).abs() < 1e-9);
        assert!(red.green().abs() < 1e-9);

        let green = Hsl::new(120.0, 100.0, 50.0).unwrap().to_rgb().unwrap();
        assert!((green.green() - 255.0).abs() < 1e-9);

        let blue = Hsl::new(240.0, 100.0, 50.0).unwrap().to_rgb().unwrap();
        assert!((blue.blue() - 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_gray_has_no_saturation() {
        let gray = Hsl::from_rgb(&Rgb::new(128.0, 128.0, 128.0).unwrap()).unwrap();
        assert_eq!(gray.saturation(), 0.0);
        assert_eq!(gray.hue(), 0.0);
        assert!((gray.lightness() - 50.196).abs() < 0.01);
    }

    #[test]
    fn test_rgb_round_trip() {
        for (r, g, b) in [(12.0, 200.0, 99.0), (255.0, 0.0, 0.0), (30.0, 30.0, 31.0)] {
            let rgb = Rgb::new(r, g, b).unwrap();
            let back = Hsl::from_rgb(&rgb).unwrap().to_rgb().unwrap();
            assert!((back.red() - r).abs() < 1e-6, "r={r}");
            assert!((back.green() - g).abs() < 1e-6, "g={g}");
            assert!((back.blue() - b).abs() < 1e-6, "b={b}");
        }
    }

    #[test]
    fn test_hue_wraps() {
        let c = Hsl::new(350.0, 50.0, 50.0).unwrap();
        let nudged = c.with_hue_incremented_by(20.0 / 360.0).unwrap();
        assert!((nudged.hue() - 10.0).abs() < 1e-9);
    }
}
