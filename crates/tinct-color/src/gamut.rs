//! Gamut containment and gamut mapping.
//!
//! A color is in gamut for an encoding specification when its encoded RGB
//! components all land in [0, 1]. Three deterministic mapping strategies
//! bring out-of-gamut colors inside:
//!
//! - [`Clip`](GamutMapping::Clip): clamp each linear RGB component.
//!   Cheap, can shift hue.
//! - [`Scale`](GamutMapping::Scale): divide all linear components by the
//!   largest magnitude. Preserves ratios, darkens.
//! - [`Compress`](GamutMapping::Compress): binary-search a uniform chroma
//!   scale in Lab, preserving lightness and hue; falls back to one clip
//!   pass when even the compressed candidate stays outside.
//!
//! Every strategy is reproducible bit-for-bit for the same inputs, and
//! mapping an already in-gamut color is a no-op, so mapping is idempotent.

use std::str::FromStr;

use serde::Serialize;

use tinct_cache::{identity_of, Store};
use tinct_core::{Error, Result};
use tinct_math::Vec3;

use crate::convert::{FromXyz, IntoXyz};
use crate::encoding::EncodingSpecification;
use crate::model::ColorModel;
use crate::models::{Lab, Xyz};

/// Tolerance applied to the [0, 1] containment test, absorbing conversion
/// round-off.
const GAMUT_EPSILON: f64 = 1e-6;

/// Binary search depth for the compress strategy.
const COMPRESS_ITERATIONS: usize = 8;

/// Gamut mapping strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GamutMapping {
    /// Clamp linear RGB components to [0, 1].
    Clip,
    /// Uniformly scale linear RGB down by the largest component.
    Scale,
    /// Compress Lab chroma until the color fits, holding lightness and hue.
    Compress,
}

impl GamutMapping {
    /// The strategy's configuration name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Clip => "clip",
            Self::Scale => "scale",
            Self::Compress => "compress",
        }
    }
}

impl FromStr for GamutMapping {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "clip" => Ok(Self::Clip),
            "scale" => Ok(Self::Scale),
            "compress" => Ok(Self::Compress),
            other => Err(Error::unknown("gamut mapping strategy", other)),
        }
    }
}

impl EncodingSpecification {
    /// Whether a color is representable in this specification's color
    /// space without clipping.
    pub fn in_gamut<C: IntoXyz>(&self, color: &C) -> Result<bool> {
        let xyz = color.to_xyz(self)?;
        Ok(self.xyz_in_gamut(xyz.vec()))
    }

    /// Containment test on a raw tristimulus value.
    fn xyz_in_gamut(&self, xyz: Vec3) -> bool {
        let transfer = self.color_space().transfer();
        let linear = self.xyz_to_rgb_matrix() * xyz;
        let encoded = [
            transfer.encode(linear.x),
            transfer.encode(linear.y),
            transfer.encode(linear.z),
        ];
        encoded
            .iter()
            .all(|c| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(c))
    }

    /// Maps a color into gamut with the chosen strategy.
    ///
    /// An in-gamut input is returned unchanged, which makes mapping
    /// idempotent for every strategy.
    pub fn map_to_gamut<C>(&self, color: &C, strategy: GamutMapping) -> Result<C>
    where
        C: IntoXyz + FromXyz + ColorModel,
    {
        if self.in_gamut(color)? {
            return Ok(color.clone());
        }
        match strategy {
            GamutMapping::Clip => self.clip_to_gamut(color),
            GamutMapping::Scale => self.scale_to_gamut(color),
            GamutMapping::Compress => self.compress_to_gamut(color),
        }
    }

    /// Maps with memoization, keyed by the specification configuration,
    /// the color's identity, and the strategy.
    pub fn map_to_gamut_cached<C>(
        &self,
        color: &C,
        strategy: GamutMapping,
        store: &Store<Vec<f64>>,
    ) -> Result<C>
    where
        C: IntoXyz + FromXyz + ColorModel + Serialize,
    {
        let key = identity_of(&("map_to_gamut", self, color, strategy))?;
        let raw = store.fetch(key, || {
            self.map_to_gamut(color, strategy).map(|c| c.to_raw())
        })?;
        C::from_intermediate(raw.as_slice(), color.opacity(), color.encoding().cloned())
    }

    fn rebuild<C>(&self, linear: Vec3, original: &C) -> Result<C>
    where
        C: FromXyz + ColorModel,
    {
        let xyz = self.rgb_to_xyz_matrix() * linear;
        C::from_xyz(
            &Xyz::from_vec(xyz, original.opacity(), original.encoding().cloned())?,
            self,
        )
    }

    fn clip_to_gamut<C>(&self, color: &C) -> Result<C>
    where
        C: IntoXyz + FromXyz + ColorModel,
    {
        let xyz = color.to_xyz(self)?;
        let linear = (self.xyz_to_rgb_matrix() * xyz.vec()).clamp01();
        self.rebuild(linear, color)
    }

    fn scale_to_gamut<C>(&self, color: &C) -> Result<C>
    where
        C: IntoXyz + FromXyz + ColorModel,
    {
        let xyz = color.to_xyz(self)?;
        let mut linear = self.xyz_to_rgb_matrix() * xyz.vec();
        let peak = linear.abs().max_element();
        if peak > 1.0 {
            linear = linear / peak;
        }
        self.rebuild(linear.clamp01(), color)
    }

    fn compress_to_gamut<C>(&self, color: &C) -> Result<C>
    where
        C: IntoXyz + FromXyz + ColorModel,
    {
        let lab = Lab::from_xyz(&color.to_xyz(self)?, self)?;
        let (l, a, b) = (lab.lightness(), lab.a(), lab.b());

        let mut low = 0.0_f64;
        let mut high = 1.0_f64;
        for _ in 0..COMPRESS_ITERATIONS {
            let mid = (low + high) / 2.0;
            let candidate = Lab::intermediate(l, a * mid, b * mid)?;
            if self.in_gamut(&candidate)? {
                low = mid;
            } else {
                high = mid;
            }
        }

        let compressed = Lab::intermediate(l, a * low, b * low)?;
        let xyz = compressed.to_xyz(self)?;
        let result = C::from_xyz(
            &Xyz::from_vec(xyz.vec(), color.opacity(), color.encoding().cloned())?,
            self,
        )?;
        if self.xyz_in_gamut(xyz.vec()) {
            Ok(result)
        } else {
            // Terminal fallback: one clip pass. Clip never dispatches
            // further, so the recursion ends here.
            self.map_to_gamut(&result, GamutMapping::Clip)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Rgb;
    use tinct_core::ChannelOp;

    fn spec() -> EncodingSpecification {
        Config::default().specification().unwrap()
    }

    fn out_of_gamut_lab() -> Lab {
        // A very saturated green that sRGB cannot reach.
        Lab::new(60.0, -90.0, 80.0).unwrap()
    }

    #[test]
    fn test_in_gamut_for_plain_rgb() {
        let spec = spec();
        let c = Rgb::new(10.0, 200.0, 250.0).unwrap();
        assert!(spec.in_gamut(&c).unwrap());
    }

    #[test]
    fn test_saturated_lab_is_out_of_gamut() {
        let spec = spec();
        assert!(!spec.in_gamut(&out_of_gamut_lab()).unwrap());
    }

    #[test]
    fn test_unknown_strategy_is_configuration_error() {
        let err = "squash".parse::<GamutMapping>().unwrap_err();
        assert!(matches!(err, Error::UnknownName { .. }));
        assert_eq!("compress".parse::<GamutMapping>().unwrap(), GamutMapping::Compress);
    }

    #[test]
    fn test_mapping_brings_color_into_gamut() {
        let spec = spec();
        let color = out_of_gamut_lab();
        for strategy in [GamutMapping::Clip, GamutMapping::Scale, GamutMapping::Compress] {
            let mapped = spec.map_to_gamut(&color, strategy).unwrap();
            assert!(
                spec.in_gamut(&mapped).unwrap(),
                "{} left the color out of gamut",
                strategy.name()
            );
        }
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let spec = spec();
        let color = out_of_gamut_lab();
        for strategy in [GamutMapping::Clip, GamutMapping::Scale, GamutMapping::Compress] {
            let once = spec.map_to_gamut(&color, strategy).unwrap();
            let twice = spec.map_to_gamut(&once, strategy).unwrap();
            assert_eq!(once, twice, "{} is not idempotent", strategy.name());
        }
    }

    #[test]
    fn test_in_gamut_color_is_untouched() {
        let spec = spec();
        let c = Rgb::new(12.0, 34.0, 56.0).unwrap();
        let mapped = spec.map_to_gamut(&c, GamutMapping::Compress).unwrap();
        assert_eq!(c, mapped);
    }

    #[test]
    fn test_compress_preserves_lightness() {
        let spec = spec();
        let color = out_of_gamut_lab();
        let mapped: Lab = spec.map_to_gamut(&color, GamutMapping::Compress).unwrap();
        assert!(
            (mapped.lightness() - color.lightness()).abs() < 0.5,
            "L drifted: {} -> {}",
            color.lightness(),
            mapped.lightness()
        );
        assert!(mapped.chroma() <= color.chroma());
    }

    #[test]
    fn test_mapped_result_is_cached() {
        let spec = spec();
        let store: Store<Vec<f64>> = Store::memory();
        let color = out_of_gamut_lab();

        let a = spec
            .map_to_gamut_cached(&color, GamutMapping::Compress, &store)
            .unwrap();
        let b = spec
            .map_to_gamut_cached(&color, GamutMapping::Compress, &store)
            .unwrap();
        assert_eq!(a, b);

        // Different strategies key separately.
        let c = spec
            .map_to_gamut_cached(&color, GamutMapping::Clip, &store)
            .unwrap();
        assert!(spec.in_gamut(&c).unwrap());
    }

    #[test]
    fn test_derivative_can_leave_gamut_then_map_back() {
        let spec = spec();
        let c = Rgb::new(250.0, 10.0, 10.0).unwrap();
        // Scaling red 10% past the boundary leaves the cube.
        let pushed = c.apply_channel(0, ChannelOp::Scale, Some(1.1)).unwrap();
        assert!(!spec.in_gamut(&pushed).unwrap());
        let back = spec.map_to_gamut(&pushed, GamutMapping::Clip).unwrap();
        assert!(spec.in_gamut(&back).unwrap());
    }
}
