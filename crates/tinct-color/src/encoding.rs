//! Encoding specifications.
//!
//! An [`EncodingSpecification`] is the composition root for device color
//! encoding: it pins down the color space, illuminant, observer, viewing
//! condition, and chromatic adaptation method needed to map between device
//! RGB and absolute tristimulus values. The derived quantities — the
//! adapted white point and the RGB↔XYZ matrix pair — are computed once at
//! construction and excluded from the specification's identity, which
//! covers only the configuration itself.
//!
//! Specifications are immutable and cheap to share; [`SpecificationCache`]
//! memoizes construction per distinct configuration.

use std::sync::Arc;

use serde::Serialize;

use tinct_cache::{identity_of, Digest, MemoryStore, Store};
use tinct_core::{Error, Result};
use tinct_math::{Cat, Mat3, Vec3};
use tinct_primaries::{
    rgb_to_xyz_for_white, Chromaticity, Illuminant, Observer, RgbColorSpace, ViewingCondition,
};

/// Chromatic adaptation with memoization.
///
/// Keyed by the transform, the stimulus, and both white points; repeated
/// adaptation of the same tristimulus value hits the store instead of
/// redoing the cone-space round trip.
pub fn adapt_cached(
    cat: Cat,
    xyz: Vec3,
    source_white: Vec3,
    target_white: Vec3,
    store: &Store<Vec3>,
) -> Result<Vec3> {
    let key = identity_of(&("adapt", cat, xyz, source_white, target_white))?;
    let value = store.fetch(key, || cat.adapt(xyz, source_white, target_white))?;
    Ok(*value)
}

/// Tolerance for treating two chromaticities as the same white point.
const WHITE_POINT_EPSILON: f64 = 1e-9;

/// The full parameter set for encoding colors in a device color space.
///
/// # Example
///
/// ```rust
/// use tinct_color::EncodingSpecification;
/// use tinct_math::{Cat, Vec3};
/// use tinct_primaries::{Illuminant, Observer, RgbColorSpace, ViewingCondition};
///
/// let spec = EncodingSpecification::new(
///     Cat::BRADFORD,
///     RgbColorSpace::SRGB,
///     Illuminant::D65,
///     Observer::CIE_1931,
///     ViewingCondition::AVERAGE,
/// ).unwrap();
///
/// // sRGB is native D65: white (1,1,1) maps onto the D65 white point.
/// let white = spec.rgb_to_xyz_matrix() * Vec3::ONE;
/// assert!((white.y - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct EncodingSpecification {
    chromatic_adaptation_transform: Cat,
    color_space: RgbColorSpace,
    illuminant: Illuminant,
    observer: Observer,
    viewing_condition: ViewingCondition,
    // Derived state, excluded from identity.
    #[serde(skip)]
    adapted_white: Vec3,
    #[serde(skip)]
    rgb_to_xyz: Mat3,
    #[serde(skip)]
    xyz_to_rgb: Mat3,
}

impl PartialEq for EncodingSpecification {
    fn eq(&self, other: &Self) -> bool {
        self.chromatic_adaptation_transform == other.chromatic_adaptation_transform
            && self.color_space == other.color_space
            && self.illuminant == other.illuminant
            && self.observer == other.observer
            && self.viewing_condition == other.viewing_condition
    }
}

impl EncodingSpecification {
    /// Creates a specification and derives its white point and matrices.
    ///
    /// When the configured illuminant differs from the color space's native
    /// white, the native white point is adapted to the target illuminant
    /// through the CAT; otherwise the illuminant's white point is used
    /// directly. The RGB-to-XYZ matrix is then solved against that adapted
    /// white.
    pub fn new(
        chromatic_adaptation_transform: Cat,
        color_space: RgbColorSpace,
        illuminant: Illuminant,
        observer: Observer,
        viewing_condition: ViewingCondition,
    ) -> Result<Self> {
        let native = color_space.native_illuminant().chromaticity();
        let target = illuminant.chromaticity();
        let needs_adaptation = (native.x - target.x).abs() > WHITE_POINT_EPSILON
            || (native.y - target.y).abs() > WHITE_POINT_EPSILON;

        let adapted_white = if needs_adaptation {
            chromatic_adaptation_transform.adapt(
                color_space.white_point(),
                color_space.white_point(),
                illuminant.white_point(),
            )?
        } else {
            illuminant.white_point()
        };

        let rgb_to_xyz = rgb_to_xyz_for_white(&color_space, adapted_white)?;
        let xyz_to_rgb = rgb_to_xyz
            .inverse()
            .ok_or_else(|| Error::singular(rgb_to_xyz.determinant()))?;

        Ok(Self {
            chromatic_adaptation_transform,
            color_space,
            illuminant,
            observer,
            viewing_condition,
            adapted_white,
            rgb_to_xyz,
            xyz_to_rgb,
        })
    }

    /// The chromatic adaptation transform.
    #[inline]
    pub const fn chromatic_adaptation_transform(&self) -> Cat {
        self.chromatic_adaptation_transform
    }

    /// The device color space.
    #[inline]
    pub const fn color_space(&self) -> &RgbColorSpace {
        &self.color_space
    }

    /// The target illuminant.
    #[inline]
    pub const fn illuminant(&self) -> Illuminant {
        self.illuminant
    }

    /// The colorimetric observer.
    #[inline]
    pub const fn observer(&self) -> Observer {
        self.observer
    }

    /// The viewing condition.
    #[inline]
    pub const fn viewing_condition(&self) -> ViewingCondition {
        self.viewing_condition
    }

    /// Whether the configured illuminant differs from the color space's
    /// native white.
    pub fn needs_adaptation(&self) -> bool {
        let native = self.color_space.native_illuminant().chromaticity();
        let target = self.illuminant.chromaticity();
        (native.x - target.x).abs() > WHITE_POINT_EPSILON
            || (native.y - target.y).abs() > WHITE_POINT_EPSILON
    }

    /// The white point all conversions under this specification target.
    #[inline]
    pub const fn adapted_white_point(&self) -> Vec3 {
        self.adapted_white
    }

    /// The derived RGB-to-XYZ matrix.
    #[inline]
    pub const fn rgb_to_xyz_matrix(&self) -> Mat3 {
        self.rgb_to_xyz
    }

    /// The derived XYZ-to-RGB matrix.
    #[inline]
    pub const fn xyz_to_rgb_matrix(&self) -> Mat3 {
        self.xyz_to_rgb
    }

    /// Lifts a chromaticity to tristimulus under this specification.
    ///
    /// Without adaptation this is the plain `Y = 1` lift; otherwise the
    /// lifted value is adapted from the space's native white to the
    /// specification's adapted white.
    pub fn chromaticity_to_xyz(&self, chromaticity: Chromaticity) -> Result<Vec3> {
        let lifted = chromaticity.to_xyz();
        if self.needs_adaptation() {
            self.chromatic_adaptation_transform.adapt(
                lifted,
                self.color_space.white_point(),
                self.adapted_white,
            )
        } else {
            Ok(lifted)
        }
    }

    /// The specification's configuration digest.
    ///
    /// Derived state (white point, matrices) is excluded, so two
    /// specifications with equal configuration always share an identity.
    pub fn identity(&self) -> Result<Digest> {
        identity_of(self)
    }
}

/// Memoizes encoding specifications per distinct configuration.
///
/// # Example
///
/// ```rust
/// use tinct_color::SpecificationCache;
/// use tinct_math::Cat;
/// use tinct_primaries::{Illuminant, Observer, RgbColorSpace, ViewingCondition};
///
/// let cache = SpecificationCache::new();
/// let a = cache.fetch(
///     Cat::BRADFORD, RgbColorSpace::SRGB, Illuminant::D65,
///     Observer::CIE_1931, ViewingCondition::AVERAGE,
/// ).unwrap();
/// let b = cache.fetch(
///     Cat::BRADFORD, RgbColorSpace::SRGB, Illuminant::D65,
///     Observer::CIE_1931, ViewingCondition::AVERAGE,
/// ).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Default)]
pub struct SpecificationCache {
    store: MemoryStore<EncodingSpecification>,
}

impl SpecificationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    /// Returns the specification for a configuration, constructing it once.
    pub fn fetch(
        &self,
        cat: Cat,
        color_space: RgbColorSpace,
        illuminant: Illuminant,
        observer: Observer,
        viewing_condition: ViewingCondition,
    ) -> Result<Arc<EncodingSpecification>> {
        let key = identity_of(&(cat, color_space, illuminant, observer, viewing_condition))?;
        self.store.fetch(key, || {
            EncodingSpecification::new(cat, color_space, illuminant, observer, viewing_condition)
        })
    }

    /// Number of distinct configurations constructed so far.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
