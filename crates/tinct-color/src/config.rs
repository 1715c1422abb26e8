//! Engine configuration.
//!
//! [`Config`] gathers the process defaults — adaptation method, illuminant,
//! observer, viewing condition, CCT formula, cache backing — as a plain
//! struct that callers pass explicitly. The engine never reaches into
//! ambient global state; the one process-wide convenience is
//! [`default_specification`], a lazily initialized sRGB/D65 specification
//! for the common case.

use std::sync::LazyLock;

use serde::Serialize;

use tinct_cache::Store;
use tinct_core::Result;
use tinct_math::Cat;
use tinct_primaries::{Illuminant, Observer, RgbColorSpace, ViewingCondition};

use crate::encoding::EncodingSpecification;
use crate::formulas::CctFormula;

/// Which cache store backs memoized computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBacking {
    /// Unbounded in-memory map.
    Memory,
    /// LRU bounded by approximate serialized bytes.
    Lru {
        /// Byte budget for the store.
        max_bytes: usize,
    },
    /// Caching disabled; every fetch recomputes.
    Disabled,
}

impl CacheBacking {
    /// Builds a store with this backing.
    pub fn store<V: Serialize>(&self) -> Store<V> {
        match self {
            Self::Memory => Store::memory(),
            Self::Lru { max_bytes } => Store::lru(*max_bytes),
            Self::Disabled => Store::null(),
        }
    }
}

/// Engine defaults, passed explicitly to the components that need them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chromatic adaptation method.
    pub cat: Cat,
    /// Default device color space.
    pub color_space: RgbColorSpace,
    /// Reference illuminant.
    pub illuminant: Illuminant,
    /// Colorimetric observer.
    pub observer: Observer,
    /// Viewing environment.
    pub viewing_condition: ViewingCondition,
    /// Correlated color temperature formula.
    pub cct_formula: CctFormula,
    /// Cache store backing for memoized computations.
    pub cache: CacheBacking,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cat: Cat::BRADFORD,
            color_space: RgbColorSpace::SRGB,
            illuminant: Illuminant::D65,
            observer: Observer::CIE_1931,
            viewing_condition: ViewingCondition::AVERAGE,
            cct_formula: CctFormula::McCamy,
            cache: CacheBacking::Memory,
        }
    }
}

impl Config {
    /// Builds the encoding specification for the configured color space.
    pub fn specification(&self) -> Result<EncodingSpecification> {
        self.specification_for(self.color_space)
    }

    /// Builds an encoding specification for another color space under this
    /// configuration's illuminant, observer, CAT, and viewing condition.
    pub fn specification_for(&self, color_space: RgbColorSpace) -> Result<EncodingSpecification> {
        EncodingSpecification::new(
            self.cat,
            color_space,
            self.illuminant,
            self.observer,
            self.viewing_condition,
        )
    }

    /// Builds a memoization store with the configured backing.
    pub fn store<V: Serialize>(&self) -> Store<V> {
        self.cache.store()
    }
}

/// The process-wide default specification: sRGB under D65, CIE 1931 2°,
/// Bradford adaptation, average surround.
pub fn default_specification() -> &'static EncodingSpecification {
    static DEFAULT: LazyLock<EncodingSpecification> = LazyLock::new(|| {
        EncodingSpecification::new(
            Cat::BRADFORD,
            RgbColorSpace::SRGB,
            Illuminant::D65,
            Observer::CIE_1931,
            ViewingCondition::AVERAGE,
        )
        .expect("built-in sRGB/D65 configuration is valid")
    });
    &DEFAULT
}
