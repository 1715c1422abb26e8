//! Named-constant registry.
//!
//! Resolves symbolic configuration names ("bradford", "srgb", "d65", ...)
//! to the corresponding immutable domain objects. The registry is built
//! eagerly at construction — the built-in catalog is cheap — and can be
//! extended from loaded presets. Unknown names are configuration errors.

use std::collections::HashMap;

use tinct_core::{Error, Result};
use tinct_math::Cat;
use tinct_primaries::{Chromaticity, Illuminant, Observer, RgbColorSpace};

use crate::loader::{parse_transfer, IlluminantPreset, RgbSpacePreset};

/// Lookup of named CATs, illuminants, observers, and color spaces.
#[derive(Debug)]
pub struct Registry {
    cats: HashMap<String, Cat>,
    illuminants: HashMap<String, Illuminant>,
    observers: HashMap<String, Observer>,
    spaces: HashMap<String, RgbColorSpace>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Registry {
    /// Builds the registry with the built-in catalog.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            cats: HashMap::new(),
            illuminants: HashMap::new(),
            observers: HashMap::new(),
            spaces: HashMap::new(),
        };

        for cat in [
            Cat::BRADFORD,
            Cat::VON_KRIES,
            Cat::CAT02,
            Cat::CAT16,
            Cat::SHARP,
            Cat::CMCCAT2000,
            Cat::XYZ_SCALING,
        ] {
            registry.cats.insert(cat.name().to_string(), cat);
        }

        for illuminant in [
            Illuminant::A,
            Illuminant::C,
            Illuminant::D50,
            Illuminant::D55,
            Illuminant::D65,
            Illuminant::D75,
            Illuminant::E,
            Illuminant::F2,
            Illuminant::F7,
            Illuminant::F11,
        ] {
            registry
                .illuminants
                .insert(illuminant.name().to_lowercase(), illuminant);
        }

        registry
            .observers
            .insert("cie_1931".to_string(), Observer::CIE_1931);
        registry
            .observers
            .insert("cie_1964".to_string(), Observer::CIE_1964);

        for (name, space) in [
            ("srgb", RgbColorSpace::SRGB),
            ("display_p3", RgbColorSpace::DISPLAY_P3),
            ("adobe_rgb", RgbColorSpace::ADOBE_RGB),
            ("rec2020", RgbColorSpace::REC2020),
            ("prophoto_rgb", RgbColorSpace::PROPHOTO_RGB),
        ] {
            registry.spaces.insert(name.to_string(), space);
        }

        registry
    }

    /// Resolves a chromatic adaptation transform by name.
    pub fn cat(&self, name: &str) -> Result<Cat> {
        self.cats
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| Self::miss("chromatic adaptation transform", name))
    }

    /// Resolves an illuminant by name.
    pub fn illuminant(&self, name: &str) -> Result<Illuminant> {
        self.illuminants
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| Self::miss("illuminant", name))
    }

    /// Resolves an observer by name.
    pub fn observer(&self, name: &str) -> Result<Observer> {
        self.observers
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| Self::miss("observer", name))
    }

    /// Resolves an RGB color space by name.
    pub fn color_space(&self, name: &str) -> Result<RgbColorSpace> {
        self.spaces
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| Self::miss("color space", name))
    }

    /// Registers an illuminant loaded from a preset file.
    ///
    /// The preset name is interned for the registry's lifetime.
    pub fn add_illuminant(&mut self, preset: &IlluminantPreset) {
        let name: &'static str = Box::leak(preset.name.clone().into_boxed_str());
        let illuminant = Illuminant::new(name, Chromaticity::new(preset.x, preset.y));
        tracing::debug!(name, "registered illuminant preset");
        self.illuminants
            .insert(preset.name.to_lowercase(), illuminant);
    }

    /// Registers a color space loaded from a preset file.
    ///
    /// The native white must already resolve through this registry.
    pub fn add_color_space(&mut self, preset: &RgbSpacePreset) -> Result<()> {
        let white = self.illuminant(&preset.white)?;
        let transfer = parse_transfer(&preset.transfer)?;
        let name: &'static str = Box::leak(preset.name.clone().into_boxed_str());
        let space = RgbColorSpace::new(
            name,
            Chromaticity::new(preset.red[0], preset.red[1]),
            Chromaticity::new(preset.green[0], preset.green[1]),
            Chromaticity::new(preset.blue[0], preset.blue[1]),
            white,
            transfer,
        );
        tracing::debug!(name, "registered color space preset");
        self.spaces.insert(preset.name.to_lowercase(), space);
        Ok(())
    }

    fn miss(kind: &'static str, name: &str) -> Error {
        tracing::warn!(kind, name, "registry lookup failed");
        Error::unknown(kind, name)
    }
}
