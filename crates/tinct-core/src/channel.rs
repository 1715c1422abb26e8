//! Channel definitions and normalization laws.
//!
//! Every color model channel (red, hue, lightness, ...) is described by an
//! immutable [`ChannelDefinition`] that pairs a [`Boundary`] with a
//! [`NormalizationLaw`]. The law determines how raw values map into the
//! canonical normalized space where all arithmetic happens, and how the six
//! channel operations (normalize, denormalize, increment, decrement, scale,
//! contract — plus exponentiate) behave.
//!
//! # Laws
//!
//! - [`Linear`](NormalizationLaw::Linear): affine map of the boundary onto
//!   [0, 1]; identity when unbound. RGB components, XYZ, chroma magnitudes.
//! - [`Circular`](NormalizationLaw::Circular): affine map with all results
//!   wrapped mod 1.0 into [0, 1). Hue angles. Requires a finite boundary.
//! - [`Bipolar`](NormalizationLaw::Bipolar): signed axes without hard
//!   bounds (Oklab a/b); when bounded, scaling is centered at the boundary
//!   midpoint so the axis zero stays at the perceptual neutral.
//! - [`Opponent`](NormalizationLaw::Opponent): Lab/Luv a*, b*, u*, v* axes.
//!   Arithmetic matches [`Bipolar`](NormalizationLaw::Bipolar); kept as its
//!   own law for clarity of intent and display formatting.

use serde::Serialize;

use crate::boundary::Boundary;
use crate::error::{Error, Result};

/// How a channel maps raw values to the canonical normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NormalizationLaw {
    /// Affine map of the boundary onto [0, 1]; identity when unbound.
    Linear,
    /// Affine map with wraparound mod 1.0 (hue angles). Boundary must be
    /// finite.
    Circular,
    /// Signed opponent-style axis; centered arithmetic when bounded.
    Bipolar,
    /// Lab/Luv opponent axis. Arithmetic matches `Bipolar`.
    Opponent,
}

impl NormalizationLaw {
    /// Maps a raw value into canonical normalized space.
    ///
    /// Linear/Bipolar/Opponent channels with an unbound boundary pass the
    /// value through unchanged. Circular channels wrap negative results
    /// into [0, 1).
    pub fn normalize(self, channel: &'static str, boundary: Boundary, raw: f64) -> Result<f64> {
        match self {
            Self::Circular => {
                let width = self.finite_width(channel, boundary)?;
                Ok(((raw - boundary.minimum()) / width).rem_euclid(1.0))
            }
            Self::Linear | Self::Bipolar | Self::Opponent => {
                if boundary.is_unbound() {
                    Ok(raw)
                } else {
                    Ok((raw - boundary.minimum()) / boundary.width())
                }
            }
        }
    }

    /// Maps a canonical normalized value back to raw units.
    pub fn denormalize(self, channel: &'static str, boundary: Boundary, canonical: f64) -> Result<f64> {
        match self {
            Self::Circular => {
                let width = self.finite_width(channel, boundary)?;
                Ok(boundary.minimum() + canonical.rem_euclid(1.0) * width)
            }
            Self::Linear | Self::Bipolar | Self::Opponent => {
                if boundary.is_unbound() {
                    Ok(canonical)
                } else {
                    Ok(boundary.minimum() + canonical * boundary.width())
                }
            }
        }
    }

    /// Adds a normalized amount to a canonical value.
    pub fn increment(self, channel: &'static str, boundary: Boundary, canonical: f64, amount: f64) -> Result<f64> {
        match self {
            Self::Circular => {
                self.finite_width(channel, boundary)?;
                Ok((canonical + amount).rem_euclid(1.0))
            }
            _ => Ok(canonical + amount),
        }
    }

    /// Subtracts a normalized amount from a canonical value.
    pub fn decrement(self, channel: &'static str, boundary: Boundary, canonical: f64, amount: f64) -> Result<f64> {
        match self {
            Self::Circular => {
                self.finite_width(channel, boundary)?;
                Ok((canonical - amount).rem_euclid(1.0))
            }
            _ => Ok(canonical - amount),
        }
    }

    /// Multiplies a canonical value by a scalar.
    ///
    /// Bounded bipolar/opponent axes scale around the normalized midpoint
    /// so the perceptual neutral stays fixed.
    pub fn scale(self, channel: &'static str, boundary: Boundary, canonical: f64, scalar: f64) -> Result<f64> {
        match self {
            Self::Circular => {
                self.finite_width(channel, boundary)?;
                Ok((canonical * scalar).rem_euclid(1.0))
            }
            Self::Bipolar | Self::Opponent if !boundary.is_unbound() => {
                Ok(0.5 + (canonical - 0.5) * scalar)
            }
            _ => Ok(canonical * scalar),
        }
    }

    /// Divides a canonical value by a scalar.
    ///
    /// A zero scalar is a domain error, never a silent NaN or infinity.
    pub fn contract(self, channel: &'static str, boundary: Boundary, canonical: f64, scalar: f64) -> Result<f64> {
        if scalar == 0.0 {
            return Err(Error::division_by_zero("channel contract"));
        }
        match self {
            Self::Circular => {
                self.finite_width(channel, boundary)?;
                Ok((canonical / scalar).rem_euclid(1.0))
            }
            Self::Bipolar | Self::Opponent if !boundary.is_unbound() => {
                Ok(0.5 + (canonical - 0.5) / scalar)
            }
            _ => Ok(canonical / scalar),
        }
    }

    /// Raises a canonical value to a power.
    ///
    /// Bipolar/opponent axes preserve the sign of the offset from the axis
    /// zero (the raised magnitude keeps the original direction).
    pub fn exponentiate(self, channel: &'static str, boundary: Boundary, canonical: f64, exponent: f64) -> Result<f64> {
        match self {
            Self::Circular => {
                self.finite_width(channel, boundary)?;
                Ok(canonical.rem_euclid(1.0).powf(exponent).rem_euclid(1.0))
            }
            Self::Bipolar | Self::Opponent => {
                let center = if boundary.is_unbound() { 0.0 } else { 0.5 };
                let offset = canonical - center;
                Ok(center + offset.abs().powf(exponent).copysign(offset))
            }
            Self::Linear => Ok(canonical.powf(exponent)),
        }
    }

    /// Negates a canonical value (wraps for circular channels).
    pub fn negate(self, channel: &'static str, boundary: Boundary, canonical: f64) -> Result<f64> {
        match self {
            Self::Circular => {
                self.finite_width(channel, boundary)?;
                Ok((-canonical).rem_euclid(1.0))
            }
            _ => Ok(-canonical),
        }
    }

    /// Returns the boundary width, or a configuration error for circular
    /// channels declared unbound (wraparound requires a defined period).
    fn finite_width(self, channel: &'static str, boundary: Boundary) -> Result<f64> {
        if boundary.is_unbound() {
            Err(Error::CircularUnbounded { channel })
        } else {
            Ok(boundary.width())
        }
    }
}

/// How a channel's raw value is rendered for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DisplayFormat {
    /// Rounded to the nearest integer (8-bit RGB components).
    Integer,
    /// Fixed decimal places.
    Decimal(usize),
    /// Percentage with fixed decimal places.
    Percent(usize),
    /// Degrees with fixed decimal places (hue channels).
    Degrees(usize),
    /// Explicitly signed decimal (opponent axes).
    Signed(usize),
}

impl DisplayFormat {
    /// Formats a raw channel value.
    pub fn format(self, raw: f64) -> String {
        match self {
            Self::Integer => format!("{}", raw.round() as i64),
            Self::Decimal(places) => format!("{raw:.places$}"),
            Self::Percent(places) => format!("{raw:.places$}%"),
            Self::Degrees(places) => format!("{raw:.places$}\u{b0}"),
            Self::Signed(places) => format!("{raw:+.places$}"),
        }
    }
}

/// Immutable descriptor for one channel of a color model.
///
/// Definitions are declared as `const` tables per model; all accessor and
/// derivative behavior is generated from them rather than hand-written.
///
/// # Example
///
/// ```rust
/// use tinct_core::{Boundary, ChannelDefinition, DisplayFormat, NormalizationLaw};
///
/// const HUE: ChannelDefinition = ChannelDefinition::new(
///     "hue",
///     "Hue",
///     NormalizationLaw::Circular,
///     Boundary::DEGREES,
///     DisplayFormat::Degrees(1),
/// );
///
/// assert_eq!(HUE.normalize(540.0).unwrap(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelDefinition {
    identifier: &'static str,
    display_name: &'static str,
    law: NormalizationLaw,
    boundary: Boundary,
    differential_step: f64,
    format: DisplayFormat,
    required: bool,
}

impl ChannelDefinition {
    /// Creates a required channel with a differential step of one raw unit.
    pub const fn new(
        identifier: &'static str,
        display_name: &'static str,
        law: NormalizationLaw,
        boundary: Boundary,
        format: DisplayFormat,
    ) -> Self {
        Self {
            identifier,
            display_name,
            law,
            boundary,
            differential_step: 1.0,
            format,
            required: true,
        }
    }

    /// Overrides the differential step (the channel's natural nudge amount,
    /// in raw units).
    pub const fn with_step(mut self, differential_step: f64) -> Self {
        self.differential_step = differential_step;
        self
    }

    /// Marks the channel as optional for component-set validity.
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Channel identifier (stable, lowercase).
    #[inline]
    pub const fn identifier(&self) -> &'static str {
        self.identifier
    }

    /// Human-facing channel name.
    #[inline]
    pub const fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// The channel's normalization law.
    #[inline]
    pub const fn law(&self) -> NormalizationLaw {
        self.law
    }

    /// The channel's raw-value boundary.
    #[inline]
    pub const fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// The channel's differential step in raw units.
    #[inline]
    pub const fn differential_step(&self) -> f64 {
        self.differential_step
    }

    /// The channel's display format.
    #[inline]
    pub const fn format(&self) -> DisplayFormat {
        self.format
    }

    /// Whether the channel must be present in a valid component set.
    #[inline]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Maps a raw value into normalized space via the channel's law.
    #[inline]
    pub fn normalize(&self, raw: f64) -> Result<f64> {
        self.law.normalize(self.identifier, self.boundary, raw)
    }

    /// Maps a normalized value back to raw units via the channel's law.
    #[inline]
    pub fn denormalize(&self, canonical: f64) -> Result<f64> {
        self.law.denormalize(self.identifier, self.boundary, canonical)
    }

    /// The differential step expressed as a normalized delta.
    ///
    /// One raw `differential_step` divided by the boundary width; for
    /// unbound channels the raw step is already a normalized quantity.
    #[inline]
    pub fn normalized_step(&self) -> f64 {
        if self.boundary.is_unbound() {
            self.differential_step
        } else {
            self.differential_step / self.boundary.width()
        }
    }

    /// Checks the definition for configuration errors.
    ///
    /// Currently the only invalid configuration is a circular channel with
    /// an unbound boundary.
    pub fn validate(&self) -> Result<()> {
        if self.law == NormalizationLaw::Circular && self.boundary.is_unbound() {
            return Err(Error::CircularUnbounded {
                channel: self.identifier,
            });
        }
        Ok(())
    }

    /// Formats a raw value with the channel's display format.
    #[inline]
    pub fn display(&self, raw: f64) -> String {
        self.format.format(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HUE: ChannelDefinition = ChannelDefinition::new(
        "hue",
        "Hue",
        NormalizationLaw::Circular,
        Boundary::DEGREES,
        DisplayFormat::Degrees(1),
    );

    const RED: ChannelDefinition = ChannelDefinition::new(
        "red",
        "Red",
        NormalizationLaw::Linear,
        Boundary::EIGHT_BIT,
        DisplayFormat::Integer,
    );

    const A_STAR: ChannelDefinition = ChannelDefinition::new(
        "a",
        "a*",
        NormalizationLaw::Opponent,
        Boundary::unbound(),
        DisplayFormat::Signed(2),
    );

    #[test]
    fn test_linear_round_trip() {
        for i in 0..=255 {
            let raw = i as f64;
            let n = RED.normalize(raw).unwrap();
            let back = RED.denormalize(n).unwrap();
            assert!((raw - back).abs() < 1e-9, "raw={raw}, back={back}");
        }
    }

    #[test]
    fn test_unbound_is_identity() {
        for raw in [-1000.0, -1.5, 0.0, 1.5, 1000.0] {
            assert_eq!(A_STAR.normalize(raw).unwrap(), raw);
            assert_eq!(A_STAR.denormalize(raw).unwrap(), raw);
        }
    }

    #[test]
    fn test_circular_wraparound() {
        // increment(350, 20) == 10 in raw degrees
        let n = HUE.normalize(350.0).unwrap();
        let step = 20.0 / 360.0;
        let incremented = NormalizationLaw::Circular
            .increment("hue", Boundary::DEGREES, n, step)
            .unwrap();
        let raw = HUE.denormalize(incremented).unwrap();
        assert!((raw - 10.0).abs() < 1e-9, "raw={raw}");
    }

    #[test]
    fn test_circular_negative_wraps() {
        let a = HUE.normalize(-10.0).unwrap();
        let b = HUE.normalize(350.0).unwrap();
        assert!((a - b).abs() < 1e-9);
        assert!((0.0..1.0).contains(&a));
    }

    #[test]
    fn test_circular_unbound_is_configuration_error() {
        let bad = ChannelDefinition::new(
            "hue",
            "Hue",
            NormalizationLaw::Circular,
            Boundary::unbound(),
            DisplayFormat::Degrees(1),
        );
        assert!(matches!(bad.validate(), Err(Error::CircularUnbounded { .. })));
        assert!(bad.normalize(10.0).is_err());
    }

    #[test]
    fn test_contract_by_zero_raises() {
        let err = NormalizationLaw::Linear
            .contract("red", Boundary::EIGHT_BIT, 0.5, 0.0)
            .unwrap_err();
        assert!(matches!(err, Error::DivisionByZero { .. }));
    }

    #[test]
    fn test_bipolar_bounded_scale_is_centered() {
        let boundary = Boundary::bounded(-128.0, 128.0);
        // Raw 64 normalizes to 0.75; doubling the offset from center lands
        // at 1.0 (raw 128), not 1.5.
        let n = NormalizationLaw::Bipolar.normalize("a", boundary, 64.0).unwrap();
        let scaled = NormalizationLaw::Bipolar.scale("a", boundary, n, 2.0).unwrap();
        let raw = NormalizationLaw::Bipolar.denormalize("a", boundary, scaled).unwrap();
        assert!((raw - 128.0).abs() < 1e-9, "raw={raw}");
    }

    #[test]
    fn test_bipolar_unbound_scale() {
        let boundary = Boundary::unbound();
        let scaled = NormalizationLaw::Bipolar.scale("a", boundary, -3.0, 2.0).unwrap();
        assert_eq!(scaled, -6.0);
        let contracted = NormalizationLaw::Bipolar.contract("a", boundary, -6.0, 2.0).unwrap();
        assert_eq!(contracted, -3.0);
    }

    #[test]
    fn test_exponentiate_preserves_sign() {
        let boundary = Boundary::unbound();
        let raised = NormalizationLaw::Opponent
            .exponentiate("a", boundary, -4.0, 0.5)
            .unwrap();
        assert!((raised + 2.0).abs() < 1e-9, "raised={raised}");
    }

    #[test]
    fn test_normalized_step() {
        assert!((RED.normalized_step() - 1.0 / 255.0).abs() < 1e-12);
        assert_eq!(A_STAR.normalized_step(), 1.0);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(DisplayFormat::Integer.format(127.6), "128");
        assert_eq!(DisplayFormat::Percent(1).format(42.25), "42.2%");
        assert_eq!(DisplayFormat::Signed(1).format(-3.25), "-3.2");
        assert_eq!(DisplayFormat::Signed(1).format(3.25), "+3.2");
    }
}
