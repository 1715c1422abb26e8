//! Immutable channel values.
//!
//! A [`Value`] carries both the normalized (canonical) and unnormalized
//! (human-facing) representation of one channel, tied to the
//! [`ChannelDefinition`] that produced it. Exactly one representation is
//! authoritative at construction; the other is derived through the
//! channel's law, so `definition.denormalize(normalized) ≈ unnormalized`
//! always holds.
//!
//! All arithmetic verbs delegate to the channel's [`NormalizationLaw`] and
//! return a new value whose normalized side is authoritative.
//!
//! [`NormalizationLaw`]: crate::channel::NormalizationLaw

use serde::Serialize;

use crate::channel::ChannelDefinition;
use crate::error::Result;

/// Immutable (normalized, unnormalized) pair for one channel.
///
/// # Example
///
/// ```rust
/// use tinct_core::{Boundary, ChannelDefinition, DisplayFormat, NormalizationLaw, Value};
///
/// const RED: ChannelDefinition = ChannelDefinition::new(
///     "red",
///     "Red",
///     NormalizationLaw::Linear,
///     Boundary::EIGHT_BIT,
///     DisplayFormat::Integer,
/// );
///
/// let v = Value::from_raw(RED, 51.0).unwrap();
/// assert!((v.normalized() - 0.2).abs() < 1e-12);
///
/// let nudged = v.incremented(RED.normalized_step()).unwrap();
/// assert!((nudged.raw() - 52.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Value {
    definition: ChannelDefinition,
    normalized: f64,
    unnormalized: f64,
}

impl Value {
    /// Creates a value from a raw (unnormalized) number.
    ///
    /// The raw side is authoritative; the normalized side is derived.
    pub fn from_raw(definition: ChannelDefinition, raw: f64) -> Result<Self> {
        let normalized = definition.normalize(raw)?;
        Ok(Self {
            definition,
            normalized,
            unnormalized: raw,
        })
    }

    /// Creates a value from a canonical normalized number.
    ///
    /// The normalized side is authoritative; the raw side is derived.
    pub fn from_normalized(definition: ChannelDefinition, canonical: f64) -> Result<Self> {
        let unnormalized = definition.denormalize(canonical)?;
        Ok(Self {
            definition,
            normalized: canonical,
            unnormalized,
        })
    }

    /// The channel definition this value belongs to.
    #[inline]
    pub const fn definition(&self) -> &ChannelDefinition {
        &self.definition
    }

    /// Canonical normalized representation.
    #[inline]
    pub const fn normalized(&self) -> f64 {
        self.normalized
    }

    /// Raw human-facing representation.
    #[inline]
    pub const fn raw(&self) -> f64 {
        self.unnormalized
    }

    /// Returns `true` when the raw value satisfies the channel boundary.
    ///
    /// Unbounded channels always satisfy.
    #[inline]
    pub fn in_boundary(&self) -> bool {
        self.definition.boundary().is_unbound()
            || self.definition.boundary().contains(self.unnormalized)
    }

    /// Returns a new value incremented by a normalized amount.
    pub fn incremented(&self, amount: f64) -> Result<Self> {
        let def = self.definition;
        let n = def
            .law()
            .increment(def.identifier(), def.boundary(), self.normalized, amount)?;
        Self::from_normalized(def, n)
    }

    /// Returns a new value decremented by a normalized amount.
    pub fn decremented(&self, amount: f64) -> Result<Self> {
        let def = self.definition;
        let n = def
            .law()
            .decrement(def.identifier(), def.boundary(), self.normalized, amount)?;
        Self::from_normalized(def, n)
    }

    /// Returns a new value scaled by a factor.
    pub fn scaled(&self, scalar: f64) -> Result<Self> {
        let def = self.definition;
        let n = def
            .law()
            .scale(def.identifier(), def.boundary(), self.normalized, scalar)?;
        Self::from_normalized(def, n)
    }

    /// Returns a new value contracted (divided) by a factor.
    ///
    /// A zero factor is a domain error.
    pub fn contracted(&self, scalar: f64) -> Result<Self> {
        let def = self.definition;
        let n = def
            .law()
            .contract(def.identifier(), def.boundary(), self.normalized, scalar)?;
        Self::from_normalized(def, n)
    }

    /// Returns a new value raised to a power.
    pub fn exponentiated(&self, exponent: f64) -> Result<Self> {
        let def = self.definition;
        let n = def
            .law()
            .exponentiate(def.identifier(), def.boundary(), self.normalized, exponent)?;
        Self::from_normalized(def, n)
    }

    /// Returns the negated value (wrapping for circular channels).
    pub fn negated(&self) -> Result<Self> {
        let def = self.definition;
        let n = def
            .law()
            .negate(def.identifier(), def.boundary(), self.normalized)?;
        Self::from_normalized(def, n)
    }

    /// Formats the raw value with the channel's display format.
    #[inline]
    pub fn display(&self) -> String {
        self.definition.display(self.unnormalized)
    }
}
