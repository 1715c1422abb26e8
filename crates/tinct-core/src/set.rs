//! Channel sets and component sets.
//!
//! A [`ChannelSet`] is the ordered list of channel definitions belonging to
//! one color model; a [`ComponentSet`] is the corresponding list of values
//! for one color instance. Component sets come in two construction flavors:
//! checked (the public path — arity and boundary containment validated,
//! raising `InvalidColorValue`/`InvalidArity` on failure) and intermediate
//! (for converter-produced values known valid by construction, skipping the
//! redundant boundary checks on hot paths).

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::channel::ChannelDefinition;
use crate::error::{Error, Result};
use crate::value::Value;

/// Operations a channel exposes as derivative families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelOp {
    /// Add a normalized amount.
    Increment,
    /// Subtract a normalized amount.
    Decrement,
    /// Multiply by a factor.
    Scale,
    /// Divide by a factor.
    Contract,
}

/// Ordered channel definitions for one color model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelSet {
    model: &'static str,
    channels: &'static [ChannelDefinition],
}

impl ChannelSet {
    /// Creates a channel set for a model.
    pub const fn new(model: &'static str, channels: &'static [ChannelDefinition]) -> Self {
        Self { model, channels }
    }

    /// Model name this set belongs to.
    #[inline]
    pub const fn model(&self) -> &'static str {
        self.model
    }

    /// The channel definitions, in declaration order.
    #[inline]
    pub const fn channels(&self) -> &'static [ChannelDefinition] {
        self.channels
    }

    /// Total channel count.
    #[inline]
    pub const fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns `true` when the set declares no channels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of channels that must be present in a valid component set.
    pub fn required_count(&self) -> usize {
        self.channels.iter().filter(|c| c.required()).count()
    }

    /// Looks up a channel definition by identifier.
    pub fn by_identifier(&self, identifier: &str) -> Option<&'static ChannelDefinition> {
        self.channels.iter().find(|c| c.identifier() == identifier)
    }

    /// Checks every definition for configuration errors (e.g. a circular
    /// channel declared unbound).
    pub fn validate_definitions(&self) -> Result<()> {
        for channel in self.channels {
            channel.validate()?;
        }
        Ok(())
    }

    /// Validates a slice of raw values against this set.
    ///
    /// A slice is valid when its length lies between the required channel
    /// count and the total channel count, and every provided value satisfies
    /// its channel's boundary (unbounded channels always satisfy).
    pub fn validate_raw(&self, raw: &[f64]) -> Result<()> {
        let minimum = self.required_count();
        let maximum = self.len();
        if raw.len() < minimum || raw.len() > maximum {
            return Err(Error::InvalidArity {
                model: self.model,
                minimum,
                maximum,
                got: raw.len(),
            });
        }
        for (channel, &value) in self.channels.iter().zip(raw) {
            let boundary = channel.boundary();
            if !boundary.is_unbound() && !boundary.contains(value) {
                return Err(Error::invalid_color_value(
                    channel.identifier(),
                    value,
                    boundary.minimum(),
                    boundary.maximum(),
                ));
            }
        }
        Ok(())
    }
}

/// Ordered values for one color instance, one per channel.
///
/// Immutable: every operation returns a new set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentSet<const N: usize> {
    values: [Value; N],
}

impl<const N: usize> Serialize for ComponentSet<N> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ComponentSet", 1)?;
        state.serialize_field("values", &self.values[..])?;
        state.end()
    }
}

impl<const N: usize> ComponentSet<N> {
    /// Builds a component set with validation.
    ///
    /// `raw` may omit trailing optional channels; omitted channels default
    /// to the boundary minimum (or zero when unbound). Raises
    /// [`Error::InvalidArity`] or [`Error::InvalidColorValue`] on failure.
    pub fn checked(set: &ChannelSet, raw: &[f64]) -> Result<Self> {
        set.validate_raw(raw)?;
        Self::build(set, raw)
    }

    /// Builds a component set without boundary validation.
    ///
    /// For internally generated values known valid by construction; the
    /// public constructors go through [`ComponentSet::checked`].
    pub fn intermediate(set: &ChannelSet, raw: &[f64]) -> Result<Self> {
        Self::build(set, raw)
    }

    fn build(set: &ChannelSet, raw: &[f64]) -> Result<Self> {
        debug_assert_eq!(set.len(), N);
        let mut values = [None; N];
        for (i, channel) in set.channels().iter().enumerate() {
            let value = raw.get(i).copied().unwrap_or_else(|| {
                let boundary = channel.boundary();
                if boundary.is_unbound() { 0.0 } else { boundary.minimum() }
            });
            values[i] = Some(Value::from_raw(*channel, value)?);
        }
        // Every slot was just filled.
        let values = values.map(|v| match v {
            Some(v) => v,
            None => unreachable!(),
        });
        Ok(Self { values })
    }

    /// The values in channel order.
    #[inline]
    pub const fn values(&self) -> &[Value; N] {
        &self.values
    }

    /// The value for channel `index`.
    #[inline]
    pub fn value(&self, index: usize) -> Value {
        self.values[index]
    }

    /// The raw value for channel `index`.
    #[inline]
    pub fn raw(&self, index: usize) -> f64 {
        self.values[index].raw()
    }

    /// All raw values as an array.
    pub fn to_raw(&self) -> [f64; N] {
        self.values.map(|v| v.raw())
    }

    /// Returns a new set with channel `index` replaced by a raw value
    /// (boundary-checked).
    pub fn with(&self, index: usize, raw: f64) -> Result<Self> {
        let definition = *self.values[index].definition();
        let boundary = definition.boundary();
        if !boundary.is_unbound() && !boundary.contains(raw) {
            return Err(Error::invalid_color_value(
                definition.identifier(),
                raw,
                boundary.minimum(),
                boundary.maximum(),
            ));
        }
        let mut values = self.values;
        values[index] = Value::from_raw(definition, raw)?;
        Ok(Self { values })
    }

    /// Returns a new set with a derivative operation applied to channel
    /// `index`.
    ///
    /// `amount` is a normalized delta (increment/decrement) or a factor
    /// (scale/contract); `None` uses one normalized differential step.
    pub fn apply(&self, index: usize, op: ChannelOp, amount: Option<f64>) -> Result<Self> {
        let value = self.values[index];
        let amount = amount.unwrap_or_else(|| value.definition().normalized_step());
        let updated = match op {
            ChannelOp::Increment => value.incremented(amount)?,
            ChannelOp::Decrement => value.decremented(amount)?,
            ChannelOp::Scale => value.scaled(amount)?,
            ChannelOp::Contract => value.contracted(amount)?,
        };
        let mut values = self.values;
        values[index] = updated;
        Ok(Self { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use crate::channel::{DisplayFormat, NormalizationLaw};

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

    const SET: ChannelSet = ChannelSet::new("rgb", &CHANNELS);

    #[test]
    fn test_checked_construction() {
        let c = ComponentSet::<3>::checked(&SET, &[255.0, 128.0, 0.0]).unwrap();
        assert_eq!(c.to_raw(), [255.0, 128.0, 0.0]);
    }

    #[test]
    fn test_out_of_boundary_raises() {
        let err = ComponentSet::<3>::checked(&SET, &[300.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidColorValue { .. }));
    }

    #[test]
    fn test_wrong_arity_raises() {
        let err = ComponentSet::<3>::checked(&SET, &[1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidArity { .. }));
        let err = ComponentSet::<3>::checked(&SET, &[1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidArity { .. }));
    }

    #[test]
    fn test_intermediate_skips_boundary_checks() {
        // Converter outputs can sit marginally outside the boundary before
        // gamut mapping; the intermediate path accepts them.
        let c = ComponentSet::<3>::intermediate(&SET, &[260.0, -2.0, 0.0]).unwrap();
        assert_eq!(c.raw(0), 260.0);
    }

    #[test]
    fn test_with_replaces_one_channel() {
        let c = ComponentSet::<3>::checked(&SET, &[10.0, 20.0, 30.0]).unwrap();
        let d = c.with(1, 200.0).unwrap();
        assert_eq!(d.to_raw(), [10.0, 200.0, 30.0]);
        // original untouched
        assert_eq!(c.to_raw(), [10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_apply_default_step() {
        let c = ComponentSet::<3>::checked(&SET, &[10.0, 20.0, 30.0]).unwrap();
        let d = c.apply(0, ChannelOp::Increment, None).unwrap();
        assert!((d.raw(0) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_required_count() {
        assert_eq!(SET.required_count(), 3);
    }

    #[test]
    fn test_optional_channel_defaults_to_boundary_minimum() {
        const WITH_ALPHA: [ChannelDefinition; 2] = [
            ChannelDefinition::new(
                "gray",
                "Gray",
                NormalizationLaw::Linear,
                Boundary::EIGHT_BIT,
                DisplayFormat::Integer,
            ),
            ChannelDefinition::new(
                "alpha",
                "Alpha",
                NormalizationLaw::Linear,
                Boundary::PERCENT,
                DisplayFormat::Percent(0),
            )
            .optional(),
        ];
        const GA: ChannelSet = ChannelSet::new("ga", &WITH_ALPHA);

        assert_eq!(GA.required_count(), 1);
        // One value is enough; the omitted optional channel fills with the
        // boundary minimum.
        let c = ComponentSet::<2>::checked(&GA, &[77.0]).unwrap();
        assert_eq!(c.to_raw(), [77.0, 0.0]);
        // Zero values is below the required count.
        assert!(ComponentSet::<2>::checked(&GA, &[]).is_err());
    }
}
