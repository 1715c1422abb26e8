//! The color model trait and channel method generation.
//!
//! Every color model (RGB, Lab, Oklch, ...) is an immutable value object
//! owning an ordered component set, an opacity scalar in [0, 100], and an
//! optional encoding specification. Models never mutate: every setter and
//! derivative operation returns a new instance.
//!
//! Accessor and derivative behavior is table-driven. Each model declares a
//! `const` channel table ([`ChannelSet`]); the generic operations on
//! [`ColorModel`] dispatch through the channel's normalization law; and the
//! [`define_model!`] macro expands the per-channel method families
//! (`red()`, `with_red()`, `increment_red()`, `with_red_incremented_by()`,
//! ...) as one-line delegations into that generic path, so no per-channel
//! arithmetic is ever hand-written.

use std::sync::Arc;

use serde::Serializer;

use tinct_core::{ChannelOp, ChannelSet, Error, Result, Value};

use crate::encoding::EncodingSpecification;

/// Serializes the optional encoding specification through the `Arc`, so a
/// color's identity covers its encoding configuration without requiring
/// serde's `rc` feature.
pub(crate) fn serialize_encoding<S: Serializer>(
    encoding: &Option<Arc<EncodingSpecification>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match encoding {
        Some(spec) => serializer.serialize_some(spec.as_ref()),
        None => serializer.serialize_none(),
    }
}

/// Validates an opacity scalar.
pub(crate) fn validate_opacity(opacity: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&opacity) {
        return Err(Error::validation(
            "opacity",
            "number in 0..=100",
            opacity.to_string(),
        ));
    }
    Ok(())
}

/// Shared behavior of every color model.
///
/// The required methods expose the model's channel table and parts; the
/// provided methods implement the generic channel operations every model
/// inherits.
pub trait ColorModel: Sized + Clone {
    /// Model name ("rgb", "lab", ...).
    const MODEL: &'static str;

    /// The model's ordered channel table.
    fn channel_set() -> ChannelSet;

    /// The component values in channel order.
    fn components(&self) -> &[Value];

    /// Opacity in [0, 100].
    fn opacity(&self) -> f64;

    /// The encoding specification attached to this instance, if any.
    fn encoding(&self) -> Option<&Arc<EncodingSpecification>>;

    /// Builds an instance with full validation (arity, boundaries,
    /// opacity). This is the path every public constructor goes through.
    fn from_parts(
        raw: &[f64],
        opacity: f64,
        encoding: Option<Arc<EncodingSpecification>>,
    ) -> Result<Self>;

    /// Builds an instance without boundary validation, for
    /// internally-generated values known valid (or deliberately out of
    /// gamut) by construction.
    fn from_intermediate(
        raw: &[f64],
        opacity: f64,
        encoding: Option<Arc<EncodingSpecification>>,
    ) -> Result<Self>;

    /// The raw channel values in channel order.
    fn to_raw(&self) -> Vec<f64> {
        self.components().iter().map(Value::raw).collect()
    }

    /// Returns a new instance with channel `index` set to an absolute raw
    /// value, validated against the channel boundary.
    fn with_channel(&self, index: usize, raw: f64) -> Result<Self> {
        let mut values = self.to_raw();
        values[index] = raw;
        Self::from_parts(&values, self.opacity(), self.encoding().cloned())
    }

    /// Returns a new instance with a derivative operation applied to
    /// channel `index`.
    ///
    /// `amount` is a normalized delta (increment/decrement) or factor
    /// (scale/contract); `None` uses one normalized differential step.
    /// Results are not boundary-validated — derivative arithmetic may
    /// leave the gamut, which is the gamut mapper's concern.
    fn apply_channel(&self, index: usize, op: ChannelOp, amount: Option<f64>) -> Result<Self> {
        let value = self.components()[index];
        let amount = amount.unwrap_or_else(|| value.definition().normalized_step());
        let updated = match op {
            ChannelOp::Increment => value.incremented(amount)?,
            ChannelOp::Decrement => value.decremented(amount)?,
            ChannelOp::Scale => value.scaled(amount)?,
            ChannelOp::Contract => value.contracted(amount)?,
        };
        let mut values = self.to_raw();
        values[index] = updated.raw();
        Self::from_intermediate(&values, self.opacity(), self.encoding().cloned())
    }

    /// Returns a new instance with the given opacity.
    fn with_opacity(&self, opacity: f64) -> Result<Self> {
        validate_opacity(opacity)?;
        Self::from_intermediate(&self.to_raw(), opacity, self.encoding().cloned())
    }

    /// Returns a new instance carrying the given encoding specification.
    fn with_encoding(&self, encoding: Arc<EncodingSpecification>) -> Result<Self> {
        Self::from_intermediate(&self.to_raw(), self.opacity(), Some(encoding))
    }

    /// Human-facing rendering, e.g. `rgb(255, 128, 0)`.
    fn display(&self) -> String {
        let parts: Vec<String> = self.components().iter().map(Value::display).collect();
        format!("{}({})", Self::MODEL, parts.join(", "))
    }
}

/// Defines a color model struct and its channel method families.
///
/// The invocation lists, per channel: the index, the raw accessor name, the
/// absolute setter name, and the four derivative pairs (step alias +
/// explicit-amount form). Everything expands to one-line delegations into
/// the generic [`ColorModel`] operations, keeping the channel tables as the
/// single source of truth.
macro_rules! define_model {
    (
        $(#[$meta:meta])*
        $name:ident, $model:literal, $n:literal, $set:expr;
        $(
            $idx:literal => $get:ident, $with:ident,
                ($inc:ident, $inc_by:ident),
                ($dec:ident, $dec_by:ident),
                ($scl:ident, $scl_by:ident),
                ($ctr:ident, $ctr_by:ident)
        );+ $(;)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize)]
        pub struct $name {
            components: tinct_core::ComponentSet<$n>,
            opacity: f64,
            #[serde(serialize_with = "crate::model::serialize_encoding")]
            encoding: Option<std::sync::Arc<crate::encoding::EncodingSpecification>>,
        }

        impl crate::model::ColorModel for $name {
            const MODEL: &'static str = $model;

            fn channel_set() -> tinct_core::ChannelSet {
                $set
            }

            fn components(&self) -> &[tinct_core::Value] {
                self.components.values()
            }

            fn opacity(&self) -> f64 {
                self.opacity
            }

            fn encoding(&self) -> Option<&std::sync::Arc<crate::encoding::EncodingSpecification>> {
                self.encoding.as_ref()
            }

            fn from_parts(
                raw: &[f64],
                opacity: f64,
                encoding: Option<std::sync::Arc<crate::encoding::EncodingSpecification>>,
            ) -> tinct_core::Result<Self> {
                crate::model::validate_opacity(opacity)?;
                Ok(Self {
                    components: tinct_core::ComponentSet::checked(&$set, raw)?,
                    opacity,
                    encoding,
                })
            }

            fn from_intermediate(
                raw: &[f64],
                opacity: f64,
                encoding: Option<std::sync::Arc<crate::encoding::EncodingSpecification>>,
            ) -> tinct_core::Result<Self> {
                Ok(Self {
                    components: tinct_core::ComponentSet::intermediate(&$set, raw)?,
                    opacity,
                    encoding,
                })
            }
        }

        impl $name {
            $(
                /// Raw channel value.
                #[inline]
                pub fn $get(&self) -> f64 {
                    self.components.raw($idx)
                }

                /// Returns a new color with this channel set to an absolute
                /// raw value (boundary-validated).
                pub fn $with(&self, value: f64) -> tinct_core::Result<Self> {
                    crate::model::ColorModel::with_channel(self, $idx, value)
                }

                /// Nudges the channel up by one differential step.
                pub fn $inc(&self) -> tinct_core::Result<Self> {
                    crate::model::ColorModel::apply_channel(
                        self, $idx, tinct_core::ChannelOp::Increment, None)
                }

                /// Increments the channel by a normalized amount.
                pub fn $inc_by(&self, amount: f64) -> tinct_core::Result<Self> {
                    crate::model::ColorModel::apply_channel(
                        self, $idx, tinct_core::ChannelOp::Increment, Some(amount))
                }

                /// Nudges the channel down by one differential step.
                pub fn $dec(&self) -> tinct_core::Result<Self> {
                    crate::model::ColorModel::apply_channel(
                        self, $idx, tinct_core::ChannelOp::Decrement, None)
                }

                /// Decrements the channel by a normalized amount.
                pub fn $dec_by(&self, amount: f64) -> tinct_core::Result<Self> {
                    crate::model::ColorModel::apply_channel(
                        self, $idx, tinct_core::ChannelOp::Decrement, Some(amount))
                }

                /// Scales the channel by one normalized differential step.
                pub fn $scl(&self) -> tinct_core::Result<Self> {
                    crate::model::ColorModel::apply_channel(
                        self, $idx, tinct_core::ChannelOp::Scale, None)
                }

                /// Scales the channel by a factor.
                pub fn $scl_by(&self, amount: f64) -> tinct_core::Result<Self> {
                    crate::model::ColorModel::apply_channel(
                        self, $idx, tinct_core::ChannelOp::Scale, Some(amount))
                }

                /// Contracts the channel by one normalized differential step.
                pub fn $ctr(&self) -> tinct_core::Result<Self> {
                    crate::model::ColorModel::apply_channel(
                        self, $idx, tinct_core::ChannelOp::Contract, None)
                }

                /// Contracts (divides) the channel by a factor.
                pub fn $ctr_by(&self, amount: f64) -> tinct_core::Result<Self> {
                    crate::model::ColorModel::apply_channel(
                        self, $idx, tinct_core::ChannelOp::Contract, Some(amount))
                }
            )+

            /// Opacity in [0, 100].
            #[inline]
            pub fn opacity(&self) -> f64 {
                self.opacity
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", crate::model::ColorModel::display(self))
            }
        }
    };
}

pub(crate) use define_model;
