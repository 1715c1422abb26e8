//! # tinct-core
//!
//! Core types for the tinct colorimetric computation engine.
//!
//! This crate provides the channel/component value system that every color
//! model in the tinct workspace is built from:
//!
//! - [`Boundary`] - Numeric range descriptor for a channel (bounded or unbound)
//! - [`NormalizationLaw`] - How raw values map to canonical normalized space
//! - [`ChannelDefinition`] - Immutable per-channel descriptor
//! - [`Value`] - Immutable (normalized, unnormalized) channel value pair
//! - [`ChannelSet`], [`ComponentSet`] - Ordered channel groups per color model
//! - [`Error`] - Unified error type for the whole workspace
//!
//! # Design
//!
//! All types here are immutable value objects: every arithmetic operation on
//! a [`Value`] returns a new value, and component sets are rebuilt rather
//! than mutated. Channel behavior is table-driven — a model declares a
//! `const` list of [`ChannelDefinition`]s and all accessor and derivative
//! behavior dispatches through the channel's [`NormalizationLaw`].
//!
//! # Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies:
//!
//! ```text
//! tinct-core (this crate)
//!    ^
//!    |
//!    +-- tinct-math (matrices, chromatic adaptation)
//!    +-- tinct-cache (identity digests, cache stores)
//!    +-- tinct-primaries (illuminants, RGB spaces)
//!    +-- tinct-color (models, conversion, formulas)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod boundary;
pub mod channel;
pub mod error;
pub mod set;
pub mod value;

pub use boundary::*;
pub use channel::*;
pub use error::*;
pub use set::*;
pub use value::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use tinct_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::boundary::Boundary;
    pub use crate::channel::{ChannelDefinition, DisplayFormat, NormalizationLaw};
    pub use crate::error::{Error, Result};
    pub use crate::set::{ChannelOp, ChannelSet, ComponentSet};
    pub use crate::value::Value;
}
