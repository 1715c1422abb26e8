//! # tinct-cache
//!
//! Identity digests and memoization stores.
//!
//! Conversions, derived matrices, and formula results in the tinct engine
//! are pure functions of immutable value objects, which makes them ideal
//! memoization targets. This crate provides the two halves of that:
//!
//! - [`identity_of`] / [`Digest`] - a stable content hash over the
//!   semantically relevant attributes of a value, used as the cache key
//! - [`Store`], [`MemoryStore`], [`LruStore`], [`NullStore`] - thread-safe
//!   key-value stores with fetch-or-compute semantics
//!
//! # Usage
//!
//! ```rust
//! use tinct_cache::{identity_of, MemoryStore};
//!
//! let store: MemoryStore<f64> = MemoryStore::new();
//! let key = identity_of(&("contrast", 0.0_f64, 1.0_f64)).unwrap();
//!
//! let value = store.fetch(key, || Ok(21.0)).unwrap();
//! assert_eq!(*value, 21.0);
//! ```
//!
//! # Dependencies
//!
//! - [`sha2`] - SHA-256 content digests
//! - [`serde_json`] - canonical byte serialization for keys and size
//!   estimates

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod identity;
mod store;

pub use identity::*;
pub use store::*;
