//! # tinct-math
//!
//! Math primitives for colorimetric computation.
//!
//! This crate provides the small dense linear algebra the rest of the
//! workspace is built on:
//!
//! - [`Vec3`] - f64 triplets for XYZ/RGB tristimulus values
//! - [`Mat3`] - fixed 3x3 matrices for color space transforms (hot path)
//! - [`Matrix`], [`RowVector`], [`ColVector`] - general small matrices with
//!   determinant/inverse up to arbitrary size (closed form through 4x4,
//!   elimination beyond)
//! - [`Cat`] - chromatic adaptation transforms (Bradford, CAT02, ...)
//!
//! # Design
//!
//! All matrix storage is **row-major** and multiplication uses **column
//! vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Everything is `f64`: the conversion tolerances this engine is tested
//! against (1e-9 matrix round trips, 1e-6 model round trips) sit below
//! single-precision resolution.
//!
//! # Usage
//!
//! ```rust
//! use tinct_math::{Mat3, Vec3};
//!
//! let rgb_to_xyz = Mat3::from_rows([
//!     [0.4124564, 0.3575761, 0.1804375],
//!     [0.2126729, 0.7151522, 0.0721750],
//!     [0.0193339, 0.1191920, 0.9503041],
//! ]);
//!
//! let xyz = rgb_to_xyz * Vec3::new(1.0, 0.5, 0.25);
//! ```
//!
//! # Dependencies
//!
//! - [`tinct-core`] - Error types
//! - [`glam`] - Interop with `DVec3`/`DMat3`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cat;
mod mat3;
mod matrix;
mod vec3;

pub use cat::*;
pub use mat3::*;
pub use matrix::*;
pub use vec3::*;
