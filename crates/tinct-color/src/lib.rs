//! # tinct-color
//!
//! Color models, the XYZ conversion pivot, gamut mapping, and perceptual
//! formulas.
//!
//! This crate is the user-facing surface of the tinct engine:
//!
//! - Model types ([`Rgb`], [`Hsl`], [`Hsv`], [`Xyz`], [`Lab`], [`Luv`],
//!   [`Lch`], [`Oklab`], [`Oklch`], [`Cmyk`]) — immutable value objects
//!   with table-driven channel accessors and derivatives
//! - [`EncodingSpecification`] — the composition root mapping device RGB
//!   to absolute tristimulus under an illuminant/observer/CAT/viewing
//!   condition, with gamut tests and mapping strategies
//! - [`convert`] — any-model-to-any-model conversion through the XYZ pivot
//! - Formulas — ΔE distance, WCAG/Weber/Michelson contrast, correlated
//!   color temperature
//! - [`Config`], [`Registry`], preset loading — the application-boundary
//!   plumbing
//!
//! # Usage
//!
//! ```rust
//! use tinct_color::{convert, Config, Lab, Rgb};
//!
//! let spec = Config::default().specification().unwrap();
//!
//! let coral = Rgb::new(255.0, 127.0, 80.0).unwrap();
//! let lab: Lab = convert(&coral, &spec).unwrap();
//! assert!(lab.lightness() > 60.0);
//!
//! // Value objects: every operation returns a new color.
//! let darker = coral.with_red_scaled_by(0.5).unwrap();
//! assert_eq!(coral.red(), 255.0);
//! assert!((darker.red() - 127.5).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod convert;
mod encoding;
mod formulas;
mod gamut;
mod loader;
mod model;
mod models;
mod registry;

pub use config::{default_specification, CacheBacking, Config};
pub use convert::{convert, FromXyz, IntoXyz};
pub use encoding::{adapt_cached, EncodingSpecification, SpecificationCache};
pub use formulas::*;
pub use gamut::GamutMapping;
pub use loader::{load_illuminants, load_spaces, parse_transfer, IlluminantPreset, RgbSpacePreset};
pub use model::ColorModel;
pub use models::{Cmyk, Hsl, Hsv, Lab, Lch, Luv, Oklab, Oklch, Rgb, Xyz};
pub use registry::Registry;
