//! XYZ-pivot conversion traits.
//!
//! Every model converts to and from [`Xyz`] under an
//! [`EncodingSpecification`]; arbitrary model-to-model conversion composes
//! the two hops through the pivot.
//!
//! ```rust
//! use tinct_color::{convert, Config, Lab, Rgb};
//!
//! let spec = Config::default().specification().unwrap();
//! let white = Rgb::new(255.0, 255.0, 255.0).unwrap();
//! let lab: Lab = convert(&white, &spec).unwrap();
//! assert!((lab.lightness() - 100.0).abs() < 0.1);
//! ```

use tinct_core::Result;

use crate::encoding::EncodingSpecification;
use crate::models::Xyz;

/// Conversion into the XYZ pivot.
pub trait IntoXyz {
    /// Converts to tristimulus under the given specification.
    fn to_xyz(&self, spec: &EncodingSpecification) -> Result<Xyz>;
}

/// Conversion out of the XYZ pivot.
pub trait FromXyz: Sized {
    /// Converts from tristimulus under the given specification.
    fn from_xyz(xyz: &Xyz, spec: &EncodingSpecification) -> Result<Self>;
}

/// Converts between any two models through the XYZ pivot.
pub fn convert<Source: IntoXyz, Target: FromXyz>(
    color: &Source,
    spec: &EncodingSpecification,
) -> Result<Target> {
    Target::from_xyz(&color.to_xyz(spec)?, spec)
}
