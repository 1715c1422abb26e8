//! Color model types.
//!
//! Each model is declared from a `const` channel table and expanded through
//! [`define_model!`](crate::model::define_model); the module also carries
//! the model's conversions to and from the XYZ pivot.

mod cmyk;
mod hsl;
mod hsv;
mod lab;
mod lch;
mod luv;
mod oklab;
mod oklch;
mod rgb;
mod xyz;

pub use cmyk::Cmyk;
pub use hsl::Hsl;
pub use hsv::Hsv;
pub use lab::Lab;
pub use lch::Lch;
pub use luv::Luv;
pub use oklab::Oklab;
pub use oklch::Oklch;
pub use rgb::Rgb;
pub use xyz::Xyz;
