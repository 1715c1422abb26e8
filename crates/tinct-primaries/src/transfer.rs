//! Transfer functions (OETF/EOTF pairs).
//!
//! A [`Transfer`] maps between linear light and the encoded component
//! values a color space stores. `decode` is the EOTF (encoded → linear),
//! `encode` the OETF (linear → encoded).
//!
//! Out-of-range inputs are handled by mirroring: negative values are
//! encoded/decoded by magnitude with the sign restored, which keeps the
//! functions monotonic for the gamut-mapping search.

use serde::Serialize;

/// A color space transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Transfer {
    /// No encoding; components are linear light.
    Linear,
    /// The piecewise sRGB curve (IEC 61966-2-1).
    Srgb,
    /// A pure power curve with the given gamma.
    Gamma(f64),
    /// The Rec.709 camera curve (ITU-R BT.709).
    Rec709,
}

impl Transfer {
    /// Decodes an encoded component to linear light (EOTF).
    ///
    /// # Example
    ///
    /// ```rust
    /// use tinct_primaries::Transfer;
    ///
    /// let linear = Transfer::Srgb.decode(0.5);
    /// assert!((linear - 0.214).abs() < 0.01);
    /// ```
    pub fn decode(self, encoded: f64) -> f64 {
        let magnitude = encoded.abs();
        let decoded = match self {
            Self::Linear => magnitude,
            Self::Srgb => {
                if magnitude <= 0.04045 {
                    magnitude / 12.92
                } else {
                    ((magnitude + 0.055) / 1.055).powf(2.4)
                }
            }
            Self::Gamma(gamma) => magnitude.powf(gamma),
            Self::Rec709 => {
                if magnitude < 0.081 {
                    magnitude / 4.5
                } else {
                    ((magnitude + 0.099) / 1.099).powf(1.0 / 0.45)
                }
            }
        };
        decoded.copysign(if encoded == 0.0 { 1.0 } else { encoded })
    }

    /// Encodes linear light to a component value (OETF).
    ///
    /// # Example
    ///
    /// ```rust
    /// use tinct_primaries::Transfer;
    ///
    /// let encoded = Transfer::Srgb.encode(0.214);
    /// assert!((encoded - 0.5).abs() < 0.01);
    /// ```
    pub fn encode(self, linear: f64) -> f64 {
        let magnitude = linear.abs();
        let encoded = match self {
            Self::Linear => magnitude,
            Self::Srgb => {
                if magnitude <= 0.0031308 {
                    magnitude * 12.92
                } else {
                    1.055 * magnitude.powf(1.0 / 2.4) - 0.055
                }
            }
            Self::Gamma(gamma) => magnitude.powf(1.0 / gamma),
            Self::Rec709 => {
                if magnitude < 0.018 {
                    magnitude * 4.5
                } else {
                    1.099 * magnitude.powf(0.45) - 0.099
                }
            }
        };
        encoded.copysign(if linear == 0.0 { 1.0 } else { linear })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_round_trip() {
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            let back = Transfer::Srgb.encode(Transfer::Srgb.decode(v));
            assert!((v - back).abs() < 1e-9, "v={v}, back={back}");
        }
    }

    #[test]
    fn test_boundaries() {
        for t in [
            Transfer::Linear,
            Transfer::Srgb,
            Transfer::Gamma(2.2),
            Transfer::Rec709,
        ] {
            assert_eq!(t.decode(0.0), 0.0);
            assert!((t.decode(1.0) - 1.0).abs() < 1e-6);
            assert_eq!(t.encode(0.0), 0.0);
            assert!((t.encode(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_srgb_midpoint() {
        // sRGB 0.5 is approximately 0.214 linear.
        assert!((Transfer::Srgb.decode(0.5) - 0.214).abs() < 0.01);
    }

    #[test]
    fn test_gamma_round_trip() {
        let t = Transfer::Gamma(563.0 / 256.0);
        for i in 0..=50 {
            let v = i as f64 / 50.0;
            let back = t.decode(t.encode(v));
            assert!((v - back).abs() < 1e-9);
        }
    }

    #[test]
    fn test_negative_mirroring() {
        let encoded = Transfer::Srgb.encode(-0.214);
        assert!(encoded < 0.0);
        let back = Transfer::Srgb.decode(encoded);
        assert!((back + 0.214).abs() < 1e-9);
    }
}
