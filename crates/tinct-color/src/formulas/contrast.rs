//! Contrast formulas.
//!
//! WCAG contrast operates on sRGB-encoded colors through relative
//! luminance; Weber and Michelson contrast are plain luminance ratios.
//! Zero denominators are domain errors — the formulas raise rather than
//! produce infinities.

use tinct_cache::{identity_of, Store};
use tinct_core::{Error, Result};
use tinct_primaries::Transfer;

use crate::models::Rgb;

/// WCAG relative luminance of an sRGB color.
///
/// Components are linearized with the sRGB EOTF and weighted with the
/// Rec.709 luma coefficients, per WCAG 2.x.
pub fn relative_luminance(color: &Rgb) -> f64 {
    let e = color.encoded();
    0.2126 * Transfer::Srgb.decode(e.x)
        + 0.7152 * Transfer::Srgb.decode(e.y)
        + 0.0722 * Transfer::Srgb.decode(e.z)
}

/// WCAG 2.x contrast ratio between two sRGB colors, in [1, 21].
///
/// # Example
///
/// ```rust
/// use tinct_color::{wcag_contrast, Rgb};
///
/// let black = Rgb::new(0.0, 0.0, 0.0).unwrap();
/// let white = Rgb::new(255.0, 255.0, 255.0).unwrap();
/// assert!((wcag_contrast(&black, &white) - 21.0).abs() < 0.01);
/// ```
pub fn wcag_contrast(a: &Rgb, b: &Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Memoized [`wcag_contrast`], keyed by both operand identities.
pub fn wcag_contrast_cached(a: &Rgb, b: &Rgb, store: &Store<f64>) -> Result<f64> {
    let key = identity_of(&("wcag_contrast", a, b))?;
    let value = store.fetch(key, || Ok(wcag_contrast(a, b)))?;
    Ok(*value)
}

/// Weber contrast of a target luminance against its background.
///
/// A zero background luminance is a domain error.
pub fn weber_contrast(target_luminance: f64, background_luminance: f64) -> Result<f64> {
    if background_luminance == 0.0 {
        return Err(Error::division_by_zero("Weber contrast background luminance"));
    }
    Ok((target_luminance - background_luminance) / background_luminance)
}

/// Michelson contrast of a luminance pair.
///
/// A zero luminance sum is a domain error.
pub fn michelson_contrast(maximum_luminance: f64, minimum_luminance: f64) -> Result<f64> {
    let sum = maximum_luminance + minimum_luminance;
    if sum == 0.0 {
        return Err(Error::division_by_zero("Michelson contrast luminance sum"));
    }
    Ok((maximum_luminance - minimum_luminance) / sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_white_is_maximum_ratio() {
        let black = Rgb::new(0.0, 0.0, 0.0).unwrap();
        let white = Rgb::new(255.0, 255.0, 255.0).unwrap();
        let ratio = wcag_contrast(&black, &white);
        assert!((ratio - 21.0).abs() < 0.01, "ratio={ratio}");
        // Order does not matter.
        assert_eq!(ratio, wcag_contrast(&white, &black));
    }

    #[test]
    fn test_self_contrast_is_one() {
        let gray = Rgb::new(128.0, 128.0, 128.0).unwrap();
        assert!((wcag_contrast(&gray, &gray) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(relative_luminance(&Rgb::new(0.0, 0.0, 0.0).unwrap()), 0.0);
        let white = relative_luminance(&Rgb::new(255.0, 255.0, 255.0).unwrap());
        assert!((white - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weber_zero_background_raises() {
        assert!(matches!(
            weber_contrast(0.5, 0.0),
            Err(Error::DivisionByZero { .. })
        ));
        assert!((weber_contrast(0.6, 0.2).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_michelson() {
        assert!(matches!(
            michelson_contrast(0.0, 0.0),
            Err(Error::DivisionByZero { .. })
        ));
        assert!((michelson_contrast(1.0, 0.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((michelson_contrast(0.75, 0.25).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cached_contrast() {
        let store: Store<f64> = Store::memory();
        let a = Rgb::new(10.0, 20.0, 30.0).unwrap();
        let b = Rgb::new(200.0, 210.0, 220.0).unwrap();
        let first = wcag_contrast_cached(&a, &b, &store).unwrap();
        let second = wcag_contrast_cached(&a, &b, &store).unwrap();
        assert_eq!(first, second);
        assert!(first > 1.0);
    }
}
