//! Color difference formulas.
//!
//! ΔE*76 is the plain Euclidean distance in Lab; ΔE*94 and CIEDE2000 add
//! the weighting corrections of their standards; ΔE-OK is the Euclidean
//! distance in Oklab. Implementation notes follow Sharma, Wu & Dalal
//! (2005) for CIEDE2000.

use std::str::FromStr;

use serde::Serialize;

use tinct_cache::{identity_of, Store};
use tinct_core::{Error, Result};

use crate::models::{Lab, Oklab};

/// Which color-difference formula to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DistanceFormula {
    /// CIE 1976 Euclidean ΔE*.
    Cie76,
    /// CIE 1994 graphic-arts ΔE*.
    Cie94,
    /// CIEDE2000.
    Ciede2000,
}

impl FromStr for DistanceFormula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cie76" => Ok(Self::Cie76),
            "cie94" => Ok(Self::Cie94),
            "ciede2000" => Ok(Self::Ciede2000),
            other => Err(Error::unknown("distance formula", other)),
        }
    }
}

/// Computes a Lab color difference with the chosen formula.
pub fn distance(formula: DistanceFormula, reference: &Lab, sample: &Lab) -> f64 {
    match formula {
        DistanceFormula::Cie76 => delta_e_76(reference, sample),
        DistanceFormula::Cie94 => delta_e_94(reference, sample),
        DistanceFormula::Ciede2000 => delta_e_2000(reference, sample),
    }
}

/// Memoized [`distance`], keyed by formula and both operand identities.
pub fn distance_cached(
    formula: DistanceFormula,
    reference: &Lab,
    sample: &Lab,
    store: &Store<f64>,
) -> Result<f64> {
    let key = identity_of(&("distance", formula, reference, sample))?;
    let value = store.fetch(key, || Ok(distance(formula, reference, sample)))?;
    Ok(*value)
}

/// CIE 1976 ΔE*: Euclidean distance in Lab.
pub fn delta_e_76(reference: &Lab, sample: &Lab) -> f64 {
    let dl = reference.lightness() - sample.lightness();
    let da = reference.a() - sample.a();
    let db = reference.b() - sample.b();
    (dl * dl + da * da + db * db).sqrt()
}

/// CIE 1994 ΔE* with graphic-arts weights (kL=1, K1=0.045, K2=0.015).
pub fn delta_e_94(reference: &Lab, sample: &Lab) -> f64 {
    let dl = reference.lightness() - sample.lightness();
    let c1 = reference.chroma();
    let c2 = sample.chroma();
    let dc = c1 - c2;

    let da = reference.a() - sample.a();
    let db = reference.b() - sample.b();
    // The hue term is defined by what remains after lightness and chroma.
    let dh2 = (da * da + db * db - dc * dc).max(0.0);

    let sc = 1.0 + 0.045 * c1;
    let sh = 1.0 + 0.015 * c1;

    let term_c = dc / sc;
    let term_h = dh2.sqrt() / sh;
    (dl * dl + term_c * term_c + term_h * term_h).sqrt()
}

/// CIEDE2000 ΔE00.
pub fn delta_e_2000(reference: &Lab, sample: &Lab) -> f64 {
    const POW7_25: f64 = 6103515625.0; // 25^7

    let (l1, a1, b1) = (reference.lightness(), reference.a(), reference.b());
    let (l2, a2, b2) = (sample.lightness(), sample.a(), sample.b());

    let c_bar = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let c_bar7 = c_bar.powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + POW7_25)).sqrt());

    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;
    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);

    let h1p = hue_angle(b1, a1p);
    let h2p = hue_angle(b2, a2p);

    let dl = l2 - l1;
    let dc = c2p - c1p;

    let dh_angle = if c1p * c2p == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d.abs() <= 180.0 {
            d
        } else if d > 180.0 {
            d - 360.0
        } else {
            d + 360.0
        }
    };
    let dh = 2.0 * (c1p * c2p).sqrt() * (dh_angle / 2.0).to_radians().sin();

    let l_bar = (l1 + l2) / 2.0;
    let c_barp = (c1p + c2p) / 2.0;
    let h_bar = if c1p * c2p == 0.0 {
        h1p + h2p
    } else {
        let sum = h1p + h2p;
        if (h1p - h2p).abs() <= 180.0 {
            sum / 2.0
        } else if sum < 360.0 {
            (sum + 360.0) / 2.0
        } else {
            (sum - 360.0) / 2.0
        }
    };

    let t = 1.0 - 0.17 * (h_bar - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar).to_radians().cos()
        + 0.32 * (3.0 * h_bar + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar - 63.0).to_radians().cos();

    let d_theta = 30.0 * (-((h_bar - 275.0) / 25.0).powi(2)).exp();
    let c_barp7 = c_barp.powi(7);
    let rc = 2.0 * (c_barp7 / (c_barp7 + POW7_25)).sqrt();
    let rt = -(2.0 * d_theta).to_radians().sin() * rc;

    let l_offset = (l_bar - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l_offset / (20.0 + l_offset).sqrt();
    let sc = 1.0 + 0.045 * c_barp;
    let sh = 1.0 + 0.015 * c_barp * t;

    let term_l = dl / sl;
    let term_c = dc / sc;
    let term_h = dh / sh;
    (term_l * term_l + term_c * term_c + term_h * term_h + rt * term_c * term_h).sqrt()
}

/// ΔE-OK: Euclidean distance in Oklab.
pub fn delta_e_ok(reference: &Oklab, sample: &Oklab) -> f64 {
    let dl = reference.lightness() - sample.lightness();
    let da = reference.a() - sample.a();
    let db = reference.b() - sample.b();
    (dl * dl + da * da + db * db).sqrt()
}

/// Hue angle in degrees on [0, 360), zero for the neutral axis.
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    if a_prime == 0.0 && b == 0.0 {
        0.0
    } else {
        b.atan2(a_prime).to_degrees().rem_euclid(360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Pair 1 of the Sharma, Wu & Dalal CIEDE2000 test data.
    fn sharma_pair() -> (Lab, Lab) {
        (
            Lab::new(50.0, 2.6772, -79.7751).unwrap(),
            Lab::new(50.0, 0.0, -82.7485).unwrap(),
        )
    }

    #[test]
    fn test_identical_colors_have_zero_distance() {
        let lab = Lab::new(50.0, 10.0, -10.0).unwrap();
        assert_eq!(delta_e_76(&lab, &lab), 0.0);
        assert_eq!(delta_e_94(&lab, &lab), 0.0);
        assert_eq!(delta_e_2000(&lab, &lab), 0.0);
    }

    #[test]
    fn test_delta_e_76() {
        let (a, b) = sharma_pair();
        assert!((delta_e_76(&a, &b) - 4.0011).abs() < 0.001);
    }

    #[test]
    fn test_delta_e_94() {
        let (a, b) = sharma_pair();
        assert!((delta_e_94(&a, &b) - 1.3950).abs() < 0.001);
    }

    #[test]
    fn test_delta_e_2000_reference_pairs() {
        // Expected values from Sharma, Wu & Dalal (2005), table 1.
        let cases = [
            ((50.0, 2.6772, -79.7751), (50.0, 0.0, -82.7485), 2.0425),
            ((50.0, 3.1571, -77.2803), (50.0, 0.0, -82.7485), 2.8615),
            ((50.0, 2.8361, -74.0200), (50.0, 0.0, -82.7485), 3.4412),
            ((50.0, -1.3802, -84.2814), (50.0, 0.0, -82.7485), 1.0000),
            ((50.0, 2.5000, 0.0), (50.0, 0.0, -2.5000), 4.3065),
            ((60.2574, -34.0099, 36.2677), (60.4626, -34.1751, 39.4387), 1.2644),
        ];
        for ((l1, a1, b1), (l2, a2, b2), expected) in cases {
            let x = Lab::new(l1, a1, b1).unwrap();
            let y = Lab::new(l2, a2, b2).unwrap();
            let got = delta_e_2000(&x, &y);
            assert!(
                (got - expected).abs() < 0.0001,
                "ΔE00({l1},{a1},{b1} ; {l2},{a2},{b2}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_delta_e_2000_is_symmetric() {
        let (a, b) = sharma_pair();
        assert!((delta_e_2000(&a, &b) - delta_e_2000(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn test_delta_e_ok() {
        let a = Oklab::new(0.5, 0.1, 0.0).unwrap();
        let b = Oklab::new(0.5, 0.0, 0.0).unwrap();
        assert!((delta_e_ok(&a, &b) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_cached_distance() {
        let store: Store<f64> = Store::memory();
        let (a, b) = sharma_pair();
        let first = distance_cached(DistanceFormula::Ciede2000, &a, &b, &store).unwrap();
        let second = distance_cached(DistanceFormula::Ciede2000, &a, &b, &store).unwrap();
        assert_eq!(first, second);
        assert!((first - 2.0425).abs() < 0.0001);
    }

    #[test]
    fn test_unknown_formula_name() {
        assert!(matches!(
            "cie42".parse::<DistanceFormula>(),
            Err(Error::UnknownName { .. })
        ));
    }
}
