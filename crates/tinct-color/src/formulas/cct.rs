//! Correlated color temperature.
//!
//! Both formulas approximate the Planckian-locus temperature from a
//! chromaticity. McCamy's cubic is accurate near daylight; the
//! Hernández-Andrés exponential form holds over a wider range.

use std::str::FromStr;

use serde::Serialize;

use tinct_cache::{identity_of, Store};
use tinct_core::{Error, Result};
use tinct_primaries::Chromaticity;

/// Which CCT approximation to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CctFormula {
    /// McCamy (1992) cubic approximation.
    McCamy,
    /// Hernández-Andrés, Lee & Romero (1999) exponential approximation.
    HernandezAndres,
}

impl FromStr for CctFormula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mccamy" => Ok(Self::McCamy),
            "hernandez_andres" => Ok(Self::HernandezAndres),
            other => Err(Error::unknown("correlated color temperature formula", other)),
        }
    }
}

/// Computes the correlated color temperature in kelvin.
pub fn correlated_color_temperature(
    formula: CctFormula,
    chromaticity: Chromaticity,
) -> Result<f64> {
    match formula {
        CctFormula::McCamy => mccamy(chromaticity),
        CctFormula::HernandezAndres => hernandez_andres(chromaticity),
    }
}

/// Memoized [`correlated_color_temperature`].
pub fn correlated_color_temperature_cached(
    formula: CctFormula,
    chromaticity: Chromaticity,
    store: &Store<f64>,
) -> Result<f64> {
    let key = identity_of(&("cct", formula, chromaticity))?;
    let value = store.fetch(key, || correlated_color_temperature(formula, chromaticity))?;
    Ok(*value)
}

/// McCamy's approximation: `CCT = 449n³ + 3525n² + 6823.3n + 5520.33`
/// with `n = (x - 0.3320) / (0.1858 - y)`.
///
/// A chromaticity on the `y = 0.1858` line is a domain error.
pub fn mccamy(chromaticity: Chromaticity) -> Result<f64> {
    let denom = 0.1858 - chromaticity.y;
    if denom == 0.0 {
        return Err(Error::division_by_zero("McCamy epicenter offset"));
    }
    let n = (chromaticity.x - 0.3320) / denom;
    Ok(449.0 * n.powi(3) + 3525.0 * n.powi(2) + 6823.3 * n + 5520.33)
}

/// The Hernández-Andrés exponential approximation.
///
/// A chromaticity on the `y = 0.1735` line is a domain error.
pub fn hernandez_andres(chromaticity: Chromaticity) -> Result<f64> {
    const XE: f64 = 0.3366;
    const YE: f64 = 0.1735;
    const A0: f64 = -949.86315;
    const A1: f64 = 6253.80338;
    const T1: f64 = 0.92159;
    const A2: f64 = 28.70599;
    const T2: f64 = 0.20039;
    const A3: f64 = 0.00004;
    const T3: f64 = 0.07125;

    let denom = chromaticity.y - YE;
    if denom == 0.0 {
        return Err(Error::division_by_zero("Hernández-Andrés epicenter offset"));
    }
    let n = (chromaticity.x - XE) / denom;
    Ok(A0 + A1 * (-n / T1).exp() + A2 * (-n / T2).exp() + A3 * (-n / T3).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinct_primaries::Illuminant;

    #[test]
    fn test_d65_is_near_6500k() {
        let c = Illuminant::D65.chromaticity();
        let mccamy_cct = mccamy(c).unwrap();
        assert!((mccamy_cct - 6504.0).abs() < 50.0, "mccamy={mccamy_cct}");

        let ha_cct = hernandez_andres(c).unwrap();
        assert!((ha_cct - 6504.0).abs() < 50.0, "hernandez={ha_cct}");
    }

    #[test]
    fn test_d50_is_near_5000k() {
        let c = Illuminant::D50.chromaticity();
        let cct = mccamy(c).unwrap();
        assert!((cct - 5003.0).abs() < 60.0, "cct={cct}");
    }

    #[test]
    fn test_illuminant_a_is_warm() {
        let cct = mccamy(Illuminant::A.chromaticity()).unwrap();
        assert!((cct - 2856.0).abs() < 120.0, "cct={cct}");
    }

    #[test]
    fn test_epicenter_line_raises() {
        let degenerate = Chromaticity::new(0.40, 0.1858);
        assert!(matches!(
            mccamy(degenerate),
            Err(Error::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_formula_selection() {
        let c = Illuminant::D65.chromaticity();
        let a = correlated_color_temperature(CctFormula::McCamy, c).unwrap();
        let b = correlated_color_temperature(CctFormula::HernandezAndres, c).unwrap();
        // Both land near daylight, through different fits.
        assert!((a - b).abs() < 60.0);
    }

    #[test]
    fn test_cached_cct() {
        let store: Store<f64> = Store::memory();
        let c = Illuminant::D65.chromaticity();
        let first =
            correlated_color_temperature_cached(CctFormula::McCamy, c, &store).unwrap();
        let second =
            correlated_color_temperature_cached(CctFormula::McCamy, c, &store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_formula_name() {
        assert!("planck".parse::<CctFormula>().is_err());
        assert_eq!(
            "mccamy".parse::<CctFormula>().unwrap(),
            CctFormula::McCamy
        );
    }
}
