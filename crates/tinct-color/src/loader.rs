//! Preset data loading.
//!
//! Illuminant and RGB-space presets live in YAML files owned by the
//! application; the engine reads them into plain preset structs and treats
//! the contents as opaque attribute sources. Any I/O or parse failure
//! surfaces as the single data-error kind carrying the offending path.
//!
//! # Format
//!
//! ```yaml
//! # illuminants.yaml
//! - name: d93
//!   x: 0.28315
//!   y: 0.29711
//! ```
//!
//! ```yaml
//! # spaces.yaml
//! - name: cie_rgb
//!   red: [0.7347, 0.2653]
//!   green: [0.2738, 0.7174]
//!   blue: [0.1666, 0.0089]
//!   white: e
//!   transfer: gamma:2.2
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use tinct_core::{Error, Result};
use tinct_primaries::Transfer;

/// A named white point loaded from a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct IlluminantPreset {
    /// Registry name.
    pub name: String,
    /// Chromaticity x.
    pub x: f64,
    /// Chromaticity y.
    pub y: f64,
}

/// An RGB color space loaded from a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RgbSpacePreset {
    /// Registry name.
    pub name: String,
    /// Red primary chromaticity [x, y].
    pub red: [f64; 2],
    /// Green primary chromaticity [x, y].
    pub green: [f64; 2],
    /// Blue primary chromaticity [x, y].
    pub blue: [f64; 2],
    /// Name of the native illuminant (resolved through the registry).
    pub white: String,
    /// Transfer function name ("linear", "srgb", "rec709", "gamma:<g>").
    pub transfer: String,
}

/// Loads illuminant presets from a YAML file.
pub fn load_illuminants(path: impl AsRef<Path>) -> Result<Vec<IlluminantPreset>> {
    let presets: Vec<IlluminantPreset> = read_yaml(path.as_ref())?;
    tracing::debug!(
        count = presets.len(),
        path = %path.as_ref().display(),
        "loaded illuminant presets"
    );
    Ok(presets)
}

/// Loads RGB color space presets from a YAML file.
pub fn load_spaces(path: impl AsRef<Path>) -> Result<Vec<RgbSpacePreset>> {
    let presets: Vec<RgbSpacePreset> = read_yaml(path.as_ref())?;
    tracing::debug!(
        count = presets.len(),
        path = %path.as_ref().display(),
        "loaded color space presets"
    );
    Ok(presets)
}

/// Parses a preset transfer-function name.
pub fn parse_transfer(name: &str) -> Result<Transfer> {
    match name {
        "linear" => Ok(Transfer::Linear),
        "srgb" => Ok(Transfer::Srgb),
        "rec709" => Ok(Transfer::Rec709),
        other => {
            if let Some(gamma) = other.strip_prefix("gamma:") {
                let gamma: f64 = gamma
                    .parse()
                    .map_err(|_| Error::unknown("transfer function", other))?;
                if gamma <= 0.0 {
                    return Err(Error::unknown("transfer function", other));
                }
                return Ok(Transfer::Gamma(gamma));
            }
            Err(Error::unknown("transfer function", other))
        }
    }
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::invalid_data_file(path, e.to_string()))?;
    serde_yaml::from_str(&content).map_err(|e| Error::invalid_data_file(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_illuminants() {
        let file = write_temp(
            "- name: d93\n  x: 0.28315\n  y: 0.29711\n- name: custom\n  x: 0.31\n  y: 0.32\n",
        );
        let presets = load_illuminants(file.path()).unwrap();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].name, "d93");
        assert!((presets[0].x - 0.28315).abs() < 1e-12);
    }

    #[test]
    fn test_load_spaces() {
        let file = write_temp(
            "- name: cie_rgb\n  red: [0.7347, 0.2653]\n  green: [0.2738, 0.7174]\n  blue: [0.1666, 0.0089]\n  white: e\n  transfer: gamma:2.2\n",
        );
        let presets = load_spaces(file.path()).unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].white, "e");
        assert_eq!(presets[0].transfer, "gamma:2.2");
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let err = load_illuminants("/nonexistent/illuminants.yaml").unwrap_err();
        assert!(err.is_data_error());
        assert!(err.to_string().contains("illuminants.yaml"));
    }

    #[test]
    fn test_malformed_yaml_is_data_error() {
        let file = write_temp("- name: broken\n  x: not_a_number\n  y: 0.3\n");
        let err = load_illuminants(file.path()).unwrap_err();
        assert!(err.is_data_error());
    }

    #[test]
    fn test_parse_transfer() {
        assert_eq!(parse_transfer("linear").unwrap(), Transfer::Linear);
        assert_eq!(parse_transfer("srgb").unwrap(), Transfer::Srgb);
        assert!(matches!(
            parse_transfer("gamma:1.8").unwrap(),
            Transfer::Gamma(g) if (g - 1.8).abs() < 1e-12
        ));
        assert!(parse_transfer("gamma:-1").is_err());
        assert!(parse_transfer("pq").is_err());
    }
}
