//! Runtime configuration
//!
//! Read once from the environment at startup.

use serde::Serialize;
use thiserror::Error;

use crate::measurement::{DEFAULT_FRACTION_DIGITS, DEFAULT_SNAP_TOLERANCE};

pub const DIGITS_VAR: &str = "TAILORBILL_MEASUREMENT_DIGITS";
pub const TOLERANCE_VAR: &str = "TAILORBILL_FRACTION_TOLERANCE";

pub const MAX_MEASUREMENT_DIGITS: u32 = 10;
/// Half an eighth; a wider tolerance would let neighbouring eighths overlap
pub const MAX_FRACTION_TOLERANCE: f64 = 0.0625;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a whole number, got {value:?}")]
    NotAnInteger { var: &'static str, value: String },

    #[error("{var} must be a number, got {value:?}")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} out of range: {value} (allowed {allowed})")]
    OutOfRange {
        var: &'static str,
        value: String,
        allowed: &'static str,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Settings {
    /// Fractional digits kept when parsing numeric measurements
    pub measurement_digits: u32,
    /// Snap distance used when displaying decimals as eighths
    pub fraction_tolerance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            measurement_digits: DEFAULT_FRACTION_DIGITS,
            fraction_tolerance: DEFAULT_SNAP_TOLERANCE,
        }
    }
}

impl Settings {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build settings from any variable source. Unset or blank variables
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(value) = get(DIGITS_VAR) {
            let digits = value
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::NotAnInteger {
                    var: DIGITS_VAR,
                    value: value.clone(),
                })?;
            if digits > MAX_MEASUREMENT_DIGITS {
                return Err(ConfigError::OutOfRange {
                    var: DIGITS_VAR,
                    value,
                    allowed: "0..=10",
                });
            }
            settings.measurement_digits = digits;
        }

        if let Some(value) = get(TOLERANCE_VAR) {
            let tolerance = value
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::NotANumber {
                    var: TOLERANCE_VAR,
                    value: value.clone(),
                })?;
            if !(tolerance > 0.0 && tolerance < MAX_FRACTION_TOLERANCE) {
                return Err(ConfigError::OutOfRange {
                    var: TOLERANCE_VAR,
                    value,
                    allowed: "greater than 0 and below 0.0625",
                });
            }
            settings.fraction_tolerance = tolerance;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.measurement_digits, 4);
        assert_eq!(settings.fraction_tolerance, 0.01);
    }

    #[test]
    fn test_overrides() {
        let settings =
            Settings::from_lookup(lookup(&[(DIGITS_VAR, " 2 "), (TOLERANCE_VAR, "0.02")])).unwrap();
        assert_eq!(settings.measurement_digits, 2);
        assert_eq!(settings.fraction_tolerance, 0.02);

        let settings = Settings::from_lookup(lookup(&[(DIGITS_VAR, "")])).unwrap();
        assert_eq!(settings.measurement_digits, 4);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Settings::from_lookup(lookup(&[(DIGITS_VAR, "four")])),
            Err(ConfigError::NotAnInteger { .. })
        ));
        assert!(matches!(
            Settings::from_lookup(lookup(&[(DIGITS_VAR, "11")])),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            Settings::from_lookup(lookup(&[(TOLERANCE_VAR, "0.1")])),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            Settings::from_lookup(lookup(&[(TOLERANCE_VAR, "NaN")])),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            Settings::from_lookup(lookup(&[(TOLERANCE_VAR, "wide")])),
            Err(ConfigError::NotANumber { .. })
        ));
    }
}
