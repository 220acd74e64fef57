use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gateway pulse divisor used when no configuration says otherwise.
pub const DEFAULT_PULSE_DIV: u32 = 34;

/// Host-owned settings shared by every protocol codec.
///
/// # Examples
/// ```
/// use rfpulse_core::CodecConfig;
///
/// let config = CodecConfig::from_json_str(r#"{ "pulse_div": 10 }"#).unwrap();
/// assert_eq!(config.pulse_div, 10);
/// assert_eq!(CodecConfig::from_json_str("{}").unwrap(), CodecConfig::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Scale factor applied to protocol pulse bounds when checking gaps.
    pub pulse_div: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pulse_div: DEFAULT_PULSE_DIV,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid pulse_div: {value} (must be greater than zero)")]
    InvalidPulseDiv { value: u32 },
}

impl CodecConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: CodecConfig = serde_json::from_str(text)?;
        config.validate()
    }

    pub fn with_pulse_div(self, pulse_div: u32) -> Result<Self, ConfigError> {
        Self { pulse_div }.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.pulse_div == 0 {
            return Err(ConfigError::InvalidPulseDiv {
                value: self.pulse_div,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{CodecConfig, ConfigError, DEFAULT_PULSE_DIV};

    #[test]
    fn default_uses_gateway_divisor() {
        assert_eq!(CodecConfig::default().pulse_div, DEFAULT_PULSE_DIV);
    }

    #[test]
    fn zero_divisor_is_rejected() {
        let err = CodecConfig::from_json_str(r#"{ "pulse_div": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPulseDiv { value: 0 }));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = CodecConfig::from_json_str(r#"{ "pulse_dev": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn override_keeps_validation() {
        assert!(CodecConfig::default().with_pulse_div(0).is_err());
        assert_eq!(
            CodecConfig::default().with_pulse_div(5).unwrap().pulse_div,
            5
        );
    }
}
