#![forbid(unsafe_code)]

//! Highlight mode configuration.
//!
//! Two user-facing options exist: the minimum selection length that
//! triggers highlighting, and the primary/alternate styles.
//!
//! # Environment
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `GLINT_MIN_LENGTH` | Overrides [`GlintConfig::min_length`] (must be ≥ 1) |

use std::env;
use std::fmt;

use crate::style::HighlightStyles;

/// Default minimum selection length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Environment variable overriding the minimum selection length.
pub const MIN_LENGTH_ENV: &str = "GLINT_MIN_LENGTH";

/// Configuration for [`HighlightMode`](crate::mode::HighlightMode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlintConfig {
    /// Selections shorter than this many characters are not highlighted.
    /// Default: 2
    pub min_length: usize,

    /// Appearance of the two highlight categories.
    pub styles: HighlightStyles,
}

impl Default for GlintConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            styles: HighlightStyles::default(),
        }
    }
}

impl GlintConfig {
    /// Set the minimum selection length.
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Set the highlight styles.
    #[must_use]
    pub fn with_styles(mut self, styles: HighlightStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::ZeroMinLength);
        }
        Ok(())
    }

    /// Defaults layered with overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_overrides(&EnvOverrides::from_env())
    }

    /// Defaults layered with explicit overrides.
    pub fn from_overrides(overrides: &EnvOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = overrides.min_length.as_deref() {
            config.min_length = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidMinLength(raw.to_string()))?;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Raw override values, captured once so parsing is testable without
/// touching the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// Raw value of `GLINT_MIN_LENGTH`.
    pub min_length: Option<String>,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            min_length: env::var(MIN_LENGTH_ENV).ok(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_length` of zero would highlight every empty selection.
    ZeroMinLength,
    /// The minimum length override is not a non-negative integer.
    InvalidMinLength(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMinLength => write!(f, "minimum selection length must be at least 1"),
            Self::InvalidMinLength(raw) => {
                write!(f, "invalid {MIN_LENGTH_ENV} value: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{HighlightStyle, StyleFlags};

    #[test]
    fn default_min_length_is_two() {
        let config = GlintConfig::default();
        assert_eq!(config.min_length, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_min_length_rejected() {
        let config = GlintConfig::default().with_min_length(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinLength));
    }

    #[test]
    fn overrides_apply() {
        let overrides = EnvOverrides {
            min_length: Some(" 4 ".into()),
        };
        let config = GlintConfig::from_overrides(&overrides).unwrap();
        assert_eq!(config.min_length, 4);
    }

    #[test]
    fn no_overrides_is_default() {
        let config = GlintConfig::from_overrides(&EnvOverrides::default()).unwrap();
        assert_eq!(config, GlintConfig::default());
    }

    #[test]
    fn garbage_override_rejected() {
        let overrides = EnvOverrides {
            min_length: Some("two".into()),
        };
        let err = GlintConfig::from_overrides(&overrides).unwrap_err();
        assert_eq!(err, ConfigError::InvalidMinLength("two".into()));
        assert!(err.to_string().contains("GLINT_MIN_LENGTH"));
    }

    #[test]
    fn zero_override_rejected() {
        let overrides = EnvOverrides {
            min_length: Some("0".into()),
        };
        assert_eq!(
            GlintConfig::from_overrides(&overrides),
            Err(ConfigError::ZeroMinLength)
        );
    }

    #[test]
    fn with_styles_replaces_both() {
        let styles = HighlightStyles {
            primary: HighlightStyle::new().flags(StyleFlags::REVERSE),
            alternate: HighlightStyle::new(),
        };
        assert_eq!(GlintConfig::default().with_styles(styles).styles, styles);
    }
}
