//! Process-wide renderer configuration.
//!
//! The only setting the engine consults is the failure mode for malformed
//! markup. It is read once (typically at startup) and then passed to the
//! engine explicitly.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::diagnostics::warn_once;

/// Environment variable that selects strict markup handling.
pub const STRICT_ENV_VAR: &str = "LUMEN_STRICT_MARKUP";

/// How the engine reacts to markup it cannot interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Log each distinct problem once and degrade to a sensible default,
    /// falling back to plain text when the markup cannot be scanned.
    #[default]
    Lenient,
    /// Fail the call with an error carrying a caret diagnostic.
    Strict,
}

impl FailureMode {
    /// Whether malformed markup is an error.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The value is not a recognized boolean.
    #[error("invalid value {value:?} for {name}: expected true/false, yes/no or 1/0")]
    InvalidBool {
        /// Setting name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

impl FromStr for FailureMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" | "strict" => Ok(Self::Strict),
            "" | "0" | "false" | "no" | "off" | "lenient" => Ok(Self::Lenient),
            _ => Err(ConfigError::InvalidBool {
                name: STRICT_ENV_VAR,
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration shared by every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    /// Reaction to malformed markup.
    pub failure_mode: FailureMode,
}

impl RenderConfig {
    /// Lenient configuration.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            failure_mode: FailureMode::Lenient,
        }
    }

    /// Strict configuration.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            failure_mode: FailureMode::Strict,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// An unset variable means lenient. An unrecognized value is reported
    /// once and treated as lenient.
    #[must_use]
    pub fn from_env() -> Self {
        env::var(STRICT_ENV_VAR).map_or_else(
            |_| Self::lenient(),
            |value| match value.parse::<FailureMode>() {
                Ok(failure_mode) => Self { failure_mode },
                Err(err) => {
                    warn_once("Config", &err.to_string());
                    Self::lenient()
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_mode_parse() {
        assert_eq!("true".parse::<FailureMode>(), Ok(FailureMode::Strict));
        assert_eq!("YES".parse::<FailureMode>(), Ok(FailureMode::Strict));
        assert_eq!("1".parse::<FailureMode>(), Ok(FailureMode::Strict));
        assert_eq!("false".parse::<FailureMode>(), Ok(FailureMode::Lenient));
        assert_eq!("".parse::<FailureMode>(), Ok(FailureMode::Lenient));
    }

    #[test]
    fn test_failure_mode_parse_invalid() {
        let err = "maybe".parse::<FailureMode>().unwrap_err();
        assert!(err.to_string().contains(STRICT_ENV_VAR));
    }

    #[test]
    fn test_default_is_lenient() {
        assert_eq!(RenderConfig::default(), RenderConfig::lenient());
        assert!(!RenderConfig::default().failure_mode.is_strict());
        assert!(RenderConfig::strict().failure_mode.is_strict());
    }
}
