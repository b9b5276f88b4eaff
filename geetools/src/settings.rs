//! Process-wide settings
//!
//! Installed once with [`configure`] before first use, otherwise read from
//! the environment the first time they are needed.

use geetools_core::GeeError;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Environment variable holding the deprecation policy
pub const DEPRECATIONS_ENV: &str = "GEETOOLS_DEPRECATIONS";

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// What legacy functions do when called
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeprecationPolicy {
    /// Log a warning, then forward
    #[default]
    Warn,
    /// Forward without a notice
    Silent,
    /// Fail with `DEPRECATED`
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deprecation policy '{0}', expected warn, silent or deny")]
pub struct ParsePolicyError(String);

impl FromStr for DeprecationPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" => Ok(DeprecationPolicy::Warn),
            "silent" => Ok(DeprecationPolicy::Silent),
            "deny" => Ok(DeprecationPolicy::Deny),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for DeprecationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeprecationPolicy::Warn => "warn",
            DeprecationPolicy::Silent => "silent",
            DeprecationPolicy::Deny => "deny",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub deprecations: DeprecationPolicy,
}

impl Settings {
    /// Settings from `GEETOOLS_DEPRECATIONS`; unset means the default, an
    /// unknown value logs a warning and falls back to `warn`
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DEPRECATIONS_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        let deprecations = match value.map(DeprecationPolicy::from_str) {
            None => DeprecationPolicy::default(),
            Some(Ok(policy)) => policy,
            Some(Err(e)) => {
                tracing::warn!(variable = DEPRECATIONS_ENV, error = %e, "falling back to warn");
                DeprecationPolicy::Warn
            }
        };
        Settings { deprecations }
    }
}

/// Install `settings` for the rest of the process.
///
/// Fails when settings were already installed or already read.
pub fn configure(settings: Settings) -> Result<(), GeeError> {
    SETTINGS.set(settings).map_err(|rejected| {
        GeeError::internal("settings are already in effect").with_note(format!(
            "requested deprecations={}, active deprecations={}",
            rejected.deprecations,
            self::settings().deprecations
        ))
    })
}

/// Settings in effect
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!("warn".parse(), Ok(DeprecationPolicy::Warn));
        assert_eq!(" Deny ".parse(), Ok(DeprecationPolicy::Deny));
        assert_eq!("silent".parse(), Ok(DeprecationPolicy::Silent));
        assert!("loud".parse::<DeprecationPolicy>().is_err());
    }

    #[test]
    fn test_env_values() {
        assert_eq!(Settings::from_env_value(None), Settings::default());
        assert_eq!(Settings::from_env_value(Some("deny")).deprecations, DeprecationPolicy::Deny);
        assert_eq!(Settings::from_env_value(Some("bogus")).deprecations, DeprecationPolicy::Warn);
    }

    #[test]
    fn test_configure_only_once() {
        let _ = settings();
        let err = configure(Settings::default()).unwrap_err();
        assert_eq!(err.code, geetools_core::codes::INTERNAL);
    }
}
