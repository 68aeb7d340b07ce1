//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional; defaults match the shipped widget.
//!
//! - `MINICART_STORAGE_KEY` - Primary snapshot key (default: `minicart.cart.v1`)
//! - `MINICART_LEGACY_STORAGE_KEY` - Pre-envelope key read once and migrated
//!   (default: `cart-items`)
//! - `MINICART_NOTIFY_DISMISS_MS` - Toast auto-dismiss in milliseconds
//!   (default: 2000)
//! - `MINICART_FOCUS_RESTORE_DELAY_MS` - Settle delay before restoring focus
//!   after the panel closes (default: 10)

use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Storage key the versioned snapshot envelope lives under.
    pub storage_key: String,
    /// Storage key of the legacy bare-array format, migrated on first load.
    pub legacy_storage_key: String,
    /// How long the transient add-notification stays visible.
    pub notify_dismiss: Duration,
    /// Settle delay the UI applies before restoring focus after panel close,
    /// so hide transitions and DOM updates finish first.
    pub focus_restore_delay: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: "minicart.cart.v1".to_owned(),
            legacy_storage_key: "cart-items".to_owned(),
            notify_dismiss: Duration::from_millis(2000),
            focus_restore_delay: Duration::from_millis(10),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from the environment, falling back to defaults for
    /// anything unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when a duration variable is set
    /// but not a non-negative integer millisecond count.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            storage_key: env_or("MINICART_STORAGE_KEY", defaults.storage_key),
            legacy_storage_key: env_or("MINICART_LEGACY_STORAGE_KEY", defaults.legacy_storage_key),
            notify_dismiss: env_millis("MINICART_NOTIFY_DISMISS_MS", defaults.notify_dismiss)?,
            focus_restore_delay: env_millis(
                "MINICART_FOCUS_RESTORE_DELAY_MS",
                defaults.focus_restore_delay,
            )?,
        })
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

fn env_millis(name: &str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => parse_millis(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| {
            ConfigError::InvalidEnvVar(
                name.to_owned(),
                format!("expected milliseconds, got {raw:?}"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.storage_key, "minicart.cart.v1");
        assert_eq!(config.legacy_storage_key, "cart-items");
        assert_eq!(config.notify_dismiss, Duration::from_millis(2000));
        assert_eq!(config.focus_restore_delay, Duration::from_millis(10));
    }

    // parse_millis is tested directly; the process environment is shared
    // across test threads, so from_env itself only gets the default path.
    #[test]
    fn test_parse_millis() {
        assert_eq!(
            parse_millis("X", "1500").unwrap(),
            Duration::from_millis(1500)
        );
        assert_eq!(parse_millis("X", " 10 ").unwrap(), Duration::from_millis(10));
        assert!(parse_millis("X", "soon").is_err());
        assert!(parse_millis("X", "-5").is_err());
    }

    #[test]
    fn test_from_env_defaults_when_unset() {
        let config = WidgetConfig::from_env().unwrap();
        assert_eq!(config.notify_dismiss, WidgetConfig::default().notify_dismiss);
    }
}
