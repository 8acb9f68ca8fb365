//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the console
//! starts. All variables are optional.
//!
//! - `ORIGIN` - Display origin for short URLs (default: `http://localhost:3000`)
//! - `MAX_BATCH_SIZE` - Most URLs accepted per submission (default: 5)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use url::Url;

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin prepended to short codes for display and copying. Supplied by
    /// the environment; the registry core never computes it.
    pub origin: String,
    /// Batch ceiling enforced by the caller layer before the registry is
    /// invoked; the registry itself accepts any batch size.
    pub max_batch_size: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let origin = env::var("ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let max_batch_size = env::var("MAX_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Self {
            origin,
            max_batch_size,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `origin` is not an absolute URL
    /// - `max_batch_size` is 0 or larger than 100
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if Url::parse(&self.origin).is_err() {
            anyhow::bail!("ORIGIN must be an absolute URL, got '{}'", self.origin);
        }

        if self.max_batch_size == 0 {
            anyhow::bail!("MAX_BATCH_SIZE must be at least 1");
        }

        if self.max_batch_size > 100 {
            anyhow::bail!(
                "MAX_BATCH_SIZE is too large (max: 100), got {}",
                self.max_batch_size
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Origin: {}", self.origin);
        tracing::info!("  Max batch size: {}", self.max_batch_size);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// Expects the environment to be populated already (e.g. via
/// `dotenvy::dotenv()` in `main.rs`).
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn base_config() -> Config {
        Config {
            origin: "http://localhost:3000".to_string(),
            max_batch_size: 5,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        config.max_batch_size = 0;
        assert!(config.validate().is_err());

        config.max_batch_size = 500;
        assert!(config.validate().is_err());

        config.max_batch_size = 5;

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.origin = "not an origin".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults_when_env_unset() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("ORIGIN");
            env::remove_var("MAX_BATCH_SIZE");
            env::remove_var("LOG_FORMAT");
        }

        let config = Config::from_env();

        assert_eq!(config.origin, "http://localhost:3000");
        assert_eq!(config.max_batch_size, 5);
        assert_eq!(config.log_format, "text");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("ORIGIN", "https://sho.rt");
            env::set_var("MAX_BATCH_SIZE", "3");
            env::set_var("LOG_FORMAT", "json");
        }

        let config = Config::from_env();

        assert_eq!(config.origin, "https://sho.rt");
        assert_eq!(config.max_batch_size, 3);
        assert_eq!(config.log_format, "json");

        // Cleanup
        unsafe {
            env::remove_var("ORIGIN");
            env::remove_var("MAX_BATCH_SIZE");
            env::remove_var("LOG_FORMAT");
        }
    }

    #[test]
    #[serial]
    fn test_unparsable_batch_size_falls_back() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("MAX_BATCH_SIZE", "many");
        }

        let config = Config::from_env();
        assert_eq!(config.max_batch_size, 5);

        // Cleanup
        unsafe {
            env::remove_var("MAX_BATCH_SIZE");
        }
    }
}
