use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::credential::FileStore;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    // Generation service
    pub api_base_url: String,
    /// Whole-request timeout; `None` leaves the call unbounded
    pub request_timeout: Option<Duration>,

    // Credential store
    pub credential_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base_url: std::env::var("LINGUIST_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),

            request_timeout: match std::env::var("LINGUIST_REQUEST_TIMEOUT_SECS") {
                Ok(value) => Some(parse_timeout(&value)?),
                Err(_) => None,
            },

            credential_file: match std::env::var("LINGUIST_CREDENTIAL_FILE") {
                Ok(path) => PathBuf::from(path),
                Err(_) => FileStore::default_path()
                    .context("LINGUIST_CREDENTIAL_FILE not set and no default location")?,
            },
        })
    }

    /// Full URL of the generation endpoint.
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.api_base_url.trim_end_matches('/'))
    }

    /// Full URL of the health endpoint.
    pub fn health_url(&self) -> String {
        format!("{}/health", self.api_base_url.trim_end_matches('/'))
    }
}

fn parse_timeout(value: &str) -> Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("LINGUIST_REQUEST_TIMEOUT_SECS is not a number: '{}'", value))?;
    if secs == 0 {
        bail!("LINGUIST_REQUEST_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("LINGUIST_API_URL");
        std::env::remove_var("LINGUIST_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LINGUIST_CREDENTIAL_FILE");
    }

    fn create_test_config(api_base_url: &str) -> Config {
        Config {
            api_base_url: api_base_url.to_string(),
            request_timeout: None,
            credential_file: PathBuf::from("/tmp/credentials.json"),
        }
    }

    // ==================== from_env Tests ====================

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("LINGUIST_CREDENTIAL_FILE", "/tmp/linguist-test.json");

        let config = Config::from_env().expect("Should load");
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert!(config.request_timeout.is_none());
        assert_eq!(config.credential_file, PathBuf::from("/tmp/linguist-test.json"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear_env();
        std::env::set_var("LINGUIST_API_URL", "https://linguist.example.com");
        std::env::set_var("LINGUIST_REQUEST_TIMEOUT_SECS", "45");
        std::env::set_var("LINGUIST_CREDENTIAL_FILE", "/tmp/custom.json");

        let config = Config::from_env().expect("Should load");
        assert_eq!(config.api_base_url, "https://linguist.example.com");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_timeout() {
        clear_env();
        std::env::set_var("LINGUIST_CREDENTIAL_FILE", "/tmp/linguist-test.json");
        std::env::set_var("LINGUIST_REQUEST_TIMEOUT_SECS", "soon");

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a number"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_zero_timeout() {
        clear_env();
        std::env::set_var("LINGUIST_CREDENTIAL_FILE", "/tmp/linguist-test.json");
        std::env::set_var("LINGUIST_REQUEST_TIMEOUT_SECS", "0");

        assert!(Config::from_env().is_err());

        clear_env();
    }

    // ==================== URL Tests ====================

    #[test]
    fn test_generate_url() {
        let config = create_test_config("http://localhost:8000");
        assert_eq!(config.generate_url(), "http://localhost:8000/api/generate");
    }

    #[test]
    fn test_generate_url_trailing_slash() {
        let config = create_test_config("http://localhost:8000/");
        assert_eq!(config.generate_url(), "http://localhost:8000/api/generate");
        assert_eq!(config.health_url(), "http://localhost:8000/health");
    }
}
