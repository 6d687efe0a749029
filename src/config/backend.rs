use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use super::base::ClientConfig;

pub const BASE_URL_VAR: &str = "DOCLENS_BASE_URL";
pub const TIMEOUT_VAR: &str = "DOCLENS_TIMEOUT_SECS";
pub const ORIGIN_VERIFY_VAR: &str = "DOCLENS_ORIGIN_VERIFY";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the tool endpoints live and how to reach them.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    /// Shared secret sent as `X-Origin-Verify` when the backend sits behind
    /// an origin check.
    pub origin_verify: Option<String>,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            origin_verify: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_origin_verify(mut self, secret: Option<String>) -> Self {
        self.origin_verify = secret.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ClientConfig for BackendConfig {
    fn from_env() -> Result<Self> {
        let base_url = Self::get_env(BASE_URL_VAR, true, None)?
            .ok_or_else(|| anyhow!("Backend base URL should be present"))?;

        let timeout_secs = Self::get_env(TIMEOUT_VAR, false, None)?
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds"))
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let origin_verify = Self::get_env(ORIGIN_VERIFY_VAR, false, None)?;

        Ok(Self::new(base_url)
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_origin_verify(origin_verify))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = BackendConfig::new("https://docs.example.com/");
        assert_eq!(config.endpoint("/api/read"), "https://docs.example.com/api/read");
    }

    #[test]
    fn test_blank_origin_secret_is_dropped() {
        let config = BackendConfig::new("http://x").with_origin_verify(Some("  ".into()));
        assert_eq!(config.origin_verify, None);
    }

    #[test]
    fn test_from_env() -> Result<()> {
        std::env::remove_var(BASE_URL_VAR);
        assert!(BackendConfig::from_env().is_err());

        std::env::set_var(BASE_URL_VAR, "http://localhost:8080/");
        std::env::set_var(TIMEOUT_VAR, "5");
        std::env::set_var(ORIGIN_VERIFY_VAR, "s3cret");
        let config = BackendConfig::from_env()?;
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.origin_verify.as_deref(), Some("s3cret"));

        std::env::set_var(TIMEOUT_VAR, "soon");
        assert!(BackendConfig::from_env().is_err());

        for var in [BASE_URL_VAR, TIMEOUT_VAR, ORIGIN_VERIFY_VAR] {
            std::env::remove_var(var);
        }
        Ok(())
    }
}
