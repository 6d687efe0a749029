use std::env;

use anyhow::{anyhow, Result};

pub trait ClientConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Reads `key`, falling back to `default` when it is unset and optional.
    fn get_env(key: &str, required: bool, default: Option<String>) -> Result<Option<String>> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) if !required => Ok(default),
            Err(env::VarError::NotPresent) => Err(anyhow!(
                "Environment variable '{}' is required but not set.",
                key
            )),
            Err(e) => Err(e.into()),
        }
    }
}
