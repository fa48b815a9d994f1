//! Startup configuration read from the environment

use std::env::{self, VarError};

use crate::constants::{API_KEY_VAR, DEFAULT_LOG_FILE, LOG_FILE_VAR};
use crate::error::ConfigError;

/// Settings read once at startup
#[derive(Clone)]
pub struct Config {
    /// Opaque API credential, never logged
    pub api_key: String,
    pub log_file: String,
    /// Term to look up as soon as the UI starts
    pub initial_term: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("log_file", &self.log_file)
            .field("initial_term", &self.initial_term)
            .finish()
    }
}

impl Config {
    /// Read the process environment and command-line arguments
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name), env::args().skip(1))
    }

    fn from_lookup<F, I>(lookup: F, mut args: I) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, VarError>,
        I: Iterator<Item = String>,
    {
        let api_key = match lookup(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
            Ok(_) | Err(VarError::NotPresent) => {
                return Err(ConfigError::MissingApiKey(API_KEY_VAR))
            }
            Err(VarError::NotUnicode(_)) => return Err(ConfigError::NotUnicode(API_KEY_VAR)),
        };

        let log_file = match lookup(LOG_FILE_VAR) {
            Ok(file) if !file.trim().is_empty() => file,
            Ok(_) | Err(VarError::NotPresent) => DEFAULT_LOG_FILE.to_string(),
            Err(VarError::NotUnicode(_)) => return Err(ConfigError::NotUnicode(LOG_FILE_VAR)),
        };

        let initial_term = args
            .next()
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty());

        Ok(Config {
            api_key,
            log_file,
            initial_term,
        })
    }
}
