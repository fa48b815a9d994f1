//! Application constants
//!
//! Centralized location for the API endpoint and client defaults.

/// Dictionary API host
pub const API_HOST: &str = "www.dictionaryapi.com";

/// Path of the Collegiate dictionary JSON reference on the API host
pub const API_BASE_PATH: &str = "/api/v3/references/collegiate/json";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "DICTIONARY_API_KEY";

/// Environment variable overriding the log file name
pub const LOG_FILE_VAR: &str = "WEBSTER_LOG_FILE";

/// Default log file, written to the working directory
pub const DEFAULT_LOG_FILE: &str = "webster.log";

/// User-Agent sent with every lookup
pub const USER_AGENT: &str = concat!("webster-tui/", env!("CARGO_PKG_VERSION"));

/// Upper bound for a single lookup, connect through body
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Width of the right-aligned sense label column
pub const LABEL_WIDTH: usize = 8;

/// Application name
pub const APP_NAME: &str = "Webster";
