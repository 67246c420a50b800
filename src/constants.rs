//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the address service
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the configured API URL
pub const API_URL_ENV: &str = "ADDRWATCH_API_URL";

/// How long a success status stays visible before it clears itself
pub const DEFAULT_STATUS_CLEAR_MS: u64 = 800;

/// Log file written next to the working directory
pub const DEFAULT_LOG_FILE: &str = "addrwatch.log";

/// Directory under the home directory holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".addrwatch";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Application name
pub const APP_NAME: &str = "addrwatch";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
