/// Hotset engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "HOTSET_LOG";
