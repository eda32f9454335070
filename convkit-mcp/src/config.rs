//! Server configuration from environment variables

use std::env;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub log_level: String,
    /// Reject units outside the requested category instead of using the neutral rate
    pub strict_units: bool,
}

impl ServerConfig {
    /// Read `CONVKIT_LOG` (falling back to `RUST_LOG`) and `CONVKIT_STRICT_UNITS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup("CONVKIT_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let strict_units = lookup("CONVKIT_STRICT_UNITS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self { log_level, strict_units }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            strict_units: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
