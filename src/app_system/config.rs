//! Registry configuration from environment variables.

use std::env;
use std::str::FromStr;

use tracing::warn;

/// Runtime settings for the registry system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Capacity of the store actor's mailbox
    pub store_buffer: usize,

    /// Prefix for the location of a created student
    pub location_prefix: String,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            store_buffer: 32,
            location_prefix: "/student".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STUDENT_REGISTRY_STORE_BUFFER`: store mailbox capacity (default: 32)
    /// - `STUDENT_REGISTRY_LOCATION_PREFIX`: location prefix (default: /student)
    /// - `STUDENT_REGISTRY_LOG_LEVEL`: fallback log filter (default: info)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            store_buffer: parse_or(
                "STUDENT_REGISTRY_STORE_BUFFER",
                lookup("STUDENT_REGISTRY_STORE_BUFFER"),
                defaults.store_buffer,
            )
            .max(1),
            location_prefix: lookup("STUDENT_REGISTRY_LOCATION_PREFIX")
                .unwrap_or(defaults.location_prefix),
            log_level: lookup("STUDENT_REGISTRY_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Unparsable setting, using default");
            default
        }),
    }
}
