use std::path::PathBuf;

use crate::app_config::{
    AppConfig, Endpoints, DEFAULT_AVAILABILITY_URL, DEFAULT_PRODUCT_SEARCH_URL,
    DEFAULT_STORES_URL,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_positive_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let request_timeout_secs = match lookup("OWSTOCK_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("OWSTOCK_REQUEST_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let log_level = or_default("OWSTOCK_LOG_LEVEL", "warn");
    let cache_dir = PathBuf::from(or_default("OWSTOCK_CACHE_DIR", "."));
    let cache_ttl_days = parse_positive_u32("OWSTOCK_CACHE_TTL_DAYS", "7")?;
    let user_agent = or_default("OWSTOCK_USER_AGENT", "owstock/0.1 (stock-check)");
    let max_concurrent_probes = parse_positive_usize("OWSTOCK_MAX_CONCURRENT_PROBES", "1")?;

    let endpoints = Endpoints {
        product_search_url: or_default("OWSTOCK_PRODUCT_SEARCH_URL", DEFAULT_PRODUCT_SEARCH_URL),
        stores_url: or_default("OWSTOCK_STORES_URL", DEFAULT_STORES_URL),
        availability_url: or_default("OWSTOCK_AVAILABILITY_URL", DEFAULT_AVAILABILITY_URL),
    };

    Ok(AppConfig {
        log_level,
        cache_dir,
        cache_ttl_days,
        request_timeout_secs,
        user_agent,
        max_concurrent_probes,
        endpoints,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
