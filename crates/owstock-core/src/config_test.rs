use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.cache_dir, PathBuf::from("."));
    assert_eq!(cfg.cache_ttl_days, 7);
    assert!(cfg.request_timeout_secs.is_none());
    assert_eq!(cfg.user_agent, "owstock/0.1 (stock-check)");
    assert_eq!(cfg.max_concurrent_probes, 1);
    assert_eq!(cfg.endpoints, Endpoints::default());
}

#[test]
fn default_endpoints_point_at_officeworks() {
    let endpoints = Endpoints::default();
    assert!(endpoints
        .product_search_url
        .starts_with("https://www.officeworks.com.au/shop/ProductSearchView?pageSize=50"));
    assert_eq!(
        endpoints.stores_url,
        "https://www.officeworks.com.au/contact-us?view=stores&format=json"
    );
    assert_eq!(
        endpoints.availability_url,
        "https://api.officeworks.com.au/v2/availability/store"
    );
}

#[test]
fn endpoint_overrides_are_applied() {
    let mut map = HashMap::new();
    map.insert("OWSTOCK_PRODUCT_SEARCH_URL", "http://127.0.0.1:9000/search");
    map.insert("OWSTOCK_STORES_URL", "http://127.0.0.1:9000/stores");
    map.insert("OWSTOCK_AVAILABILITY_URL", "http://127.0.0.1:9000/availability");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.endpoints.product_search_url,
        "http://127.0.0.1:9000/search"
    );
    assert_eq!(cfg.endpoints.stores_url, "http://127.0.0.1:9000/stores");
    assert_eq!(
        cfg.endpoints.availability_url,
        "http://127.0.0.1:9000/availability"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("OWSTOCK_REQUEST_TIMEOUT_SECS", "15");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, Some(15));
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("OWSTOCK_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OWSTOCK_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(OWSTOCK_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn cache_settings_override() {
    let mut map = HashMap::new();
    map.insert("OWSTOCK_CACHE_DIR", "/tmp/owstock");
    map.insert("OWSTOCK_CACHE_TTL_DAYS", "1");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cache_dir, PathBuf::from("/tmp/owstock"));
    assert_eq!(cfg.cache_ttl_days, 1);
}

#[test]
fn cache_ttl_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("OWSTOCK_CACHE_TTL_DAYS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OWSTOCK_CACHE_TTL_DAYS"),
        "expected InvalidEnvVar(OWSTOCK_CACHE_TTL_DAYS), got: {result:?}"
    );
}

#[test]
fn max_concurrent_probes_override() {
    let mut map = HashMap::new();
    map.insert("OWSTOCK_MAX_CONCURRENT_PROBES", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_concurrent_probes, 4);
}

#[test]
fn max_concurrent_probes_invalid() {
    let mut map = HashMap::new();
    map.insert("OWSTOCK_MAX_CONCURRENT_PROBES", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OWSTOCK_MAX_CONCURRENT_PROBES"),
        "expected InvalidEnvVar(OWSTOCK_MAX_CONCURRENT_PROBES), got: {result:?}"
    );
}

#[test]
fn max_concurrent_probes_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("OWSTOCK_MAX_CONCURRENT_PROBES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OWSTOCK_MAX_CONCURRENT_PROBES"
    ));
}

#[test]
fn user_agent_and_log_level_override() {
    let mut map = HashMap::new();
    map.insert("OWSTOCK_USER_AGENT", "custom-agent/2.0");
    map.insert("OWSTOCK_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.log_level, "debug");
}
