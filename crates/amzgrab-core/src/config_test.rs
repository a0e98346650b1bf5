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
fn empty_env_yields_defaults() {
    let map = HashMap::new();
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.api_key, None);
    assert_eq!(config.proxy_base_url, "https://proxy.scrapeops.io/v1/");
    assert_eq!(
        config.headers_api_url,
        "https://headers.scrapeops.io/v1/browser-headers"
    );
    assert_eq!(config.proxy_country, "us");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.backoff_base_secs, 5);
    assert_eq!(config.concurrency, 1);
}

#[test]
fn api_key_is_read_when_present() {
    let mut map = HashMap::new();
    map.insert("AMZGRAB_API_KEY", "secret-key");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.api_key.as_deref(), Some("secret-key"));
}

#[test]
fn empty_api_key_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("AMZGRAB_API_KEY", "");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.api_key, None);
}

#[test]
fn overrides_are_parsed() {
    let mut map = HashMap::new();
    map.insert("AMZGRAB_CONCURRENCY", "8");
    map.insert("AMZGRAB_MAX_RETRIES", "0");
    map.insert("AMZGRAB_PROXY_COUNTRY", "de");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.concurrency, 8);
    assert_eq!(config.max_retries, 0);
    assert_eq!(config.proxy_country, "de");
}

#[test]
fn unparseable_number_fails() {
    let mut map = HashMap::new();
    map.insert("AMZGRAB_CONCURRENCY", "many");
    let err = build_app_config(lookup_from_map(&map)).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "AMZGRAB_CONCURRENCY")
    );
}

#[test]
fn debug_output_redacts_the_api_key() {
    let mut map = HashMap::new();
    map.insert("AMZGRAB_API_KEY", "secret-key");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("secret-key"));
    assert!(rendered.contains("[redacted]"));
}
