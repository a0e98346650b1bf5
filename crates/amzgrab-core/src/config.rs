use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_key = lookup("AMZGRAB_API_KEY").ok().filter(|key| !key.is_empty());

    Ok(AppConfig {
        api_key,
        proxy_base_url: or_default("AMZGRAB_PROXY_URL", "https://proxy.scrapeops.io/v1/"),
        headers_api_url: or_default(
            "AMZGRAB_HEADERS_API_URL",
            "https://headers.scrapeops.io/v1/browser-headers",
        ),
        proxy_country: or_default("AMZGRAB_PROXY_COUNTRY", "us"),
        log_level: or_default("AMZGRAB_LOG_LEVEL", "info"),
        request_timeout_secs: parse_u64("AMZGRAB_REQUEST_TIMEOUT_SECS", "30")?,
        max_retries: parse_u32("AMZGRAB_MAX_RETRIES", "3")?,
        backoff_base_secs: parse_u64("AMZGRAB_RETRY_BACKOFF_BASE_SECS", "5")?,
        concurrency: parse_usize("AMZGRAB_CONCURRENCY", "1")?,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
