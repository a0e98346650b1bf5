use thiserror::Error;

/// Errors raised while loading [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Process-wide configuration, loaded once at startup and read-only for the
/// lifetime of a run.
#[derive(Clone)]
pub struct AppConfig {
    /// ScrapeOps API credential. Optional here so the CLI can also take it
    /// per invocation; the pipeline itself requires one.
    pub api_key: Option<String>,
    /// Proxy endpoint that fetches raw product-page markup.
    pub proxy_base_url: String,
    /// Best-effort browser-headers endpoint for User-Agent rotation.
    pub headers_api_url: String,
    /// Country routed through the proxy.
    pub proxy_country: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_secs: u64,
    /// Batch group size: one extraction per group member runs concurrently.
    pub concurrency: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("proxy_base_url", &self.proxy_base_url)
            .field("headers_api_url", &self.headers_api_url)
            .field("proxy_country", &self.proxy_country)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_secs", &self.backoff_base_secs)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
