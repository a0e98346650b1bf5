//! HTTP client for the anti-bot proxy that fetches raw product-page markup.

use std::time::Duration;

use reqwest::Client;

use amzgrab_core::AppConfig;

use crate::error::ScrapeError;
use crate::retry::retry_with_backoff;

const DEFAULT_PROXY_URL: &str = "https://proxy.scrapeops.io/v1/";
const DEFAULT_HEADERS_URL: &str = "https://headers.scrapeops.io/v1/browser-headers";

/// User-Agent sent when the browser-headers service is unavailable.
pub(crate) const FALLBACK_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Client for the HTML-fetch proxy service.
///
/// All requests go through the proxy endpoint with the target URL as a query
/// parameter; the proxy handles anti-bot measures on its side. 429 and
/// network-level failures are retried with exponential backoff up to
/// `max_retries` additional attempts; other non-2xx responses are typed
/// errors for the assembler to absorb.
pub struct ProxyClient {
    client: Client,
    proxy_base_url: String,
    headers_api_url: String,
    country: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl ProxyClient {
    /// Creates a `ProxyClient` with configured timeout and retry policy,
    /// pointing at the default proxy endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            proxy_base_url: DEFAULT_PROXY_URL.to_owned(),
            headers_api_url: DEFAULT_HEADERS_URL.to_owned(),
            country: "us".to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Redirects the proxy and header endpoints, e.g. at a mock server in
    /// tests or a regional proxy in production.
    #[must_use]
    pub fn with_endpoints(
        mut self,
        proxy_base_url: &str,
        headers_api_url: &str,
        country: &str,
    ) -> Self {
        self.proxy_base_url = proxy_base_url.to_owned();
        self.headers_api_url = headers_api_url.to_owned();
        self.country = country.to_owned();
        self
    }

    /// Builds a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScrapeError> {
        Ok(Self::new(
            config.request_timeout_secs,
            config.max_retries,
            config.backoff_base_secs,
        )?
        .with_endpoints(
            &config.proxy_base_url,
            &config.headers_api_url,
            &config.proxy_country,
        ))
    }

    /// Fetches the raw markup for `target_url` through the proxy, with
    /// automatic retry on transient errors.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ScrapeError::UnexpectedStatus`] — any other non-2xx status (not retried).
    /// - [`ScrapeError::Http`] — network or TLS failure after all retries exhausted.
    pub async fn fetch_markup(
        &self,
        target_url: &str,
        api_key: &str,
    ) -> Result<String, ScrapeError> {
        let user_agent = self.resolve_user_agent(api_key).await;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let user_agent = user_agent.clone();
            let target_url = target_url.to_owned();
            let api_key = api_key.to_owned();
            async move {
                let response = self
                    .client
                    .get(&self.proxy_base_url)
                    .query(&[
                        ("api_key", api_key.as_str()),
                        ("url", target_url.as_str()),
                        ("country", self.country.as_str()),
                    ])
                    .header(reqwest::header::USER_AGENT, user_agent.as_str())
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ScrapeError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    return Err(ScrapeError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: target_url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Resolves a browser User-Agent from the headers service.
    ///
    /// Best-effort: any failure (network, non-2xx, unexpected payload) falls
    /// back to a fixed browser User-Agent so a fetch can always proceed.
    pub async fn resolve_user_agent(&self, api_key: &str) -> String {
        match self.fetch_browser_user_agent(api_key).await {
            Ok(Some(user_agent)) => user_agent,
            Ok(None) => {
                tracing::debug!("header service returned no usable user agent — using fallback");
                FALLBACK_UA.to_owned()
            }
            Err(err) => {
                tracing::debug!(error = %err, "header service unavailable — using fallback user agent");
                FALLBACK_UA.to_owned()
            }
        }
    }

    async fn fetch_browser_user_agent(
        &self,
        api_key: &str,
    ) -> Result<Option<String>, reqwest::Error> {
        let response = self
            .client
            .get(&self.headers_api_url)
            .query(&[("api_key", api_key)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let body: serde_json::Value = response.json().await?;
        // The service returns `{"result": [ ... ]}` where each entry is
        // either a bare User-Agent string or a full browser-header object.
        let user_agent = match body
            .get("result")
            .and_then(serde_json::Value::as_array)
            .and_then(|entries| entries.first())
        {
            Some(serde_json::Value::String(ua)) => Some(ua.clone()),
            Some(serde_json::Value::Object(headers)) => headers
                .get("user-agent")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
            _ => None,
        };
        Ok(user_agent.filter(|ua| !ua.is_empty()))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
