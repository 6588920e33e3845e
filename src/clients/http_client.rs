//! HTTP transport for Brightpearl API communication.
//!
//! This module provides the [`HttpClient`] type, which attaches the
//! account credentials to every request and retries transient failures.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::clients::errors::{BrightpearlApiError, HttpError, ProtocolError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::BrightpearlConfig;

/// Status codes that are retried when retries are enabled.
pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Upper bound for a single backoff delay.
pub const BACKOFF_MAX: Duration = Duration::from_secs(120);

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to one Brightpearl account.
///
/// The client handles:
/// - Base URL construction (`{domain}/public-api/{account_id}`)
/// - Default headers including the app reference and account token
/// - Automatic retries for 429, 500, 502, 503 and 504 responses, and for
///   connection failures and timeouts
/// - JSON body decoding
///
/// One underlying connection pool is kept per client and reused across calls.
/// No other state is mutated between requests, so a single client can serve
/// any number of concurrent searches.
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    default_headers: HashMap<String, String>,
    max_retries: u32,
    backoff_factor: f64,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &BrightpearlConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Brightpearl API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "brightpearl-app-ref".to_string(),
            config.app_ref().as_ref().to_string(),
        );
        default_headers.insert(
            "brightpearl-account-token".to_string(),
            config.account_token().as_ref().to_string(),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_uri: config.base_url(),
            default_headers,
            max_retries: config.max_retries(),
            backoff_factor: config.backoff_factor(),
        })
    }

    /// Returns the account-scoped base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Brightpearl API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error persists after any retries (`Network`)
    /// - A 2xx body is not valid JSON (`Protocol`)
    /// - A non-2xx response is received, after any retries (`Api`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}/{}", self.base_uri, request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }

        let max_tries = self.max_retries.saturating_add(1);
        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Patch => self.client.patch(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            let sent = match req_builder.send().await {
                Ok(res) => {
                    let code = res.status().as_u16();
                    let res_headers = Self::parse_response_headers(res.headers());
                    res.text().await.map(|body_text| (code, res_headers, body_text))
                }
                Err(error) => Err(error),
            };

            let (code, res_headers, body_text) = match sent {
                Ok(parts) => parts,
                Err(error) if Self::is_transient(&error) && tries < max_tries => {
                    let delay = self.backoff_delay(tries);
                    tracing::warn!(
                        "Brightpearl API {} {} failed with {}, retrying in {:?} (attempt {} of {})",
                        request.http_method.to_string().to_uppercase(),
                        request.path,
                        error,
                        delay,
                        tries,
                        max_tries
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                Err(error) => return Err(error.into()),
            };
            let body = Self::parse_body(&body_text, (200..=299).contains(&code))?;

            let response = HttpResponse::new(code, res_headers, body);
            if response.is_ok() {
                return Ok(response);
            }

            let method = request.http_method.to_string().to_uppercase();
            let retryable = RETRY_STATUSES.contains(&code);
            if !retryable || tries >= max_tries {
                if retryable && tries > 1 {
                    tracing::warn!(
                        "Giving up on {} {} after {} attempts, last status {}",
                        method,
                        request.path,
                        tries,
                        code
                    );
                }
                return Err(HttpError::Api(BrightpearlApiError {
                    status: code,
                    message: format!("Brightpearl API {method} {url} failed with {code}"),
                    payload: response.body,
                }));
            }

            let delay = self.retry_delay(&response, tries);
            tracing::warn!(
                "Brightpearl API {} {} returned {}, retrying in {:?} (attempt {} of {})",
                method,
                request.path,
                code,
                delay,
                tries,
                max_tries
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Decodes a response body.
    ///
    /// Empty bodies decode to `{}`. Unparseable error bodies are kept as
    /// `{"text": ...}` so they can still be reported.
    fn parse_body(body_text: &str, is_ok: bool) -> Result<serde_json::Value, ProtocolError> {
        if body_text.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        match serde_json::from_str(body_text) {
            Ok(body) => Ok(body),
            Err(_) if !is_ok => Ok(serde_json::json!({ "text": body_text })),
            Err(source) => Err(ProtocolError::MalformedBody { source }),
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Returns `true` for connection and timeout failures, which are retried
    /// like transient statuses.
    fn is_transient(error: &reqwest::Error) -> bool {
        error.is_connect() || error.is_timeout()
    }

    /// Calculates the delay before the next attempt.
    ///
    /// 429 responses honour `Retry-After`; everything else uses exponential
    /// backoff capped at [`BACKOFF_MAX`].
    fn retry_delay(&self, response: &HttpResponse, tries: u32) -> Duration {
        if response.code == 429 {
            if let Some(retry_after) = response.retry_request_after {
                return Duration::from_secs_f64(retry_after).min(BACKOFF_MAX);
            }
        }
        self.backoff_delay(tries)
    }

    /// Exponential backoff for the given attempt, capped at [`BACKOFF_MAX`].
    fn backoff_delay(&self, tries: u32) -> Duration {
        let exponent = i32::try_from(tries.saturating_sub(1)).unwrap_or(i32::MAX);
        let seconds = self.backoff_factor * 2f64.powi(exponent);
        if seconds.is_finite() {
            Duration::from_secs_f64(seconds).min(BACKOFF_MAX)
        } else {
            BACKOFF_MAX
        }
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_uri", &self.base_uri)
            .field("max_retries", &self.max_retries)
            .field("backoff_factor", &self.backoff_factor)
            .finish_non_exhaustive()
    }
}
