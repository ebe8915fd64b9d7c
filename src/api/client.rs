//
//  github-rest
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Dispatcher for the GitHub API
//!
//! This module provides the HTTP client every endpoint module goes through.
//! One call is exactly one HTTP round trip: no retries, no backoff, no
//! pagination.
//!
//! ## Features
//!
//! - Case-insensitive verb validation before any I/O
//! - `Authorization: token <value>` injection
//! - JSON request bodies for `POST`, `PATCH` and `PUT`
//! - Structured errors carrying the provider's message
//! - Per-client and process-wide request counters
//! - Success logging gated by [`Config::debug`]; failures are always logged

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::api::common::{ApiError, RateLimit, Verb};
use crate::config::Config;

/// Media type requested on every call.
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Body placeholder for calls that send no payload.
///
/// ```rust,no_run
/// use github_rest::api::{GitHubClient, NO_BODY};
/// use serde_json::Value;
///
/// # async fn example(client: &GitHubClient) -> Result<(), github_rest::api::ApiError> {
/// let user: Value = client.standard_request("https://api.github.com/user", "get", NO_BODY).await?;
/// # Ok(())
/// # }
/// ```
pub const NO_BODY: Option<&()> = None;

static TOTAL_REQUESTS: AtomicU64 = AtomicU64::new(0);
static DEFAULT_CLIENT: OnceCell<GitHubClient> = OnceCell::new();

/// Number of requests dispatched by every client in this process.
///
/// Never reset. Verb or URL validation failures are not counted.
pub fn request_count() -> u64 {
    TOTAL_REQUESTS.load(Ordering::Relaxed)
}

/// Installs the process-wide default client.
///
/// Returns the client back as `Err` when a default is already installed.
pub fn set_default_client(client: GitHubClient) -> Result<(), GitHubClient> {
    DEFAULT_CLIENT.set(client)
}

/// Returns the process-wide default client.
///
/// When [`set_default_client`] has not been called, a client is built from
/// [`Config::default`] on first use.
pub fn default_client() -> Result<&'static GitHubClient, ApiError> {
    DEFAULT_CLIENT.get_or_try_init(|| GitHubClient::new(Config::default()))
}

/// A successful response with its headers.
#[derive(Debug, Clone)]
pub struct ExtendedResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: T,
}

impl<T> ExtendedResponse<T> {
    /// Rate-limit headers of the response, when present.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        RateLimit::from_headers(&self.headers)
    }

    /// Discards the headers.
    pub fn into_body(self) -> T {
        self.body
    }
}

/// The HTTP client for the GitHub REST API.
///
/// Cloning is cheap: clones share the connection pool, the configuration
/// and the request counter.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use github_rest::api::GitHubClient;
/// use github_rest::config::Config;
///
/// let config = Config {
///     token: Some("ghp_example".to_string()),
///     ..Config::default()
/// };
/// let client = GitHubClient::new(config)?;
/// assert_eq!(client.request_count(), 0);
/// # Ok::<(), github_rest::api::ApiError>(())
/// ```
#[derive(Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client
    http: Client,
    /// Read-only configuration shared by all clones
    config: Arc<Config>,
    /// Requests dispatched through this client and its clones
    requests: Arc<AtomicU64>,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("host", &self.config.host)
            .field("requests", &self.request_count())
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidUrl`] if `config.host` is not an absolute
    ///   `http`/`https` URL
    /// - [`ApiError::Client`] if `config.timeout_secs` is zero or the HTTP
    ///   client cannot be built
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let mut builder =
            Client::builder().user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION));
        match config.timeout_secs {
            Some(0) => {
                return Err(ApiError::Client(
                    "timeout_secs must be greater than zero".to_string(),
                ))
            }
            Some(secs) => builder = builder.timeout(Duration::from_secs(secs)),
            None => {}
        }
        let http = builder.build().map_err(|e| ApiError::Client(e.to_string()))?;
        Self::with_http_client(config, http)
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_http_client(config: Config, http: Client) -> Result<Self, ApiError> {
        config
            .base_url()
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.host, e)))?;

        Ok(Self {
            http,
            config: Arc::new(config),
            requests: Arc::new(AtomicU64::new(0)),
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Requests dispatched through this client (and its clones).
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Joins the configured host, an endpoint path and an assembled query.
    ///
    /// ```rust
    /// use github_rest::api::GitHubClient;
    /// use github_rest::config::Config;
    ///
    /// let client = GitHubClient::new(Config::default()).unwrap();
    /// assert_eq!(
    ///     client.endpoint_url("/repos/octo/hello/issues", "state=open"),
    ///     "https://api.github.com/repos/octo/hello/issues?state=open"
    /// );
    /// assert_eq!(client.endpoint_url("/user", ""), "https://api.github.com/user");
    /// ```
    pub fn endpoint_url(&self, path: &str, query: &str) -> String {
        let host = self.config.host.trim_end_matches('/');
        if query.is_empty() {
            format!("{}{}", host, path)
        } else {
            format!("{}{}?{}", host, path, query)
        }
    }

    /// Dispatches one request and returns the parsed body with its headers.
    ///
    /// A `url` starting with `/` is resolved against the configured host.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnsupportedVerb`] for a verb outside GET/POST/PATCH/PUT/DELETE
    /// - [`ApiError::InvalidUrl`] when `url` does not parse
    /// - [`ApiError::Transport`] when no response was received
    /// - [`ApiError::Http`] for any non-2xx status
    /// - [`ApiError::Decode`] when a success body does not match `T`
    pub async fn extended_request<T, B>(
        &self,
        url: &str,
        verb: &str,
        body: Option<&B>,
    ) -> Result<ExtendedResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let verb = Verb::parse(verb)?;
        let url = self.resolve_url(url)?;

        self.requests.fetch_add(1, Ordering::Relaxed);
        TOTAL_REQUESTS.fetch_add(1, Ordering::Relaxed);

        let mut request = self
            .http
            .request(verb.method(), url.clone())
            .header(ACCEPT, GITHUB_MEDIA_TYPE);

        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        if verb.carries_body() {
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(verb = %verb, path = url.path(), error = %err, "request failed");
                return Err(ApiError::Transport(err));
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(verb = %verb, path = url.path(), error = %err, "failed to read response body");
                return Err(ApiError::Transport(err));
            }
        };

        if !status.is_success() {
            let err = http_error(status, &text, &headers);
            tracing::error!(
                status = status.as_u16(),
                verb = %verb,
                path = url.path(),
                message = %err.message(),
                "request failed"
            );
            return Err(err);
        }

        if self.config.debug {
            log_success(verb, url.path(), status, &headers);
        }

        Ok(ExtendedResponse {
            status,
            headers,
            body: parse_body(&text)?,
        })
    }

    /// Dispatches one request and returns only the parsed body.
    pub async fn standard_request<T, B>(
        &self,
        url: &str,
        verb: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Ok(self.extended_request(url, verb, body).await?.into_body())
    }

    /// Sends a `GET` and parses the body.
    ///
    /// ```rust,no_run
    /// use github_rest::api::GitHubClient;
    /// use serde_json::Value;
    ///
    /// # async fn example(client: &GitHubClient) -> Result<(), github_rest::api::ApiError> {
    /// let meta: Value = client.get("/meta").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.standard_request(url, "get", NO_BODY).await
    }

    /// Sends a `POST` with a JSON body.
    pub async fn post<T, B>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.standard_request(url, "post", Some(body)).await
    }

    /// Sends a `PATCH` with a JSON body.
    pub async fn patch<T, B>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.standard_request(url, "patch", Some(body)).await
    }

    /// Sends a `PUT`, with a JSON body when one is given.
    ///
    /// Several GitHub `PUT` endpoints (locking an issue, adding a
    /// collaborator) accept an empty body.
    pub async fn put<T, B>(&self, url: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.standard_request(url, "put", body).await
    }

    /// Sends a `DELETE`. `204 No Content` parses as `()`.
    pub async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.standard_request(url, "delete", NO_BODY).await
    }

    /// Owner and name of the configured default repository.
    pub fn default_repository(&self) -> Result<(&str, &str), ApiError> {
        self.config
            .default_repository()
            .ok_or(ApiError::MissingRepository)
    }

    fn resolve_url(&self, url: &str) -> Result<Url, ApiError> {
        let full = if url.starts_with('/') {
            self.endpoint_url(url, "")
        } else {
            url.to_string()
        };
        Url::parse(&full).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", full, e)))
    }
}

fn log_success(verb: Verb, path: &str, status: StatusCode, headers: &HeaderMap) {
    tracing::info!(status = status.as_u16(), verb = %verb, path, "request succeeded");

    if let Some(rate) = RateLimit::from_headers(headers) {
        tracing::info!(
            remaining = ?rate.remaining,
            limit = ?rate.limit,
            reset = ?rate.reset.map(|reset| reset.to_rfc3339()),
            "rate limit"
        );
    }
}

/// An empty body deserializes from JSON `null`, so `()` and `Option<T>`
/// accept `204 No Content`.
fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    if text.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(text)?)
}

/// Builds the structured error for a non-success response.
///
/// GitHub returns errors in the format:
/// ```json
/// {"message": "Validation Failed", "errors": [{"resource": "Issue", "field": "title", "code": "missing_field"}]}
/// ```
///
/// The `message` field is used when present, with validation details from
/// `errors` appended. Otherwise the raw body, otherwise the reason phrase.
pub(crate) fn http_error(status: StatusCode, text: &str, headers: &HeaderMap) -> ApiError {
    let body = serde_json::from_str::<Value>(text).ok();
    let message = error_message(status, text, body.as_ref());

    ApiError::Http {
        status: status.as_u16(),
        message,
        body,
        rate_limit: RateLimit::from_headers(headers),
    }
}

fn error_message(status: StatusCode, text: &str, body: Option<&Value>) -> String {
    if let Some(json) = body {
        if let Some(message) = json.get("message").and_then(Value::as_str) {
            let details: Vec<String> = json
                .get("errors")
                .and_then(Value::as_array)
                .map(|errors| errors.iter().filter_map(describe_validation_error).collect())
                .unwrap_or_default();

            if details.is_empty() {
                return message.to_string();
            }
            return format!("{}: {}", message, details.join("; "));
        }
    }

    let trimmed = text.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn describe_validation_error(error: &Value) -> Option<String> {
    if let Some(message) = error.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    if let Some(text) = error.as_str() {
        return Some(text.to_string());
    }

    let field = error.get("field").and_then(Value::as_str)?;
    let code = error.get("code").and_then(Value::as_str).unwrap_or("invalid");
    Some(format!("{} {}", field, code))
}
