//! HTTP request executor with retry

use crate::config::{ApiKey, ClientConfig};
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use crate::params::QueryParams;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

/// Body returned for successful responses without content
pub const EMPTY_BODY_SENTINEL: &str = "OK";

const JSON_MIME: &str = "application/json";

/// Decoded body of a successful response
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Parsed JSON document
    Json(Value),
    /// Empty body; stands in for the `"OK"` sentinel
    Empty,
}

impl ApiResponse {
    /// The response as JSON, with an empty body rendered as the `"OK"` string
    pub fn to_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Empty => Value::String(EMPTY_BODY_SENTINEL.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Decode the JSON payload into a typed schema
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Self::Json(value) => serde_json::from_value(value).map_err(Error::unexpected_shape),
            Self::Empty => Err(Error::UnexpectedEmptyBody),
        }
    }
}

/// Executes requests against the API origin
///
/// Holds only immutable state, so one executor can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    base_url: String,
    api_key: ApiKey,
    default_headers: HeaderMap,
    max_attempts: u32,
}

impl RequestExecutor {
    /// Create an executor with its own connection pool
    pub fn new(config: &ClientConfig) -> Result<Self> {
        // reqwest is built without a bundled crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::client_build)?;

        Self::with_client(client, config)
    }

    /// Create an executor around an existing reqwest client
    pub fn with_client(client: Client, config: &ClientConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME));
        default_headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));

        for (name, value) in &config.default_headers {
            let (name, value) = parse_header(name, value)?;
            default_headers.insert(name, value);
        }

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_headers,
            max_attempts: config.max_attempts.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Headers sent when a call supplies no overrides
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Build the full request URL
    ///
    /// The `key` parameter always comes first, followed by `params` in
    /// insertion order.
    pub fn build_url(&self, path: &str, params: &QueryParams) -> Result<Url> {
        let mut url = if path.starts_with('/') {
            Url::parse(&format!("{}{}", self.base_url, path))?
        } else {
            Url::parse(&format!("{}/{}", self.base_url, path))?
        };

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", self.api_key.as_str());
            for (name, value) in params.iter() {
                query.append_pair(name, &value.to_string());
            }
        }

        Ok(url)
    }

    /// Merge per-call headers over the defaults; per-call values win
    pub fn merge_headers(&self, extra: &HeaderMap) -> HeaderMap {
        let mut headers = self.default_headers.clone();
        for (name, value) in extra {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    /// GET an endpoint with the configured attempt bound
    pub async fn get(&self, endpoint: Endpoint, params: &QueryParams) -> Result<ApiResponse> {
        self.execute(
            Method::GET,
            endpoint.as_path(),
            params,
            &HeaderMap::new(),
            self.max_attempts,
        )
        .await
    }

    /// GET an endpoint and decode the payload into `T`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<T> {
        self.get(endpoint, params).await?.decode()
    }

    /// Execute a request, retrying failed attempts immediately
    ///
    /// Transport failures, non-2xx statuses and unparsable bodies are all
    /// retried until `max_attempts` attempts have been made; the last error is
    /// returned as is. A `max_attempts` of 0 behaves like 1.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        extra_headers: &HeaderMap,
        max_attempts: u32,
    ) -> Result<ApiResponse> {
        let max_attempts = max_attempts.max(1);
        let url = self.build_url(path, params)?;
        let headers = self.merge_headers(extra_headers);

        let mut attempt = 1;
        loop {
            debug!("{} {} (attempt {}/{})", method, path, attempt, max_attempts);

            match self.attempt(method.clone(), url.clone(), headers.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        "Retry {}/{}: {}",
                        attempt,
                        max_attempts,
                        e
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt(&self, method: Method, url: Url, headers: HeaderMap) -> Result<ApiResponse> {
        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        trace!("Response status: {}", status);
        if !status.is_success() {
            return Err(Error::http_status(status));
        }

        let body = response.text().await?;
        trace!("Response body: {} bytes", body.len());
        if body.is_empty() {
            return Ok(ApiResponse::Empty);
        }

        serde_json::from_str(&body)
            .map(ApiResponse::Json)
            .map_err(Error::malformed_response)
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| Error::invalid_header(name))?;
    let header_value = HeaderValue::from_str(value).map_err(|_| Error::invalid_header(name))?;
    Ok((header_name, header_value))
}
