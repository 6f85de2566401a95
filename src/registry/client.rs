//! HTTP client shared foundation
//!
//! A thin wrapper over reqwest with a fixed timeout and User-Agent.
//! Each lookup is a single attempt; failures are classified into
//! typed registry errors and the caller decides how to degrade.

use crate::error::RegistryError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("pkgpulse/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request and parse the JSON response
    ///
    /// Status mapping: 404 → PackageNotFound, 429 → RateLimitExceeded,
    /// any other non-success → NetworkError. Transport failures are
    /// classified by their nature (timeout, no connection, other).
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
    ) -> Result<T, RegistryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport_error(package, &e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::package_not_found(package));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RegistryError::rate_limit_exceeded(package));
        }
        if !status.is_success() {
            return Err(RegistryError::network_error(
                package,
                format!("HTTP {}", status),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(package, format!("failed to parse JSON: {}", e))
        })
    }
}

/// Classify a reqwest transport failure into a typed registry error
fn classify_transport_error(package: &str, error: &reqwest::Error) -> RegistryError {
    if error.is_timeout() {
        RegistryError::Timeout {
            package: package.to_string(),
        }
    } else if error.is_connect() {
        RegistryError::NoConnection {
            package: package.to_string(),
        }
    } else {
        RegistryError::network_error(package, error.to_string())
    }
}
