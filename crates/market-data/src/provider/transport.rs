use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::MarketDataError;

/// Raw response handed back by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response with a JSON body.
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Performs a GET against a resolved request target.
///
/// Implementations return any status code as a response; only failures to
/// obtain a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, target: &str) -> Result<HttpResponse, MarketDataError>;
}

/// Production transport using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tickertracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, target: &str) -> Result<HttpResponse, MarketDataError> {
        debug!("GET {}", target);

        let response = self
            .client
            .get(target)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        endpoint: target.to_string(),
                    }
                } else {
                    MarketDataError::Network {
                        endpoint: target.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::Network {
                endpoint: target.to_string(),
                message: format!("Failed to read response: {}", e),
            })?;

        Ok(HttpResponse { status, body })
    }
}
