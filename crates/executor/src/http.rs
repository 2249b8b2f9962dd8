//! HttpExecutor - authenticated platform calls over HTTP

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument, warn};

use contracts::{
    DispatchConfig, ErrorKind, Method, Operation, Outcome, PlatformConfig, PlatformExecutor,
};

use crate::error::ExecutorError;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-backed platform executor
///
/// One shared client serves every platform; each call takes the target
/// platform's config explicitly, so the executor itself is stateless
/// across dispatches.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    timeout: Duration,
}

impl HttpExecutor {
    /// Create an executor with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, ExecutorError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExecutorError::client_build(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Create an executor with the default 10s timeout
    pub fn with_defaults() -> Result<Self, ExecutorError> {
        Self::new(DEFAULT_TIMEOUT)
    }

    /// Create an executor from blueprint dispatch settings
    pub fn from_dispatch_config(config: &DispatchConfig) -> Result<Self, ExecutorError> {
        Self::new(Duration::from_secs(config.request_timeout_sec))
    }

    /// Configured per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_request(&self, config: &PlatformConfig, operation: &Operation) -> reqwest::RequestBuilder {
        let url = format!("{}{}", config.base_url, operation.endpoint);

        let request = match operation.method {
            Method::Get => self.client.get(&url),
            Method::Post => {
                let request = self
                    .client
                    .post(&url)
                    .header(reqwest::header::CONTENT_TYPE, "application/json");
                // Payload only travels on POST
                match &operation.payload {
                    Some(payload) => request.json(payload),
                    None => request,
                }
            }
        };

        request.bearer_auth(&config.credential)
    }

    /// Map a reqwest send error to a normalized failure kind
    fn classify_send_error(error: &reqwest::Error) -> ErrorKind {
        if error.is_timeout() {
            ErrorKind::Timeout
        } else {
            // connect refusal, DNS failure, TLS failure
            ErrorKind::Transport
        }
    }

    /// Map a body read/parse error to a normalized failure kind
    fn classify_body_error(error: &reqwest::Error) -> ErrorKind {
        if error.is_timeout() {
            ErrorKind::Timeout
        } else if error.is_decode() {
            ErrorKind::Malformed
        } else {
            ErrorKind::Transport
        }
    }
}

impl PlatformExecutor for HttpExecutor {
    #[instrument(
        name = "executor_execute",
        skip(self, config, operation),
        fields(platform = %config.id, endpoint = %operation.endpoint, method = %operation.method)
    )]
    async fn execute(&self, config: &PlatformConfig, operation: &Operation) -> Outcome {
        let request = self.build_request(config, operation);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let kind = Self::classify_send_error(&e);
                warn!(platform = %config.id, error = %e, kind = %kind, "Request failed");
                return Outcome::failure(config.id.clone(), kind, e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(
                platform = %config.id,
                status = status.as_u16(),
                "Platform returned error status"
            );
            return Outcome::failure(
                config.id.clone(),
                ErrorKind::HttpStatus(status.as_u16()),
                message,
            );
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => {
                debug!(platform = %config.id, endpoint = %operation.endpoint, "Request succeeded");
                Outcome::success(config.id.clone(), body)
            }
            Err(e) => {
                let kind = Self::classify_body_error(&e);
                warn!(platform = %config.id, error = %e, kind = %kind, "Response body unusable");
                Outcome::failure(config.id.clone(), kind, e.to_string())
            }
        }
    }
}
