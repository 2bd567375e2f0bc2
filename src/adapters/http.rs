use crate::config::toml_config::{DeliveryMode, EndpointConfig};
use crate::domain::model::LeadSubmission;
use crate::domain::ports::Transport;
use crate::utils::error::TransportError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// 以 HTTP POST 傳送 JSON payload
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    mode: DeliveryMode,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(config: &EndpointConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.url.clone(),
            mode: config.delivery_mode,
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, payload: &LeadSubmission) -> Result<(), TransportError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(payload);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::Unreachable {
                    message: e.to_string(),
                }
            } else {
                TransportError::Request(e)
            }
        })?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        match self.mode {
            DeliveryMode::Opaque => Ok(()),
            DeliveryMode::StatusAware if status.is_success() => Ok(()),
            DeliveryMode::StatusAware => Err(TransportError::Status {
                status: status.as_u16(),
            }),
        }
    }
}
