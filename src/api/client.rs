//! HTTP implementation of [`GreetBackend`] over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::backend::{GreetBackend, GreetError};
use super::types::{GreetRequest, GreetResponse};

/// Longest error body kept for display. Backends in debug mode send whole
/// HTML tracebacks.
const MAX_ERROR_BODY: usize = 200;

pub struct HttpGreetBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpGreetBackend {
    /// Builds a client for `endpoint`. `timeout` of `None` lets a request
    /// stay pending for as long as the peer keeps the connection open.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, GreetError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GreetError::Config(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl GreetBackend for HttpGreetBackend {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn greet(&self, topic: &str) -> Result<GreetResponse, GreetError> {
        let body = GreetRequest {
            topic: topic.to_string(),
        };

        info!("POST {} (topic_len={})", self.endpoint, topic.len());

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| GreetError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Backend response status: {}", status);

        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            warn!("Backend error: {} - {}", status, err_body);
            return Err(GreetError::Status {
                status: status.as_u16(),
                body: truncate(err_body.trim(), MAX_ERROR_BODY),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GreetError::Network(e.to_string()))?;
        debug!("Backend body: {} bytes", bytes.len());

        serde_json::from_slice::<GreetResponse>(&bytes).map_err(|e| {
            warn!("Failed to decode backend reply: {}", e);
            GreetError::Decode(e.to_string())
        })
    }
}

/// Cuts `text` to at most `max` chars, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
