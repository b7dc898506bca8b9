//! Thin client for the dashboard's chat assistant endpoint.
//!
//! Fully isolated from the KPI core: no engine data flows through it, and
//! the whole module sits behind the `chatbot` feature.

use crate::error::{RcmEngineError, Result};
use reqwest::Client;
use serde_json::json;

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Send one user message and return the assistant's reply text.
    pub async fn send(&self, message: &str) -> Result<String> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "message": message }))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let error_text = res.text().await.unwrap_or_default();
            return Err(RcmEngineError::ChatService(format!(
                "request failed (status {}): {}",
                status, error_text
            )));
        }

        let body: serde_json::Value = res.json().await?;
        body.get("response")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                RcmEngineError::ChatService("response missing 'response' field".to_string())
            })
    }
}
