//! Async HTTP client for the decision service
//!
//! Targets a llama.cpp-style completion endpoint: one POST per decision
//! round, non-streaming, with a hard timeout. The simulation never waits on
//! this client; the oracle layer runs it as a fire-and-forget task.

use crate::core::error::{Result, SimError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_URL: &str = "http://127.0.0.1:8080/completion";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Output budget for one decision round; the reply is a small JSON object
const N_PREDICT: u32 = 120;
/// Low temperature keeps goal strings inside the known vocabulary
const TEMPERATURE: f32 = 0.25;
const STOP_SEQUENCE: &str = "<|im_end|>";

/// Async client for the external decision service
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    url: String,
}

impl CompletionClient {
    /// Create a client with an explicit endpoint and request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SimError::OracleError(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a client from environment variables
    ///
    /// Optional: VIVARIUM_ORACLE_URL (defaults to a local llama.cpp server)
    /// Optional: VIVARIUM_ORACLE_TIMEOUT_SECS (defaults to 60)
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("VIVARIUM_ORACLE_URL").unwrap_or_else(|_| DEFAULT_URL.into());
        let timeout_secs = std::env::var("VIVARIUM_ORACLE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(url, Duration::from_secs(timeout_secs))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one completion request and return the raw response text
    ///
    /// A non-success status is a transport error; so are timeouts and
    /// connection failures.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest {
            prompt: format!(
                "<|im_start|>system\n{}<|im_end|>\n<|im_start|>assistant\n",
                prompt
            ),
            n_predict: N_PREDICT,
            temperature: TEMPERATURE,
            stop: vec![STOP_SEQUENCE],
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SimError::OracleError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SimError::OracleError(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| SimError::OracleError(e.to_string()))?;

        Ok(completion.content)
    }
}

#[derive(Serialize)]
struct CompletionRequest {
    prompt: String,
    n_predict: u32,
    temperature: f32,
    stop: Vec<&'static str>,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client =
            CompletionClient::new("http://localhost:9999/completion", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.url(), "http://localhost:9999/completion");
    }

    #[test]
    fn test_from_env_uses_default_url() {
        if std::env::var("VIVARIUM_ORACLE_URL").is_err() {
            let client = CompletionClient::from_env().unwrap();
            assert_eq!(client.url(), DEFAULT_URL);
        }
    }

    #[test]
    fn test_request_body_shape() {
        let request = CompletionRequest {
            prompt: "p".into(),
            n_predict: N_PREDICT,
            temperature: TEMPERATURE,
            stop: vec![STOP_SEQUENCE],
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["n_predict"], 120);
        assert_eq!(json["stream"], false);
        assert_eq!(json["stop"][0], "<|im_end|>");
    }
}
