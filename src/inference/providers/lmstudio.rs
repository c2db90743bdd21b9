//! LM Studio provider implementation using the Chat Completions API.
//!
//! LM Studio exposes an OpenAI-compatible `/v1/chat/completions` endpoint on
//! localhost with no auth, so question generation can run fully offline
//! against a local model.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

// ============================================================================
// LM Studio Chat Completions Types
// ============================================================================

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Serialize, Debug, Clone)]
struct ChatMessage {
    role: Role,
    content: String,
}

#[derive(Serialize, Debug)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionsResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// LM Studio provider (local inference server, no auth).
pub struct LmStudioProvider {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl LmStudioProvider {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        let env_url = std::env::var("LM_STUDIO_BASE_URL").ok();
        let final_url = base_url
            .or(env_url)
            .unwrap_or_else(|| "http://localhost:1234/v1".to_string());

        Self {
            base_url: final_url,
            timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionProvider for LmStudioProvider {
    fn name(&self) -> &str {
        "lmstudio"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let body = ChatCompletionsRequest {
            model: request.model.to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: request.system.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: request.user.to_string(),
                },
            ],
        };

        info!(
            "LM Studio chat completions request: model={}, user_len={}",
            request.model,
            request.user.len()
        );

        // No auth for local LM Studio
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        debug!("LM Studio response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("LM Studio API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let parsed: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::Parse("completion response had no content".to_string()))?;

        info!("LM Studio completion received: {} bytes", content.len());
        Ok(content)
    }
}
