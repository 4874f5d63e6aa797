use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::prompt_generator::PromptGenerator;
use crate::config::AnthropicConfig;
use crate::models::{GeneratedPrompt, PromptRequest};
use crate::security::Credential;
use crate::utils::error::ApiError;
use crate::utils::limiters::Limiters;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    model: Option<String>,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic Messages API client
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
    system_prompt: String,
    limiters: Arc<Limiters>,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig, system_prompt: String, limiters: Arc<Limiters>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
            system_prompt,
            limiters,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PromptGenerator for AnthropicClient {
    async fn generate(
        &self,
        credential: &Credential,
        request: &PromptRequest,
    ) -> Result<GeneratedPrompt, ApiError> {
        let (_permit, waited) = Limiters::acquire_timed(
            self.limiters.llm_generate.clone(),
            self.limiters.acquire_timeout,
            "anthropic_generate",
        )
        .await
        .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))?;

        debug!(
            "Calling Anthropic model {} (waited {:?} for a slot)",
            self.config.model, waited
        );

        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: &self.system_prompt,
            messages: vec![Message {
                role: "user",
                content: request.to_user_message(),
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", credential.expose())
            .header("anthropic-version", &self.config.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::LlmError(format!("Failed to call Anthropic API: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("Anthropic rejected the supplied API key ({})", status);
            return Err(ApiError::Unauthorized(format!(
                "Anthropic API returned {}",
                status
            )));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::LlmError(format!(
                "Anthropic API error: {} - {}",
                status, text
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ApiError::LlmError(format!("Failed to parse Anthropic response: {}", e)))?;

        let text = parsed
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(ApiError::LlmError(
                "Anthropic returned no text content".to_string(),
            ));
        }

        let model = parsed.model.unwrap_or_else(|| self.config.model.clone());
        Ok(GeneratedPrompt::new(text, model))
    }
}
