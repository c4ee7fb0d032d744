//! OpenAI-backed card provider.
//!
//! Calls the chat completions endpoint with `response_format:
//! json_object` and parses the returned message content into a
//! `CardBatch`. Timing is logged at INFO, token usage at DEBUG.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use super::provider::{CardProvider, ProviderError, Result};
use super::CardBatch;
use crate::config::OpenAiConfig;

pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, config: &OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            client,
        }
    }
}

#[async_trait::async_trait]
impl CardProvider for OpenAiProvider {
    async fn generate_batch(&self, prompt: &str) -> Result<CardBatch> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.temperature,
            "max_tokens": self.max_output_tokens,
            "response_format": { "type": "json_object" },
        });

        let start = std::time::Instant::now();
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let json: serde_json::Value = resp.json().await?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::InvalidResponse("Missing message content in response".to_string())
            })?;

        let batch: CardBatch = serde_json::from_str(content).map_err(|e| {
            ProviderError::InvalidResponse(format!("Could not parse card batch: {e}"))
        })?;

        if let Some(usage) = json["usage"].as_object() {
            debug!(
                "GEN tokenUsage input={} output={} total={}",
                usage.get("prompt_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
                usage.get("completion_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
                usage.get("total_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
            );
        }

        info!("GEN done durationMs={}", start.elapsed().as_millis());

        Ok(batch)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
