//! Blocking client for OpenAI-compatible chat-completions endpoints.

use crate::llm::Generator;
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const TEMPERATURE: f32 = 0.2;

/// Endpoint configuration, usually resolved from config + environment.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl OpenAiSettings {
    /// Resolve settings from the environment, with config-provided fallbacks.
    pub fn from_env(model: Option<&str>, base_url: Option<&str>) -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .ok()
                .or_else(|| base_url.map(str::to_string))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("OPENAI_MODEL")
                .ok()
                .or_else(|| model.map(str::to_string))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub struct OpenAiGenerator {
    settings: OpenAiSettings,
    http: reqwest::blocking::Client,
}

impl OpenAiGenerator {
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        if settings.api_key.is_none() {
            bail!("OPENAI_API_KEY not set (or set MOCK_LLM=1 for an offline run)");
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed building HTTP client for generator endpoint")?;
        Ok(Self { settings, http })
    }

    fn chat_completions_url(&self) -> String {
        let endpoint = self.settings.base_url.trim().trim_end_matches('/');
        if endpoint.ends_with("/chat/completions") {
            endpoint.to_string()
        } else if endpoint.ends_with("/v1") {
            format!("{endpoint}/chat/completions")
        } else {
            format!("{endpoint}/v1/chat/completions")
        }
    }
}

impl Generator for OpenAiGenerator {
    fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let payload = ChatCompletionsRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
        };

        let mut request = self.http.post(self.chat_completions_url()).json(&payload);
        if let Some(api_key) = self.settings.api_key.as_deref() {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().with_context(|| {
            format!("Generator request failed (model={})", self.settings.model)
        })?;

        let status = response.status();
        let body = response
            .text()
            .context("Failed reading generator response body")?;
        if !status.is_success() {
            bail!(
                "Generator endpoint returned HTTP {status}: {}",
                truncate_for_error(&body)
            );
        }

        let parsed: ChatCompletionsResponse = serde_json::from_str(&body).with_context(|| {
            format!("Invalid JSON from generator endpoint: {}", truncate_for_error(&body))
        })?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Generator response had no choices"))?;
        Ok(choice.message.content.unwrap_or_default())
    }
}

fn truncate_for_error(value: &str) -> String {
    const LIMIT: usize = 400;
    if value.len() <= LIMIT {
        value.to_string()
    } else {
        let cut = value
            .char_indices()
            .take_while(|(i, _)| *i <= LIMIT)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        format!("{}...", &value[..cut])
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
