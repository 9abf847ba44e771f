use crate::config::Config;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("request to the completion endpoint failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion response could not be decoded: {0}")]
    Decode(reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("completion response had no message content")]
    EmptyResponse,
}

/// Anything that can turn a prompt into one completion.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, CompletionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.openai_api_key.clone(),
            endpoint: format!("{}/chat/completions", config.openai_base_url),
            model: config.openai_model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        if self.api_key.is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: false,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res
                .text()
                .await
                .unwrap_or_else(|e| format!("<body unreadable: {}>", e));
            return Err(CompletionError::Api { status, body });
        }

        let body: ChatCompletionResponse = res.json().await.map_err(CompletionError::Decode)?;
        extract_content(body)
    }
}

fn extract_content(body: ChatCompletionResponse) -> Result<String, CompletionError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}
