use crate::persona::Persona;
use serde::{Deserialize, Serialize};

// OpenAI Models
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub stream: bool,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

// Consultation Models
#[derive(Deserialize, Debug, Clone)]
pub struct ConsultationRequest {
    #[serde(default)]
    pub persona: Persona,
    #[serde(default)]
    pub input: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConsultationOutcome {
    Warning { message: String },
    Answer { persona: Persona, text: String },
    Failed { persona: Persona, detail: String },
}

#[derive(Serialize)]
pub struct PersonaInfo {
    pub label: &'static str,
    pub system_message: &'static str,
}
