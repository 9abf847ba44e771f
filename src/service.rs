use crate::models::{ConsultationOutcome, ConsultationRequest};
use crate::openai::{CompletionBackend, CompletionError};
use crate::persona::Persona;
use crate::prompt::build_prompt;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const EMPTY_INPUT_WARNING: &str = "相談内容を入力してください。";

pub struct ConsultationService {
    backend: Arc<dyn CompletionBackend>,
}

impl ConsultationService {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Sends `user_input` to the model framed by the persona's system message.
    /// One outbound call, no retry.
    pub async fn get_expert_response(
        &self,
        user_input: &str,
        persona: Persona,
    ) -> Result<String, CompletionError> {
        let prompt = build_prompt(persona, user_input);
        self.backend.complete(&prompt).await
    }

    pub async fn consult(&self, request: &ConsultationRequest) -> ConsultationOutcome {
        let persona = request.persona;

        if request.input.trim().is_empty() {
            warn!("Empty consultation for {}, skipping model call", persona.label());
            return ConsultationOutcome::Warning {
                message: EMPTY_INPUT_WARNING.to_string(),
            };
        }

        info!(
            "Consulting {} ({} chars of input)",
            persona.label(),
            request.input.chars().count()
        );

        match self.get_expert_response(&request.input, persona).await {
            Ok(text) => {
                info!("{} answered ({} chars)", persona.label(), text.chars().count());
                ConsultationOutcome::Answer { persona, text }
            }
            Err(e) => {
                error!("Completion failed for {}: {}", persona.label(), e);
                ConsultationOutcome::Failed {
                    persona,
                    detail: e.to_string(),
                }
            }
        }
    }
}
