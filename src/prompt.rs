use crate::models::ChatMessage;
use crate::persona::Persona;

/// System turn for the persona, then the user's text untouched.
pub fn build_prompt(persona: Persona, user_input: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(persona.system_message()),
        ChatMessage::user(user_input),
    ]
}
