//! Cohere adapter types and provider-agnostic conversion logic.

use crate::{ModelResponse, PromptMessage, ProviderId, Role, StopReason, TokenUsage};

#[derive(Debug, Clone, PartialEq)]
pub struct CohereRequest {
    pub model: Option<String>,
    pub message: String,
    pub chat_history: Vec<CohereHistoryEntry>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohereHistoryEntry {
    pub role: CohereRole,
    pub message: String,
}

impl From<PromptMessage> for CohereHistoryEntry {
    fn from(value: PromptMessage) -> Self {
        Self {
            role: value.role.into(),
            message: value.content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohereRole {
    System,
    User,
    Chatbot,
}

impl CohereRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::User => "USER",
            Self::Chatbot => "CHATBOT",
        }
    }
}

impl From<Role> for CohereRole {
    fn from(value: Role) -> Self {
        match value {
            Role::System => Self::System,
            Role::User => Self::User,
            Role::Assistant => Self::Chatbot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohereResponse {
    pub text: String,
    pub generation_id: Option<String>,
    pub finish_reason: CohereFinishReason,
    pub usage: CohereUsage,
}

impl CohereResponse {
    pub(crate) fn into_model_response(self) -> ModelResponse {
        ModelResponse {
            provider: ProviderId::Cohere,
            text: self.text,
            generation_id: self.generation_id,
            stop_reason: self.finish_reason.into(),
            usage: self.usage.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohereFinishReason {
    Complete,
    MaxTokens,
    UserCancel,
    Error,
    Other,
}

impl From<CohereFinishReason> for StopReason {
    fn from(value: CohereFinishReason) -> Self {
        match value {
            CohereFinishReason::Complete => Self::EndTurn,
            CohereFinishReason::MaxTokens => Self::MaxTokens,
            CohereFinishReason::UserCancel => Self::Cancelled,
            CohereFinishReason::Error => Self::Error,
            CohereFinishReason::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CohereUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl From<CohereUsage> for TokenUsage {
    fn from(value: CohereUsage) -> Self {
        Self {
            input_tokens: value.input_tokens,
            output_tokens: value.output_tokens,
        }
    }
}
