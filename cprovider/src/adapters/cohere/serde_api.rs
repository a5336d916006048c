//! Cohere `/chat` HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};

use crate::ProviderError;

use super::types::{
    CohereFinishReason, CohereHistoryEntry, CohereRequest, CohereResponse, CohereUsage,
};

/// NaN and infinite temperatures have no JSON form and fail here. Finite values
/// go out as given.
pub(crate) fn build_api_request(
    request: CohereRequest,
) -> Result<CohereApiRequest, ProviderError> {
    if let Some(temperature) = request.temperature.filter(|t| !t.is_finite()) {
        return Err(ProviderError::invalid_request(format!(
            "temperature {temperature} is not a finite number"
        )));
    }

    let chat_history = if request.chat_history.is_empty() {
        None
    } else {
        Some(
            request
                .chat_history
                .into_iter()
                .map(CohereApiHistoryEntry::from)
                .collect(),
        )
    };

    Ok(CohereApiRequest {
        message: request.message,
        model: request.model,
        chat_history,
        temperature: request.temperature,
    })
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> CohereFinishReason {
    match value {
        Some("COMPLETE") => CohereFinishReason::Complete,
        Some("MAX_TOKENS") => CohereFinishReason::MaxTokens,
        Some("USER_CANCEL") => CohereFinishReason::UserCancel,
        Some("ERROR") | Some("ERROR_TOXIC") | Some("ERROR_LIMIT") => CohereFinishReason::Error,
        _ => CohereFinishReason::Other,
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<CohereApiError>(body).ok()?;
    let message = parsed.message.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CohereApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CohereApiRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<Vec<CohereApiHistoryEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CohereApiHistoryEntry {
    pub role: &'static str,
    pub message: String,
}

impl From<CohereHistoryEntry> for CohereApiHistoryEntry {
    fn from(value: CohereHistoryEntry) -> Self {
        Self {
            role: value.role.as_str(),
            message: value.message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CohereApiResponse {
    pub text: Option<String>,
    pub generation_id: Option<String>,
    pub finish_reason: Option<String>,
    pub meta: Option<CohereApiMeta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CohereApiMeta {
    pub billed_units: Option<CohereApiBilledUnits>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CohereApiBilledUnits {
    pub input_tokens: Option<f64>,
    pub output_tokens: Option<f64>,
}

impl TryFrom<CohereApiResponse> for CohereResponse {
    type Error = ProviderError;

    fn try_from(value: CohereApiResponse) -> Result<Self, Self::Error> {
        let text = value.text.ok_or_else(|| {
            ProviderError::invalid_response("Cohere response did not include text")
        })?;

        let usage = value
            .meta
            .and_then(|meta| meta.billed_units)
            .map(|units| CohereUsage {
                input_tokens: units.input_tokens.unwrap_or_default() as u32,
                output_tokens: units.output_tokens.unwrap_or_default() as u32,
            })
            .unwrap_or_default();

        Ok(Self {
            text,
            generation_id: value.generation_id,
            finish_reason: parse_finish_reason(value.finish_reason.as_deref()),
            usage,
        })
    }
}
