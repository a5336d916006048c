//! Cohere transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, Response, StatusCode};

use crate::{ProviderError, ProviderFuture, SecretString};

use super::serde_api::{CohereApiResponse, build_api_request, extract_error_message};
use super::types::{CohereRequest, CohereResponse};

pub const COHERE_BASE_URL: &str = "https://api.cohere.ai/v1";

pub trait CohereTransport: Send + Sync + std::fmt::Debug {
    fn chat<'a>(
        &'a self,
        request: CohereRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<CohereResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct CohereHttpTransport {
    client: Client,
    base_url: String,
}

impl CohereHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: COHERE_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("Cohere request failed with status {status}"));

        error_for_status(status, message)
    }
}

pub(crate) fn error_for_status(status: StatusCode, message: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::authentication(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::timeout(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            ProviderError::unavailable(message)
        }
        _ => ProviderError::transport(message),
    }
}

impl CohereTransport for CohereHttpTransport {
    fn chat<'a>(
        &'a self,
        request: CohereRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<CohereResponse, ProviderError>> {
        Box::pin(async move {
            let api_request = build_api_request(request)?;
            let url = self.endpoint("chat");
            let response = self
                .client
                .post(url)
                .bearer_auth(api_key.expose())
                .header("Accept", "application/json")
                .json(&api_request)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        ProviderError::timeout(err.to_string())
                    } else {
                        ProviderError::transport(err.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed: CohereApiResponse = response
                .json()
                .await
                .map_err(|err| ProviderError::invalid_response(err.to_string()))?;

            CohereResponse::try_from(parsed)
        })
    }
}
