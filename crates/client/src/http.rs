//! reqwest-backed `LoanBackend`

use async_trait::async_trait;
use loan_chat_config::constants::paths;
use loan_chat_config::ApiSettings;
use loan_chat_core::{
    ApiError, ApplicationRecord, HealthStatus, LoanBackend, LoanChatRequest, LoanChatResponse,
    Result,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::paths::EndpointResolver;

const UNAVAILABLE: &str = "Backend service is not available";

/// HTTP client for the loan advisor backend
#[derive(Debug, Clone)]
pub struct LoanApiClient {
    http: Client,
    resolver: EndpointResolver,
}

impl LoanApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .connect_timeout(settings.connect_timeout())
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            resolver: EndpointResolver::new(
                &settings.base_url,
                &settings.prefix,
                settings.include_api_variant,
            ),
        })
    }

    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// POST JSON to one endpoint
    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.resolver.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(detail_error(response, endpoint).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("{} (endpoint: {})", e, endpoint)))
    }

    /// Try each endpoint; only a not-found failure moves on to the next one
    async fn post_with_fallback<B, T>(&self, endpoints: &[String], body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut errors = Vec::new();
        for endpoint in endpoints {
            match self.post_json(endpoint, body).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_not_found() => {
                    tracing::debug!(endpoint = %endpoint, error = %e, "Endpoint not found, trying next variant");
                    errors.push(e.to_string());
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "Backend request failed");
                    return Err(e);
                }
            }
        }
        Err(ApiError::AllEndpointsFailed(errors))
    }

    /// GET the first endpoint that answers with success
    ///
    /// Stops at the first failure that is not a not-found.
    async fn get_with_fallback(&self, endpoints: &[String]) -> Result<Response> {
        let mut errors = Vec::new();
        for endpoint in endpoints {
            let response = self
                .http
                .get(self.resolver.url(endpoint))
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            if response.status().is_success() {
                tracing::debug!(endpoint = %endpoint, "GET succeeded");
                return Ok(response);
            }

            let error = text_error(response, endpoint).await;
            let not_found = error.is_not_found();
            errors.push(error.to_string());
            if !not_found {
                break;
            }
        }
        Err(ApiError::AllEndpointsFailed(errors))
    }
}

#[async_trait]
impl LoanBackend for LoanApiClient {
    async fn loan_chat(&self, request: &LoanChatRequest) -> Result<LoanChatResponse> {
        let endpoints = self.resolver.variants(paths::CHAT);
        tracing::debug!(
            customer_id = %request.customer_id,
            application_id = ?request.application_id,
            variants = endpoints.len(),
            "Sending loan chat message"
        );
        self.post_with_fallback(&endpoints, request).await
    }

    async fn get_application(&self, application_id: &str) -> Result<ApplicationRecord> {
        let path = format!("{}/{}", paths::APPLICATION, application_id);
        let response = self.get_with_fallback(&self.resolver.variants(&path)).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_sanction_letter(&self, application_id: &str) -> Result<Vec<u8>> {
        let path = format!("{}/{}", paths::SANCTION_LETTER, application_id);
        let response = self.get_with_fallback(&self.resolver.variants(&path)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        let result = match self.get_with_fallback(&self.resolver.variants(paths::HEALTH)).await {
            Ok(response) => response
                .json::<HealthStatus>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string())),
            Err(e) => Err(e),
        };
        result.map_err(|e| {
            tracing::debug!(error = %e, "Health check failed");
            ApiError::Unavailable(UNAVAILABLE.to_string())
        })
    }
}

fn status_summary(status: StatusCode, endpoint: &str) -> String {
    format!(
        "HTTP {}: {} (endpoint: {})",
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        endpoint
    )
}

/// Error for a failed POST: JSON `detail`, else raw body, else a status summary
///
/// A JSON body without `detail` falls through to the summary.
async fn detail_error(response: Response, endpoint: &str) -> ApiError {
    let status = response.status();
    let raw = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(json) => match json.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        },
        Err(_) => raw,
    };
    let message = if detail.is_empty() {
        status_summary(status, endpoint)
    } else {
        detail
    };
    ApiError::Http {
        status: status.as_u16(),
        message,
    }
}

/// Error for a failed GET: raw body, else a status summary
async fn text_error(response: Response, endpoint: &str) -> ApiError {
    let status = response.status();
    let raw = response.text().await.unwrap_or_default();
    let message = if raw.is_empty() {
        status_summary(status, endpoint)
    } else {
        raw
    };
    ApiError::Http {
        status: status.as_u16(),
        message,
    }
}
