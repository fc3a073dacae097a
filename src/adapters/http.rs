use crate::domain::model::{ApiErrorBody, LoginRequest, LoginResponse, RegistrationRequest};
use crate::domain::ports::{AuthApi, ConfigProvider};
use crate::utils::error::{AuthError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const PROFILE_PATH: &str = "/me";

pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| AuthError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.api_url(), config.request_timeout())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 非 2xx 回應: 從 body 取出 `detail`, 取不到就留空
    async fn error_from_response(response: Response) -> AuthError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message());

        tracing::debug!("API error response: status={}, body={}", status, body);
        AuthError::ApiError { status, detail }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn register(&self, request: &RegistrationRequest) -> Result<Value> {
        let url = self.endpoint(REGISTER_PATH);
        tracing::debug!("Making API request to: POST {} (email={})", url, request.email);

        let response = self.client.post(&url).json(request).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let url = self.endpoint(LOGIN_PATH);
        tracing::debug!("Making API request to: POST {} (email={})", url, request.email);

        let response = self.client.post(&url).json(request).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| AuthError::MalformedResponse {
            message: format!("login response: {}", e),
        })
    }

    async fn fetch_profile(&self, token: &str) -> Result<Value> {
        let url = self.endpoint(PROFILE_PATH);
        tracing::debug!("Making API request to: GET {}", url);

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| AuthError::MalformedResponse {
            message: format!("profile response: {}", e),
        })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
