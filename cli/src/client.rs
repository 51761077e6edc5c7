use crate::{config::SmokeConfig, error::SmokeError};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared_types::{LoginRequest, RegisterStudentRequest, SessionToken};
use std::time::Duration;
use tracing::debug;

/// Status and body of a response, read in full before any check logic runs
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SmokeError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Turn any status other than `expected` into [`SmokeError::Status`]
    pub fn expect_status(self, expected: StatusCode) -> Result<Self, SmokeError> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(SmokeError::status(self.status, self.body))
        }
    }
}

/// Thin HTTP client over the RotaFácil endpoints the smoke run touches.
///
/// Methods only fail on transport errors; status handling is left to the
/// checks.
pub struct ApiClient {
    base_url: String,
    api_prefix: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &SmokeConfig) -> Result<Self, SmokeError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_prefix: config.api_prefix.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<RawResponse, SmokeError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Received HTTP {} ({} bytes)", status, body.len());
        Ok(RawResponse { status, body })
    }

    pub async fn get_root(&self) -> Result<RawResponse, SmokeError> {
        let url = self.root_url();
        debug!("GET {}", url);
        self.execute(self.http_client.get(&url)).await
    }

    pub async fn register_student(
        &self,
        request: &RegisterStudentRequest,
    ) -> Result<RawResponse, SmokeError> {
        let url = self.endpoint("/auth/register/aluno");
        debug!("POST {} (email: {})", url, request.email);
        self.execute(self.http_client.post(&url).json(request)).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<RawResponse, SmokeError> {
        let url = self.endpoint("/auth/login");
        debug!("POST {} (email: {})", url, request.email);
        self.execute(self.http_client.post(&url).json(request)).await
    }

    pub async fn current_user(&self, token: &SessionToken) -> Result<RawResponse, SmokeError> {
        let url = self.endpoint("/auth/me");
        debug!("GET {} with bearer token", url);
        self.execute(self.http_client.get(&url).bearer_auth(token.as_str()))
            .await
    }

    pub async fn active_routes(&self) -> Result<RawResponse, SmokeError> {
        let url = self.endpoint("/rotas/ativas");
        debug!("GET {}", url);
        self.execute(self.http_client.get(&url)).await
    }
}
