//! HTTP client for the student-admin API.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::ClientError;
use crate::models::Student;
use crate::schema::{
    CreateStudentRequest, LoginRequest, RegisterRequest, TokenResponse, UserResponse,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Thin wrapper over `reqwest` that knows the routes and the error body.
/// Holds the session token, if any, and sends it as a bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let builder = self.http_client.request(method, &url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, ClientError> {
        let response = self
            .request(Method::POST, "/api/auth/register")
            .json(request)
            .send()
            .await?;
        handle_response(response).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let response = self
            .request(Method::POST, "/api/auth/login")
            .json(request)
            .send()
            .await?;
        handle_response(response).await
    }

    pub async fn me(&self) -> Result<UserResponse, ClientError> {
        let response = self.request(Method::GET, "/api/auth/me").send().await?;
        handle_response(response).await
    }

    pub async fn logout_all(&self) -> Result<(), ClientError> {
        let response = self
            .request(Method::POST, "/api/auth/logout-all")
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, ClientError> {
        let response = self.request(Method::GET, "/api/students").send().await?;
        handle_response(response).await
    }

    pub async fn create_student(
        &self,
        request: &CreateStudentRequest,
    ) -> Result<Student, ClientError> {
        let response = self
            .request(Method::POST, "/api/students")
            .json(request)
            .send()
            .await?;
        handle_response(response).await
    }
}

/// Turns a non-2xx response into `ClientError::Api` carrying the server's
/// `error` string.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    debug!("Response status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Transport(format!("Failed to decode response: {}", e)))
}
