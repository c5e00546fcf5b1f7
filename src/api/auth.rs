// src/api/auth.rs
//! Tenant access token acquisition.
//!
//! The token is requested on first use and reused for as long as the
//! session value lives. There is no refresh: a process that outlives the
//! token's lifetime (two hours by default) has to be restarted.

use super::client::request_builder;
use super::responses::TenantTokenResponse;
use super::types::ApiRequest;
use crate::constants::{AUTH_REQUEST_TIMEOUT, TENANT_TOKEN_ENDPOINT};
use crate::error::AppError;
use crate::types::{AppCredentials, ValidatedUrl};
use reqwest::Client;
use tokio::sync::OnceCell;

/// App credentials plus the memoized tenant access token.
pub struct TenantSession {
    credentials: AppCredentials,
    access_token: OnceCell<String>,
}

impl TenantSession {
    pub fn new(credentials: AppCredentials) -> Self {
        Self {
            credentials,
            access_token: OnceCell::new(),
        }
    }

    /// Returns the tenant access token, exchanging credentials on first use.
    pub async fn access_token(
        &self,
        client: &Client,
        base_url: &ValidatedUrl,
    ) -> Result<&str, AppError> {
        let token = self
            .access_token
            .get_or_try_init(|| self.request_token(client, base_url))
            .await?;
        Ok(token.as_str())
    }

    async fn request_token(
        &self,
        client: &Client,
        base_url: &ValidatedUrl,
    ) -> Result<String, AppError> {
        log::debug!(
            "Requesting tenant access token for app {}",
            self.credentials.app_id
        );

        let request = ApiRequest::post(
            TENANT_TOKEN_ENDPOINT,
            serde_json::json!({
                "app_id": self.credentials.app_id.as_str(),
                "app_secret": self.credentials.app_secret.as_str(),
            }),
        );

        let response = request_builder(client, base_url, &request)
            .timeout(AUTH_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout {
                        endpoint: request.path.clone(),
                    }
                } else {
                    AppError::AuthenticationFailed(format!("token request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::AuthenticationFailed(format!(
                "token endpoint answered HTTP {}",
                status
            )));
        }

        let text = response.text().await?;
        let parsed: TenantTokenResponse = serde_json::from_str(&text)?;
        let token = accept_token_response(parsed)?;
        log::info!("Obtained tenant access token");
        Ok(token)
    }
}

/// Validates the exchange response and extracts the token.
fn accept_token_response(response: TenantTokenResponse) -> Result<String, AppError> {
    match response.code {
        Some(0) => {}
        Some(code) => {
            return Err(AppError::AuthenticationFailed(format!(
                "{} (code {})",
                if response.msg.is_empty() {
                    "Unknown error"
                } else {
                    response.msg.as_str()
                },
                code
            )))
        }
        None => {
            return Err(AppError::AuthenticationFailed(
                "token response has no 'code' field".to_string(),
            ))
        }
    }

    if let Some(expire) = response.expire {
        let expires_at = chrono::Utc::now() + chrono::Duration::seconds(expire);
        log::debug!("Tenant access token valid until {}", expires_at.to_rfc3339());
    }

    response
        .tenant_access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::AuthenticationFailed("token response carries no token".to_string())
        })
}
