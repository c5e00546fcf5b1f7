// src/api/parser.rs
//! Turns raw HTTP responses into payloads or classified errors.
//!
//! Status handling happens first (401/403/404 and other non-success codes),
//! then the `{ code, msg, data }` envelope is checked, and only then is
//! `data` decoded into the caller's type.

use super::client::ApiResponse;
use super::responses::ApiEnvelope;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::AppError;
use reqwest::StatusCode;
use serde_json::Value;

/// Parses a response into its `data` payload.
///
/// A missing `data` field reads as an empty object.
pub fn parse_api_response(result: ApiResponse<String>) -> Result<Value, AppError> {
    if !result.status.is_success() {
        return Err(classify_http_failure(&result));
    }

    let envelope: ApiEnvelope = serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        AppError::MalformedResponse(format!(
            "{} (body: {})",
            e,
            preview_body(&result.data)
        ))
    })?;

    check_envelope(envelope)
}

/// Checks the envelope's `code` and extracts `data`.
pub fn check_envelope(envelope: ApiEnvelope) -> Result<Value, AppError> {
    match envelope.code {
        Some(0) => Ok(envelope
            .data
            .unwrap_or_else(|| Value::Object(Default::default()))),
        Some(code) => Err(AppError::from_envelope(code, envelope.msg)),
        None => Err(AppError::MalformedResponse(
            "response envelope has no 'code' field".to_string(),
        )),
    }
}

/// Decodes an envelope's `data` into a typed payload.
pub fn decode_data<T>(data: Value, endpoint: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(data).map_err(|e| {
        log::error!("Unexpected payload shape from {}: {}", endpoint, e);
        AppError::MalformedResponse(format!("{}: {}", endpoint, e))
    })
}

/// Maps a non-success HTTP status onto the error taxonomy.
fn classify_http_failure(result: &ApiResponse<String>) -> AppError {
    let endpoint = result.url.clone();
    match result.status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized { endpoint },
        StatusCode::FORBIDDEN => AppError::Forbidden { endpoint },
        StatusCode::NOT_FOUND => AppError::NotFound { endpoint },
        status => {
            // 400s often still carry a proper envelope with a useful message
            if let Ok(ApiEnvelope {
                code: Some(code),
                msg,
                ..
            }) = serde_json::from_str::<ApiEnvelope>(&result.data)
            {
                if code != 0 {
                    return AppError::from_envelope(code, msg);
                }
            }
            AppError::HttpStatus { status, endpoint }
        }
    }
}

fn preview_body(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
