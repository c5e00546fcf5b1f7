// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system. The
//! variants follow the platform's own split: the transport failed, the HTTP
//! layer refused, or the open API answered with a non-zero `code`.

use std::fmt;
use thiserror::Error;

/// Open-API status codes as a typed vocabulary.
///
/// The platform reports failures as a numeric `code` plus a `msg` inside an
/// HTTP 200 envelope. Only the codes that change how a failure reads are
/// named here; everything else is kept verbatim in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeishuErrorCode {
    /// Request frequency limit hit
    RateLimited,
    /// Tenant access token missing, malformed or expired
    InvalidAccessToken,
    /// The app lacks a scope this endpoint requires
    MissingScope,
    /// The app has no permission on this particular resource
    PermissionDenied,
    /// The token does not name an existing resource
    ResourceNotFound,
    /// A code this client doesn't recognize
    Other(i64),
}

impl FeishuErrorCode {
    /// Classify a numeric `code` from a response envelope.
    pub fn from_code(code: i64) -> Self {
        match code {
            99991400 => Self::RateLimited,
            99991661 | 99991663 | 99991664 | 99991665 => Self::InvalidAccessToken,
            99991672 | 99991679 => Self::MissingScope,
            1770032 | 131006 | 91403 | 1254302 => Self::PermissionDenied,
            1770002 | 131005 | 1254040 | 1254043 | 91402 => Self::ResourceNotFound,
            other => Self::Other(other),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound)
    }

    /// Whether the failure is about who is asking rather than what was asked for.
    pub fn is_auth_related(&self) -> bool {
        matches!(
            self,
            Self::InvalidAccessToken | Self::MissingScope | Self::PermissionDenied
        )
    }
}

impl fmt::Display for FeishuErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::InvalidAccessToken => write!(f, "invalid_access_token"),
            Self::MissingScope => write!(f, "missing_scope"),
            Self::PermissionDenied => write!(f, "permission_denied"),
            Self::ResourceNotFound => write!(f, "resource_not_found"),
            Self::Other(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Request timed out: {endpoint}")]
    Timeout { endpoint: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Credentials rejected (HTTP 401) for {endpoint}; check app_id and app_secret")]
    Unauthorized { endpoint: String },

    #[error("Insufficient permission (HTTP 403) for {endpoint}; check the app's scopes")]
    Forbidden { endpoint: String },

    #[error("Resource not found (HTTP 404): {endpoint}")]
    NotFound { endpoint: String },

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus {
        status: reqwest::StatusCode,
        endpoint: String,
    },

    #[error("Feishu API returned an error ({code}): {message}")]
    FeishuService {
        code: FeishuErrorCode,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Builds the application error for a non-zero envelope `code`.
    pub fn from_envelope(code: i64, message: impl Into<String>) -> Self {
        AppError::FeishuService {
            code: FeishuErrorCode::from_code(code),
            message: message.into(),
        }
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            AppError::NotFound { .. } => true,
            AppError::FeishuService { code, .. } => code.is_not_found(),
            _ => false,
        }
    }

    /// Whether fixing credentials or app scopes is the likely remedy.
    pub fn is_auth_related(&self) -> bool {
        match self {
            AppError::AuthenticationFailed(_)
            | AppError::Unauthorized { .. }
            | AppError::Forbidden { .. } => true,
            AppError::FeishuService { code, .. } => code.is_auth_related(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}
