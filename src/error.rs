//! Unified application error model and the message-extraction helper used to
//! turn REST error payloads into something a user can read.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Shown when an error payload carries nothing usable.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Auth { code: String, message: String },
    Forbidden { code: String, message: String },
    Config { code: String, message: String },
    Network { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Auth { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::Config { code, .. }
            | AppError::Network { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Auth { message, .. }
            | AppError::Forbidden { message, .. }
            | AppError::Config { message, .. }
            | AppError::Network { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn user<S: Into<String>>(code: S, msg: S) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn not_found<S: Into<String>>(code: S, msg: S) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn conflict<S: Into<String>>(code: S, msg: S) -> Self { AppError::Conflict { code: code.into(), message: msg.into() } }
    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn forbidden<S: Into<String>>(code: S, msg: S) -> Self { AppError::Forbidden { code: code.into(), message: msg.into() } }
    pub fn config<S: Into<String>>(code: S, msg: S) -> Self { AppError::Config { code: code.into(), message: msg.into() } }
    pub fn network<S: Into<String>>(code: S, msg: S) -> Self { AppError::Network { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Map to HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::UserInput { .. } => 400,
            AppError::NotFound { .. } => 404,
            AppError::Conflict { .. } => 409,
            AppError::Auth { .. } => 401,
            AppError::Forbidden { .. } => 403,
            AppError::Config { .. } => 500,
            AppError::Network { .. } => 503,
            AppError::Internal { .. } => 500,
        }
    }

    /// Build an error from a failed REST response. The message is extracted
    /// with [`error_message`]; the variant follows the status code.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = error_message(body);
        let code = body
            .get("code")
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("http_{}", status));
        match status {
            400 | 422 => AppError::UserInput { code, message },
            401 => AppError::Auth { code, message },
            403 => AppError::Forbidden { code, message },
            404 => AppError::NotFound { code, message },
            409 => AppError::Conflict { code, message },
            502..=504 => AppError::Network { code, message },
            _ => AppError::Internal { code, message },
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

fn structured_message(body: &Value) -> Option<String> {
    let direct = body.get("message").and_then(|m| m.as_str()).and_then(non_blank);
    direct
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .and_then(non_blank)
        })
        .or_else(|| {
            body.get("errors")
                .and_then(|e| e.as_array())
                .and_then(|arr| arr.first())
                .and_then(|first| match first {
                    Value::String(s) => non_blank(s),
                    other => other.get("message").and_then(|m| m.as_str()).and_then(non_blank),
                })
        })
}

fn raw_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) => non_blank(s),
        _ => body.get("error").and_then(|e| e.as_str()).and_then(non_blank),
    }
}

/// Human-readable message for an error payload: a structured `message` field
/// first, then a raw string error, then [`DEFAULT_ERROR_MESSAGE`].
pub fn error_message(body: &Value) -> String {
    error_message_or(body, DEFAULT_ERROR_MESSAGE)
}

/// Same as [`error_message`] with a caller-supplied default.
pub fn error_message_or(body: &Value, default: &str) -> String {
    structured_message(body)
        .or_else(|| raw_message(body))
        .unwrap_or_else(|| default.to_string())
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal { code: "internal_error".into(), message: err.to_string() }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::UserInput { code: "invalid_json".into(), message: err.to_string() }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config { code: "config_error".into(), message: err.to_string() }
    }
}

impl From<crate::identity::IdentityError> for AppError {
    fn from(err: crate::identity::IdentityError) -> Self {
        AppError::UserInput { code: "invalid_identity".into(), message: err.to_string() }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
