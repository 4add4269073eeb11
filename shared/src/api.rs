//! Backend calls described as data.
//!
//! The browser transport only needs a method, a path and a body; everything
//! else about a call (which payload it carries, how its response is
//! classified and decoded) lives here so it can be exercised natively.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{CreateActionItemRequest, CreateNoteRequest, Credentials};

/// Characters left unescaped in form and query values.
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{body}")]
    RequestFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

impl ApiError {
    /// Message suitable for an alert. Uses the backend's `detail` field when
    /// the body carries one.
    pub fn detail(&self) -> String {
        match self {
            ApiError::RequestFailed { body, .. } => serde_json::from_str::<ErrorDetail>(body)
                .map(|e| e.detail)
                .unwrap_or_else(|_| body.clone()),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    Json(String),
    Form(String),
}

impl Body {
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Body::Empty => None,
            Body::Json(_) => Some("application/json"),
            Body::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Body::Empty => None,
            Body::Json(text) | Body::Form(text) => Some(text.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    CurrentUser,
    Login(Credentials),
    Register(Credentials),
    Logout,
    ListNotes { query: Option<String> },
    CreateNote(CreateNoteRequest),
    ListActionItems,
    CreateActionItem(CreateActionItemRequest),
    CompleteActionItem(i64),
}

impl ApiRequest {
    pub fn method(&self) -> Method {
        match self {
            ApiRequest::CurrentUser | ApiRequest::ListNotes { .. } | ApiRequest::ListActionItems => {
                Method::Get
            }
            ApiRequest::Login(_)
            | ApiRequest::Register(_)
            | ApiRequest::Logout
            | ApiRequest::CreateNote(_)
            | ApiRequest::CreateActionItem(_) => Method::Post,
            ApiRequest::CompleteActionItem(_) => Method::Put,
        }
    }

    pub fn path(&self) -> String {
        match self {
            ApiRequest::CurrentUser => "/auth/me".to_string(),
            ApiRequest::Login(_) => "/auth/login".to_string(),
            ApiRequest::Register(_) => "/auth/register".to_string(),
            ApiRequest::Logout => "/auth/logout".to_string(),
            ApiRequest::ListNotes { query: Some(q) } => {
                format!("/notes/search/?q={}", utf8_percent_encode(q, FORM_VALUE))
            }
            ApiRequest::ListNotes { query: None } | ApiRequest::CreateNote(_) => {
                "/notes/".to_string()
            }
            ApiRequest::ListActionItems | ApiRequest::CreateActionItem(_) => {
                "/action-items/".to_string()
            }
            ApiRequest::CompleteActionItem(id) => format!("/action-items/{}/complete", id),
        }
    }

    pub fn body(&self) -> Result<Body, ApiError> {
        let json = |value: serde_json::Result<String>| {
            value
                .map(Body::Json)
                .map_err(|e| ApiError::Serialization(e.to_string()))
        };

        match self {
            ApiRequest::Login(creds) => Ok(Body::Form(form_encode(&[
                ("username", creds.username.as_str()),
                ("password", creds.password.as_str()),
            ]))),
            ApiRequest::Register(creds) => json(serde_json::to_string(creds)),
            ApiRequest::CreateNote(note) => json(serde_json::to_string(note)),
            ApiRequest::CreateActionItem(item) => json(serde_json::to_string(item)),
            ApiRequest::CurrentUser
            | ApiRequest::Logout
            | ApiRequest::ListNotes { .. }
            | ApiRequest::ListActionItems
            | ApiRequest::CompleteActionItem(_) => Ok(Body::Empty),
        }
    }
}

fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, FORM_VALUE),
                utf8_percent_encode(value, FORM_VALUE)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Status and body text of a completed fetch, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn parse_response<T: DeserializeOwned>(response: RawResponse) -> Result<T, ApiError> {
    if response.status == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !response.is_success() {
        return Err(ApiError::RequestFailed {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Serialization(e.to_string()))
}
