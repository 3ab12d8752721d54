use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;

/// Header carrying the client-persisted session identifier.
pub const SESSION_HEADER: &str = "x-session-id";
const MAX_SESSION_ID_CHARS: usize = 128;

/// Opaque identifier scoping which personas a browser session may see.
///
/// Extracted from the `x-session-id` header. Routes where a session is only
/// needed for some requests take [`MaybeSession`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::SessionRequired);
        }
        let well_formed = value.chars().count() <= MAX_SESSION_ID_CHARS
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !well_formed {
            return Err(AppError::Validation(format!(
                "{SESSION_HEADER} must be 1-{MAX_SESSION_ID_CHARS} characters of [A-Za-z0-9_-]"
            )));
        }
        Ok(SessionId(value.to_string()))
    }
}

/// An optional session: a missing or blank header is `None`, a malformed one
/// is still rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaybeSession(pub Option<SessionId>);

fn session_header(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get(SESSION_HEADER) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| AppError::Validation(format!("{SESSION_HEADER} must be ASCII")))?;
    Ok(Some(value))
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = session_header(parts)?.ok_or(AppError::SessionRequired)?;
        SessionId::parse(value)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match session_header(parts)? {
            Some(value) if !value.trim().is_empty() => {
                Ok(MaybeSession(Some(SessionId::parse(value)?)))
            }
            _ => Ok(MaybeSession(None)),
        }
    }
}
