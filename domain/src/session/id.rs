//! Session token value object

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest caller-supplied token accepted
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Errors resolving a caller-supplied session token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session token is empty")]
    Empty,

    #[error("Session token exceeds {MAX_SESSION_ID_LEN} characters")]
    TooLong,

    #[error("Session token contains characters not allowed in a header: {0:?}")]
    InvalidCharacters(String),
}

/// Opaque session token (Value Object)
///
/// Tokens are either minted here (UUID v4) or supplied by the caller. A
/// supplied token must be printable ASCII so it can be echoed back in the
/// `X-Session-ID` response header unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh, unique token
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Validate a caller-supplied token
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(SessionError::Empty);
        }
        if token.len() > MAX_SESSION_ID_LEN {
            return Err(SessionError::TooLong);
        }
        if !token.chars().all(|c| c.is_ascii_graphic()) {
            return Err(SessionError::InvalidCharacters(token.to_string()));
        }
        Ok(Self(token.to_string()))
    }

    /// Use the supplied token when it is valid, otherwise mint one.
    ///
    /// Returns the effective token and the reason the supplied one was
    /// rejected, if any. Always completes, so callers can build responses
    /// (including error responses) with a token in hand.
    pub fn resolve(raw: Option<&str>) -> (Self, Option<SessionError>) {
        match raw {
            None => (Self::mint(), None),
            Some(raw) => match Self::parse(raw) {
                Ok(id) => (id, None),
                Err(SessionError::Empty) => (Self::mint(), None),
                Err(e) => (Self::mint(), Some(e)),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
