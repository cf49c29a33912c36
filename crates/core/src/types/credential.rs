//! Opaque session credential returned by the login endpoint.

use secrecy::{ExposeSecret, SecretString};

/// Bearer token identifying an authenticated session.
///
/// The token is held in memory for the lifetime of the process and is never
/// persisted. Implements `Debug` manually so the token cannot leak into logs.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the raw token, e.g. to build an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expose_returns_raw_token() {
        let token = SessionToken::new("tok123");
        assert_eq!(token.expose(), "tok123");
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = SessionToken::new("super-secret-token");
        let debug_output = format!("{token:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-token"));
    }
}
