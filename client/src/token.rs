//! Session token capability injected into the HTTP client.

use std::sync::{PoisonError, RwLock};

/// Supplies the bearer token for outgoing requests
pub trait TokenProvider: Send + Sync {
    /// Current token, `None` when logged out
    fn token(&self) -> Option<String>;
}

/// A fixed token, or none at all
#[derive(Clone, Debug, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Always supplies `token`
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// Never supplies a token
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// In-memory session holding the token issued at login.
///
/// `clear` is the invalidation hook used when the API answers 401.
#[derive(Debug, Default)]
pub struct InMemorySession {
    token: RwLock<Option<String>>,
}

impl InMemorySession {
    /// Creates a logged-out session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session holding `token`
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Stores a new token
    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Drops the token
    pub fn clear(&self) {
        let mut token = self.token.write().unwrap_or_else(PoisonError::into_inner);
        if token.take().is_some() {
            tracing::info!("Session token cleared");
        }
    }

    /// Returns true if a token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl TokenProvider for InMemorySession {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new("abc").token().as_deref(), Some("abc"));
        assert_eq!(StaticToken::none().token(), None);
    }

    #[test]
    fn test_in_memory_session_lifecycle() {
        let session = InMemorySession::new();
        assert!(!session.is_authenticated());

        session.set("jwt-1");
        assert_eq!(session.token().as_deref(), Some("jwt-1"));

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }
}
