//! Admin credential checking
//!
//! Every mutating request carries the admin password. Checking it is kept
//! behind [`CredentialCheck`] so the stores never see credentials.
//!
//! ## Usage
//! ```bash
//! ADMIN_PASSWORD=change-me artist-site-server
//!
//! curl -X POST http://localhost:3000/api/events \
//!   -H "Content-Type: application/json" \
//!   -d '{"password":"change-me","action":"check"}'
//! ```

use std::fmt;
use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};

/// Decides whether a request may mutate data
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, credential: Option<&str>) -> bool;
}

/// Single shared admin password, held only as a bcrypt hash
pub struct SharedSecret {
    password_hash: Option<String>,
}

impl SharedSecret {
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        Self::with_cost(secret, DEFAULT_COST)
    }

    /// Hash with an explicit bcrypt cost (tests use the minimum)
    pub fn with_cost(secret: &str, cost: u32) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        let password_hash =
            hash(secret, cost).map_err(|e| AuthError::HashError(e.to_string()))?;
        Ok(Self {
            password_hash: Some(password_hash),
        })
    }

    /// No admin password configured: every credential is rejected
    pub fn disabled() -> Self {
        Self {
            password_hash: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.password_hash.is_some()
    }
}

impl CredentialCheck for SharedSecret {
    fn verify(&self, credential: Option<&str>) -> bool {
        match (&self.password_hash, credential) {
            (Some(password_hash), Some(candidate)) => {
                verify(candidate, password_hash).unwrap_or(false)
            }
            _ => false,
        }
    }
}

/// Thread-safe handle to the configured credential check
pub type SharedCredentialCheck = Arc<dyn CredentialCheck>;

/// Authentication setup errors
#[derive(Debug, Clone)]
pub enum AuthError {
    EmptySecret,
    HashError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::EmptySecret => write!(f, "Admin password must not be empty"),
            AuthError::HashError(msg) => write!(f, "Hash error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_secret() -> SharedSecret {
        SharedSecret::with_cost("hunter2", 4).unwrap()
    }

    #[test]
    fn test_verify_correct_password() {
        assert!(test_secret().verify(Some("hunter2")));
    }

    #[test]
    fn test_verify_wrong_or_missing_password() {
        let secret = test_secret();
        assert!(!secret.verify(Some("hunter3")));
        assert!(!secret.verify(Some("")));
        assert!(!secret.verify(None));
    }

    #[test]
    fn test_disabled_rejects_everything() {
        let secret = SharedSecret::disabled();
        assert!(!secret.is_enabled());
        assert!(!secret.verify(Some("")));
        assert!(!secret.verify(None));
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(matches!(
            SharedSecret::with_cost("", 4),
            Err(AuthError::EmptySecret)
        ));
    }
}
