//! Credential check and the Anonymous/Authenticated session transitions.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::{credentials::CredentialStore, storage::Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown user, wrong password, or an empty field.
    #[error("Invalid username or password!")]
    InvalidCredentials,
}

/// Validates submitted credentials and drives the per-client session state.
///
/// The session is always passed in by the caller; the authenticator keeps no
/// per-client state of its own.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Arc<CredentialStore>,
}

impl Authenticator {
    #[must_use]
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }

    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Attempt a login, recording `username` in `session` on success.
    ///
    /// Empty fields fail before the table is consulted. A failed attempt leaves the
    /// session untouched; a successful one overwrites any previous user.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] when a field is empty or the pair does not match.
    pub fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if username.is_empty() || password.is_empty() {
            warn!("Login rejected: missing username or password");
            return Err(AuthError::InvalidCredentials);
        }

        if !self.credentials.verify(username, password) {
            warn!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        if let Some(previous) = session.current_user() {
            if previous != username {
                info!(previous, username, "Replacing authenticated user");
            }
        }

        session.set_user(username);
        info!(username, "Login successful");

        Ok(())
    }

    /// Clear the authenticated user. Calling this on an anonymous session is a no-op.
    pub fn logout(&self, session: &mut Session) {
        if let Some(username) = session.current_user() {
            info!(username, "Logout");
        }
        session.clear_user();
    }

    #[must_use]
    pub fn current_user<'s>(&self, session: &'s Session) -> Option<&'s str> {
        session.current_user()
    }
}
