//! Admin credential check.
//!
//! There is a single admin account. A successful check is all the access
//! control there is: no tokens, no expiry, no lockout.

use crate::errors::{Error, Result};
use tracing::warn;

/// The one username/password pair that unlocks admin operations.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The admin username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Checks a login attempt.
    ///
    /// # Errors
    /// Returns [`Error::Auth`] when either field does not match.
    pub fn verify(&self, username: &str, password: &str) -> Result<()> {
        if username == self.username && password == self.password {
            Ok(())
        } else {
            warn!("Rejected admin login for '{username}'");
            Err(Error::Auth)
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
