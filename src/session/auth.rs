//! Credential sourcing for share connections.
//!
//! The engine never stores credentials. It asks a [`CredentialSource`] at
//! connection time and forgets the answer as soon as the connection is
//! established.

use crate::error::OpResult;

/// Credentials for one authenticated share connection.
#[derive(Clone)]
pub struct ShareCredentials {
    pub username: String,
    pub domain: String,
    pub password: String,
}

impl ShareCredentials {
    pub fn new(
        username: impl Into<String>,
        domain: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        ShareCredentials {
            username: username.into(),
            domain: domain.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs and debug output.
impl std::fmt::Debug for ShareCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareCredentials")
            .field("username", &self.username)
            .field("domain", &self.domain)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Supplies credentials on demand for the requesting user's established
/// identity. Implemented by the surrounding application's auth layer.
pub trait CredentialSource {
    fn credentials(&self) -> OpResult<ShareCredentials>;
}
