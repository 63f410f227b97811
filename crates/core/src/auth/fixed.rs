//! Fixed in-memory credential authentication.

use async_trait::async_trait;

use super::{AuthError, Authenticator, Identity};
use crate::session::Role;

/// Authenticator backed by a fixed list of username/password/role
/// entries. The default set is the two well-known service accounts:
/// `admin/admin123` (ADMIN) and `user/user123` (USER).
pub struct FixedCredentialsAuthenticator {
    credentials: Vec<(String, String, Role)>,
}

impl FixedCredentialsAuthenticator {
    pub fn new(credentials: Vec<(String, String, Role)>) -> Self {
        Self { credentials }
    }
}

impl Default for FixedCredentialsAuthenticator {
    fn default() -> Self {
        Self::new(vec![
            ("admin".to_string(), "admin123".to_string(), Role::Admin),
            ("user".to_string(), "user123".to_string(), Role::User),
        ])
    }
}

#[async_trait]
impl Authenticator for FixedCredentialsAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        // Usernames and passwords are both case-sensitive.
        self.credentials
            .iter()
            .find(|(user, pass, _)| user == username && pass == password)
            .map(|(user, _, role)| Identity::new(user.clone(), *role))
            .ok_or(AuthError::InvalidCredentials)
    }

    fn method_name(&self) -> &'static str {
        "fixed"
    }
}
