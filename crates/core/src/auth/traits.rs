use async_trait::async_trait;
use thiserror::Error;

use super::types::Identity;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Check a username/password pair and return the resulting identity
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError>;

    /// Name of this authentication method
    fn method_name(&self) -> &'static str;
}
