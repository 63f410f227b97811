mod fixed;
mod traits;
mod types;

pub use fixed::*;
pub use traits::*;
pub use types::*;

use crate::config::AuthConfig;

/// Factory function to create authenticator from config
pub fn create_authenticator(config: &AuthConfig) -> Result<Box<dyn Authenticator>, AuthError> {
    use crate::config::AuthMethod;

    match config.method {
        AuthMethod::Fixed => Ok(Box::new(FixedCredentialsAuthenticator::default())),
    }
}
