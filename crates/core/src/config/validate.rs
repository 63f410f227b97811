use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Auth section exists (enforced by serde)
/// - Server port is not 0
/// - Snapshot path is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.persistence.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "persistence.path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
