use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from a TOML file, with `RECOMTREE_*` environment
/// variables overriding individual keys (e.g. `RECOMTREE_SERVER_PORT`).
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("RECOMTREE_").split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Parse configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
