pub mod auth;
pub mod catalog;
pub mod command;
pub mod config;
pub mod persistence;
pub mod recommend;
pub mod session;

pub use auth::{create_authenticator, AuthError, Authenticator, FixedCredentialsAuthenticator, Identity};
pub use catalog::{CatalogError, CatalogNode, CatalogService, Genre, Movie};
pub use command::{CommandDispatcher, CommandError};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthMethod, Config, ConfigError,
};
pub use session::{Role, Session};
