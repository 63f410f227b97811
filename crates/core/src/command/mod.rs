//! Command parsing, authorization and routing.

mod dispatcher;
mod help;

pub use dispatcher::CommandDispatcher;
pub use help::help_text;

use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors a command line can produce. All of them are recovered locally
/// and rendered as an `ERROR: ...` response; none terminate the session.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown Command")]
    Unknown,

    #[error("Please LOGIN first.")]
    NotLoggedIn,

    #[error("Access Denied. Admins only.")]
    AdminsOnly,

    #[error("Access Denied. Only users can rate movies.")]
    UsersOnly,

    #[error("Rating must be between 0.0 and 10.0")]
    RatingOutOfRange,

    #[error("Invalid rating format. Please use a number (e.g., 8.5)")]
    RatingNotANumber,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
