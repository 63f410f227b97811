//! The hierarchical movie catalog: tree structure plus the service that
//! mediates every read and mutation over it.

mod service;
mod tree;

pub use service::{CatalogError, CatalogService};
pub use tree::{CatalogNode, Genre, Movie};
