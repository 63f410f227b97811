//! JSON snapshot of the catalog tree.
//!
//! The on-disk format is a recursive tagged document. Genres carry a
//! `children` array; movies carry their running rating statistics plus
//! a derived `rating` field kept for older readers that only understand
//! a plain average. On load the derived field is ignored and snapshots
//! written before rating statistics existed come back as unrated.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{CatalogNode, Genre, Movie};

/// Name given to the root genre of a fresh catalog.
pub const ROOT_NAME: &str = "Movies Catalog";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Snapshot root must be a genre node")]
    RootNotAGenre,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum NodeSnapshot {
    Genre {
        name: String,
        #[serde(default)]
        children: Vec<NodeSnapshot>,
    },
    Movie {
        name: String,
        #[serde(default)]
        rating: f64,
        #[serde(default, rename = "ratingCount")]
        rating_count: u32,
        #[serde(default, rename = "totalRatingSum")]
        total_rating_sum: f64,
    },
}

impl NodeSnapshot {
    fn from_node(node: &CatalogNode) -> Self {
        match node {
            CatalogNode::Genre(genre) => Self::from_genre(genre),
            CatalogNode::Movie(movie) => NodeSnapshot::Movie {
                name: movie.name().to_string(),
                rating: movie.rating(),
                rating_count: movie.rating_count(),
                total_rating_sum: movie.rating_sum(),
            },
        }
    }

    fn from_genre(genre: &Genre) -> Self {
        NodeSnapshot::Genre {
            name: genre.name().to_string(),
            children: genre.children().iter().map(Self::from_node).collect(),
        }
    }

    fn into_node(self) -> CatalogNode {
        match self {
            NodeSnapshot::Genre { name, children } => {
                let mut genre = Genre::new(name);
                for child in children {
                    genre.add_child(child.into_node());
                }
                CatalogNode::Genre(genre)
            }
            NodeSnapshot::Movie {
                name,
                rating: _,
                rating_count,
                total_rating_sum,
            } => CatalogNode::Movie(Movie::from_stats(name, total_rating_sum, rating_count)),
        }
    }
}

/// Load the catalog from `path`, falling back to a fresh empty root when
/// the file is missing or unreadable. Startup must not fail on a bad
/// snapshot; the damaged file is left in place and logged.
pub fn load(path: &Path) -> Genre {
    if !path.exists() {
        info!(path = %path.display(), "no catalog snapshot found, starting with an empty catalog");
        return Genre::new(ROOT_NAME);
    }
    match try_load(path) {
        Ok(root) => {
            info!(path = %path.display(), "catalog snapshot loaded");
            root
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load catalog snapshot, starting with an empty catalog");
            Genre::new(ROOT_NAME)
        }
    }
}

/// Strict variant of [`load`] that surfaces the failure.
pub fn try_load(path: &Path) -> Result<Genre, PersistenceError> {
    let contents = fs::read_to_string(path)?;
    let snapshot: NodeSnapshot = serde_json::from_str(&contents)?;
    match snapshot.into_node() {
        CatalogNode::Genre(root) => Ok(root),
        CatalogNode::Movie(_) => Err(PersistenceError::RootNotAGenre),
    }
}

/// Write the whole catalog tree to `path` as pretty-printed JSON.
pub fn save(path: &Path, root: &Genre) -> Result<(), PersistenceError> {
    let snapshot = NodeSnapshot::from_genre(root);
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "catalog snapshot saved");
    Ok(())
}
