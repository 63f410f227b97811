//! Mutation and query operations over the shared catalog tree.
//!
//! Every operation takes the single tree lock for the duration of one
//! call, so concurrent sessions never interleave mid-traversal but one
//! session's command does not block others once it returns.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use super::tree::{CatalogNode, Genre, Movie};
use crate::recommend::resolve_strategy;

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Genre '{0}' not found.")]
    GenreNotFound(String),

    #[error("Movie '{0}' not found in catalog.")]
    MovieNotFound(String),

    #[error("Unknown strategy")]
    UnknownStrategy,
}

/// Shared catalog service; one instance serves every session.
pub struct CatalogService {
    root: Mutex<Genre>,
}

impl CatalogService {
    pub fn new(root: Genre) -> Self {
        Self {
            root: Mutex::new(root),
        }
    }

    fn root(&self) -> MutexGuard<'_, Genre> {
        // A poisoned lock still holds a structurally valid tree.
        self.root
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add an unrated movie under a `/`-separated genre path, creating
    /// missing genres along the way.
    ///
    /// Each segment is resolved by a full recursive search rooted at the
    /// current target genre, so a segment can match a genre nested
    /// arbitrarily deep under it, not just an immediate child.
    pub fn add_movie(&self, genre_path: &str, title: &str) -> String {
        let mut root = self.root();
        let mut target = &mut *root;
        for segment in genre_path.split('/') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            target = target.descend_or_create(segment);
        }
        target.add_child(CatalogNode::Movie(Movie::new(title)));

        let full_path = genre_path.replace('/', " > ");
        format!("SUCCESS: Added movie '{title}' to {full_path} (not rated yet)")
    }

    /// Record a rating on the first movie matching `title`
    /// case-insensitively, anywhere in the tree.
    ///
    /// The caller validates the rating range; sum and count are updated
    /// together under the tree lock.
    pub fn rate_movie(&self, title: &str, rating: f64) -> Result<String, CatalogError> {
        let mut root = self.root();
        let movie = root
            .find_movie_mut(title)
            .ok_or_else(|| CatalogError::MovieNotFound(title.to_string()))?;
        movie.add_rating(rating);

        let count = movie.rating_count();
        let average = movie.rating();
        let plural = if count > 1 { "s" } else { "" };
        Ok(format!(
            "SUCCESS: Your rating of {} has been recorded for '{}'.\nNew average: {:.1} ({} rating{})",
            fmt_rating(rating),
            title,
            average,
            count,
            plural
        ))
    }

    /// Render the subtree of a genre resolved by global search from root.
    /// The found genre's own line is suppressed; only its contents print.
    pub fn list_subtree(&self, genre_name: &str) -> Result<String, CatalogError> {
        let root = self.root();
        let genre = root
            .find_genre(genre_name)
            .ok_or_else(|| CatalogError::GenreNotFound(genre_name.to_string()))?;
        Ok(genre.render(0))
    }

    /// Render the whole catalog (the root's own name never prints).
    pub fn list_all(&self) -> String {
        let rendered = self.root().render(0);
        if rendered.is_empty() {
            "Catalog is empty.".to_string()
        } else {
            rendered
        }
    }

    /// Run a named recommendation strategy and format its results.
    pub fn recommend(&self, strategy_name: &str, param: &str) -> Result<String, CatalogError> {
        let strategy = resolve_strategy(strategy_name).ok_or(CatalogError::UnknownStrategy)?;

        let root = self.root();
        let results = strategy.recommend(&root, param);
        if results.is_empty() {
            return Ok("No recommendations found.".to_string());
        }

        let mut out = String::from("RECOMMENDATIONS:\n");
        for movie in results {
            let count = movie.rating_count();
            match movie.average() {
                Some(avg) => {
                    let plural = if count > 1 { "s" } else { "" };
                    out.push_str(&format!(
                        "- {} ({:.1} - {} rating{})\n",
                        movie.name(),
                        avg,
                        count,
                        plural
                    ));
                }
                None => out.push_str(&format!("- {} (Not rated yet)\n", movie.name())),
            }
        }
        Ok(out)
    }

    /// Clone the tree for persistence; the lock is held only for the copy.
    pub fn snapshot(&self) -> Genre {
        self.root().clone()
    }
}

/// Format a submitted rating the way clients expect: whole numbers keep
/// one decimal place ("8.0"), everything else prints as parsed.
fn fmt_rating(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
