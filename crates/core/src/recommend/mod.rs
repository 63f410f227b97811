//! Recommendation strategies: pure ranking functions over the catalog
//! tree. Strategies never mutate; the caller holds the tree lock while
//! a strategy runs.

mod genre_similar;
mod top_rated;

pub use genre_similar::*;
pub use top_rated::*;

use crate::catalog::{Genre, Movie};

/// A ranking strategy producing an ordered list of movies.
pub trait RecommendationStrategy: Send + Sync {
    /// Rank movies under `root`. `param` is strategy-specific (e.g. a
    /// genre name) and may be empty.
    fn recommend<'a>(&self, root: &'a Genre, param: &str) -> Vec<&'a Movie>;

    /// Name of this strategy.
    fn name(&self) -> &'static str;
}

/// Factory function to resolve a strategy by its wire name
/// (case-insensitive).
pub fn resolve_strategy(name: &str) -> Option<Box<dyn RecommendationStrategy>> {
    match name.to_uppercase().as_str() {
        "TOP_RATED" => Some(Box::new(TopRated)),
        "GENRE_SIMILAR" => Some(Box::new(GenreSimilar)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strategy_known_names() {
        assert_eq!(resolve_strategy("TOP_RATED").unwrap().name(), "top_rated");
        assert_eq!(
            resolve_strategy("genre_similar").unwrap().name(),
            "genre_similar"
        );
    }

    #[test]
    fn test_resolve_strategy_unknown_name() {
        assert!(resolve_strategy("BEST_EVER").is_none());
        assert!(resolve_strategy("").is_none());
    }
}
