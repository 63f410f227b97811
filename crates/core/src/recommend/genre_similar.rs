use super::RecommendationStrategy;
use crate::catalog::{Genre, Movie};

/// Recommends every movie under a named genre (sub-genres included).
///
/// The genre is resolved by the same global recursive search as any
/// other lookup; an unknown genre yields no recommendations. Results
/// are in pre-order with no ranking or truncation.
pub struct GenreSimilar;

impl RecommendationStrategy for GenreSimilar {
    fn recommend<'a>(&self, root: &'a Genre, param: &str) -> Vec<&'a Movie> {
        match root.find_genre(param) {
            Some(genre) => genre.collect_movies(),
            None => Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        "genre_similar"
    }
}
