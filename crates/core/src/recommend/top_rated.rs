use super::RecommendationStrategy;
use crate::catalog::{Genre, Movie};

/// At most this many movies are recommended.
const MAX_RESULTS: usize = 5;

/// Recommends the highest-rated movies in the whole catalog.
///
/// Unrated movies rank with an implicit 0.0. The sort is stable, so
/// movies with equal averages keep their pre-order discovery order.
pub struct TopRated;

impl RecommendationStrategy for TopRated {
    fn recommend<'a>(&self, root: &'a Genre, _param: &str) -> Vec<&'a Movie> {
        let mut movies = root.collect_movies();
        movies.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
        movies.truncate(MAX_RESULTS);
        movies
    }

    fn name(&self) -> &'static str {
        "top_rated"
    }
}
