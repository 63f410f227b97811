//! The in-memory catalog tree.
//!
//! A single root [`Genre`] owns the whole hierarchy. Genres hold child
//! genres and movies in insertion order; movies carry running rating
//! statistics. All lookups by name are case-insensitive and return the
//! first match in depth-first pre-order.

/// A node in the catalog tree, either an internal genre or a movie leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogNode {
    Genre(Genre),
    Movie(Movie),
}

/// An internal node grouping child genres and movies.
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    name: String,
    children: Vec<CatalogNode>,
}

/// A leaf node with running rating statistics.
///
/// `rating_sum` and `rating_count` are only ever incremented together
/// via [`Movie::add_rating`]; they are never reset or decremented.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    name: String,
    rating_sum: f64,
    rating_count: u32,
}

fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Genre {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[CatalogNode] {
        &self.children
    }

    /// Append a child. Duplicate names at one level are permitted.
    pub fn add_child(&mut self, node: CatalogNode) {
        self.children.push(node);
    }

    /// Depth-first pre-order search for a genre by name, this genre
    /// itself included. First match wins.
    pub fn find_genre(&self, name: &str) -> Option<&Genre> {
        if names_match(&self.name, name) {
            return Some(self);
        }
        for child in &self.children {
            if let CatalogNode::Genre(genre) = child {
                if let Some(found) = genre.find_genre(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_genre_mut(&mut self, name: &str) -> Option<&mut Genre> {
        if names_match(&self.name, name) {
            return Some(self);
        }
        for child in &mut self.children {
            if let CatalogNode::Genre(genre) = child {
                if let Some(found) = genre.find_genre_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Resolve one path segment: reuse a matching genre anywhere in this
    /// subtree, or create a direct child. The whole-subtree search (rather
    /// than direct children only) reproduces the long-standing resolution
    /// behavior clients depend on.
    pub(crate) fn descend_or_create(&mut self, name: &str) -> &mut Genre {
        if self.find_genre(name).is_none() {
            self.children.push(CatalogNode::Genre(Genre::new(name)));
        }
        self.find_genre_mut(name)
            .expect("subtree contains the genre after insertion")
    }

    /// Pre-order traversal collecting every movie leaf under this genre.
    pub fn collect_movies(&self) -> Vec<&Movie> {
        let mut movies = Vec::new();
        self.collect_movies_into(&mut movies);
        movies
    }

    fn collect_movies_into<'a>(&'a self, movies: &mut Vec<&'a Movie>) {
        for child in &self.children {
            match child {
                CatalogNode::Movie(movie) => movies.push(movie),
                CatalogNode::Genre(genre) => genre.collect_movies_into(movies),
            }
        }
    }

    /// First movie whose name matches case-insensitively, in the same
    /// pre-order as [`Genre::collect_movies`].
    pub fn find_movie_mut(&mut self, title: &str) -> Option<&mut Movie> {
        for child in &mut self.children {
            match child {
                CatalogNode::Movie(movie) => {
                    if names_match(movie.name(), title) {
                        return Some(movie);
                    }
                }
                CatalogNode::Genre(genre) => {
                    if let Some(found) = genre.find_movie_mut(title) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Indented, human-readable tree text. The node render starts on is
    /// never printed itself (depth 0 is suppressed); descendants print at
    /// three spaces per level with a `"- "` prefix.
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        self.render_into(&mut out, depth);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        if depth > 0 {
            out.push_str(&"   ".repeat(depth));
            out.push_str("- ");
            out.push_str(&self.name);
            out.push('\n');
        }
        for child in &self.children {
            match child {
                CatalogNode::Genre(genre) => genre.render_into(out, depth + 1),
                CatalogNode::Movie(movie) => movie.render_into(out, depth + 1),
            }
        }
    }
}

impl Movie {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating_sum: 0.0,
            rating_count: 0,
        }
    }

    /// Rebuild a movie from persisted statistics.
    pub fn from_stats(name: impl Into<String>, rating_sum: f64, rating_count: u32) -> Self {
        Self {
            name: name.into(),
            rating_sum,
            rating_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating_sum(&self) -> f64 {
        self.rating_sum
    }

    pub fn rating_count(&self) -> u32 {
        self.rating_count
    }

    /// Average rating, or `None` while unrated.
    pub fn average(&self) -> Option<f64> {
        if self.rating_count > 0 {
            Some(self.rating_sum / f64::from(self.rating_count))
        } else {
            None
        }
    }

    /// Average rating with unrated movies ranking as 0.0.
    pub fn rating(&self) -> f64 {
        self.average().unwrap_or(0.0)
    }

    /// Record one rating. Sum and count move together.
    pub fn add_rating(&mut self, rating: f64) {
        self.rating_sum += rating;
        self.rating_count += 1;
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push_str(&"   ".repeat(depth));
        out.push_str("- ");
        out.push_str(&self.name);
        out.push(' ');
        match self.average() {
            Some(avg) => out.push_str(&format!("{:.1}/10 ({})", avg, self.rating_count)),
            None => out.push_str("Not rated"),
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Genre {
        let mut root = Genre::new("Movies Catalog");
        let mut action = Genre::new("Action");
        let mut superhero = Genre::new("Superhero");
        superhero.add_child(CatalogNode::Movie(Movie::new("Deadpool")));
        action.add_child(CatalogNode::Genre(superhero));
        action.add_child(CatalogNode::Movie(Movie::new("The Raid")));
        root.add_child(CatalogNode::Genre(action));
        root.add_child(CatalogNode::Movie(Movie::new("Standalone")));
        root
    }

    #[test]
    fn test_find_genre_is_case_insensitive() {
        let root = sample_tree();
        assert!(root.find_genre("ACTION").is_some());
        assert!(root.find_genre("superhero").is_some());
        assert!(root.find_genre("drama").is_none());
    }

    #[test]
    fn test_find_genre_includes_the_searched_node_itself() {
        let root = sample_tree();
        let found = root.find_genre("movies catalog").unwrap();
        assert_eq!(found.name(), "Movies Catalog");
    }

    #[test]
    fn test_find_genre_returns_first_preorder_match() {
        let mut root = Genre::new("root");
        let mut first = Genre::new("a");
        first.add_child(CatalogNode::Genre(Genre::new("dup")));
        root.add_child(CatalogNode::Genre(first));
        let mut second = Genre::new("dup");
        second.add_child(CatalogNode::Movie(Movie::new("marker")));
        root.add_child(CatalogNode::Genre(second));

        // The nested one under "a" comes first in pre-order.
        let found = root.find_genre("dup").unwrap();
        assert!(found.children().is_empty());
    }

    #[test]
    fn test_collect_movies_preorder() {
        let root = sample_tree();
        let names: Vec<&str> = root.collect_movies().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Deadpool", "The Raid", "Standalone"]);
    }

    #[test]
    fn test_add_rating_updates_sum_and_count_together() {
        let mut movie = Movie::new("Matrix");
        assert_eq!(movie.average(), None);
        movie.add_rating(8.0);
        movie.add_rating(9.0);
        assert_eq!(movie.rating_count(), 2);
        assert_eq!(movie.rating_sum(), 17.0);
        assert_eq!(movie.average(), Some(8.5));
    }

    #[test]
    fn test_render_skips_root_and_indents_descendants() {
        let root = sample_tree();
        let text = root.render(0);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "   - Action",
                "      - Superhero",
                "         - Deadpool Not rated",
                "      - The Raid Not rated",
                "   - Standalone Not rated",
            ]
        );
    }

    #[test]
    fn test_render_shows_average_and_count_for_rated_movies() {
        let mut root = Genre::new("root");
        let mut movie = Movie::new("Matrix");
        movie.add_rating(8.0);
        movie.add_rating(9.0);
        root.add_child(CatalogNode::Movie(movie));
        assert_eq!(root.render(0), "   - Matrix 8.5/10 (2)\n");
    }

    #[test]
    fn test_duplicate_names_at_one_level_are_allowed() {
        let mut root = Genre::new("root");
        root.add_child(CatalogNode::Genre(Genre::new("dup")));
        root.add_child(CatalogNode::Genre(Genre::new("dup")));
        assert_eq!(root.children().len(), 2);
    }
}
