//! Parses one line of input into a command, enforces role-based
//! authorization and routes to the catalog service.

use std::sync::Arc;

use super::{help_text, CommandError};
use crate::catalog::CatalogService;
use crate::session::Role;

const ADD_MOVIE_USAGE: &str = "USAGE: ADD_MOVIE <Genre_or_Path> <Title_Name>\n\
Examples:\n\
  ADD_MOVIE action Matrix_4\n\
  ADD_MOVIE action/superhero Batman_Returns\n\
  ADD_MOVIE sci-fi/space Gravity\n\
Note: Movies are added without rating. Users will rate them.";

const RATE_MOVIE_USAGE: &str = "USAGE: RATE_MOVIE <Movie_Title> <Rating>\n\
Examples:\n\
  RATE_MOVIE Matrix 8.5\n\
  RATE_MOVIE The_Shawshank_Redemption 9.3\n\
Note: Use underscores for spaces in movie title\n\
      Rating must be between 0.0 and 10.0";

const LIST_SUBTREE_USAGE: &str = "USAGE: LIST_SUBTREE <Genre_or_SubGenre>\n\
Examples:\n\
  LIST_SUBTREE action\n\
  LIST_SUBTREE superhero\n\
  LIST_SUBTREE pixar";

const RECOMMEND_USAGE: &str = "USAGE: RECOMMEND <TOP_RATED|GENRE_SIMILAR> [GenreName]";

/// The fixed command registry, keyed on the upper-cased first token.
#[derive(Debug, Clone, Copy)]
enum Command {
    AddMovie,
    ListSubtree,
    ListAll,
    Recommend,
    RateMovie,
    Help,
}

impl Command {
    fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "ADD_MOVIE" => Some(Command::AddMovie),
            "LIST_SUBTREE" => Some(Command::ListSubtree),
            "LIST_ALL" => Some(Command::ListAll),
            "RECOMMEND" => Some(Command::Recommend),
            "RATE_MOVIE" => Some(Command::RateMovie),
            "HELP" => Some(Command::Help),
            _ => None,
        }
    }
}

/// Stateless per-call dispatcher bound to the shared catalog service.
pub struct CommandDispatcher {
    service: Arc<CatalogService>,
}

impl CommandDispatcher {
    pub fn new(service: Arc<CatalogService>) -> Self {
        Self { service }
    }

    /// Execute one command line as `role` and render the response.
    /// Errors come back as `ERROR: ...` text; missing arguments come
    /// back as usage guidance, not as errors.
    pub fn dispatch(&self, input: &str, role: Role) -> String {
        match self.try_dispatch(input, role) {
            Ok(response) => response,
            Err(err) => format!("ERROR: {err}"),
        }
    }

    fn try_dispatch(&self, input: &str, role: Role) -> Result<String, CommandError> {
        let args: Vec<&str> = input.split_whitespace().collect();
        let keyword = match args.first() {
            Some(first) => first.to_uppercase(),
            None => return Err(CommandError::Empty),
        };

        // The unknown-command check runs before the guest check, so an
        // unauthenticated client still learns when it mistypes a keyword.
        let command = Command::parse(&keyword).ok_or(CommandError::Unknown)?;

        if role == Role::Guest {
            return Err(CommandError::NotLoggedIn);
        }

        match command {
            Command::AddMovie => self.add_movie(&args, role),
            Command::ListSubtree => self.list_subtree(&args),
            Command::ListAll => Ok(self.service.list_all()),
            Command::Recommend => self.recommend(&args),
            Command::RateMovie => self.rate_movie(&args, role),
            Command::Help => Ok(help_text(role)),
        }
    }

    fn add_movie(&self, args: &[&str], role: Role) -> Result<String, CommandError> {
        if role != Role::Admin {
            return Err(CommandError::AdminsOnly);
        }
        if args.len() < 3 {
            return Ok(ADD_MOVIE_USAGE.to_string());
        }
        let title = args[2].replace('_', " ");
        Ok(self.service.add_movie(args[1], &title))
    }

    fn rate_movie(&self, args: &[&str], role: Role) -> Result<String, CommandError> {
        if role != Role::User {
            return Err(CommandError::UsersOnly);
        }
        if args.len() < 3 {
            return Ok(RATE_MOVIE_USAGE.to_string());
        }
        let rating: f64 = args[2]
            .parse()
            .map_err(|_| CommandError::RatingNotANumber)?;
        if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
            return Err(CommandError::RatingOutOfRange);
        }
        let title = args[1].replace('_', " ");
        Ok(self.service.rate_movie(&title, rating)?)
    }

    fn list_subtree(&self, args: &[&str]) -> Result<String, CommandError> {
        if args.len() < 2 {
            return Ok(LIST_SUBTREE_USAGE.to_string());
        }
        Ok(self.service.list_subtree(args[1])?)
    }

    fn recommend(&self, args: &[&str]) -> Result<String, CommandError> {
        if args.len() < 2 {
            return Ok(RECOMMEND_USAGE.to_string());
        }
        let param = args.get(2).copied().unwrap_or("");
        Ok(self.service.recommend(args[1], param)?)
    }
}
