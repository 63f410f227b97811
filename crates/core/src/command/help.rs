//! Static help text, conditioned on the session role.

use crate::session::Role;

pub fn help_text(role: Role) -> String {
    let mut help = String::new();

    help.push_str("\n====================================================================\n");
    help.push_str("                     AVAILABLE COMMANDS                             \n");
    help.push_str("====================================================================\n\n");

    help.push_str("GENERAL COMMANDS:\n");
    help.push_str("  HELP                            - Display this help\n");
    help.push_str("  LIST_ALL                        - List all movies in the catalog\n");
    help.push_str("  LIST_SUBTREE <Genre/SubGenre>   - List movies from a genre or sub-genre\n");
    help.push_str("                                    Examples: LIST_SUBTREE action\n");
    help.push_str("                                              LIST_SUBTREE superhero\n");
    help.push_str("  RECOMMEND TOP_RATED             - Recommend top rated movies\n");
    help.push_str("  RECOMMEND GENRE_SIMILAR <Genre> - Recommend movies from same genre\n");
    help.push_str("                                    (includes all sub-genres)\n\n");

    if role == Role::Admin {
        help.push_str("ADMIN COMMANDS:\n");
        help.push_str("  ADD_MOVIE <Genre/Path> <Title>\n");
        help.push_str("                                  - Add a movie to the catalog\n");
        help.push_str("                                    Use underscores for spaces in title\n");
        help.push_str("                                    Use slash for sub-genre paths\n");
        help.push_str("                                    Movies are added without rating\n");
        help.push_str("                                    Examples:\n");
        help.push_str("                                      ADD_MOVIE action The_Raid\n");
        help.push_str("                                      ADD_MOVIE action/superhero Deadpool\n");
        help.push_str("                                      ADD_MOVIE sci-fi/space Apollo_13\n\n");
    }

    if role == Role::User {
        help.push_str("USER COMMANDS:\n");
        help.push_str("  RATE_MOVIE <Movie_Title> <Rating>\n");
        help.push_str("                                  - Rate a movie (0.0 to 10.0)\n");
        help.push_str("                                    Use underscores for spaces in title\n");
        help.push_str("                                    Examples:\n");
        help.push_str("                                      RATE_MOVIE Matrix 8.5\n");
        help.push_str("                                      RATE_MOVIE The_Dark_Knight 9.0\n\n");
    }

    if role == Role::Guest {
        help.push_str("Log in as ADMIN or USER to see more commands!\n\n");
    }

    help.push_str("====================================================================\n");
    help
}
