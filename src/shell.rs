//! Interactive menu shell
//!
//! Renders the main menu, collects validated input and calls into the
//! [`MovieStore`]. Closed input (EOF) ends the session cleanly; a storage
//! failure aborts the current action and returns to the menu.
//!
//! Listings and movie details are written to the shell's output; prompts,
//! banners and status lines go straight to the terminal.

use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::str::FromStr;

use console::Term;
use owo_colors::OwoColorize;

use crate::movie::{round_rating, validate_rating, NewMovie, NewRating};
use crate::storage::MovieStore;
use crate::ui::{self, table, theme, Icons};
use crate::{Error, Result};

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddMovie,
    ViewAll,
    Search,
    AddRating,
    Details,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn all() -> &'static [MenuChoice] {
        &[
            MenuChoice::AddMovie,
            MenuChoice::ViewAll,
            MenuChoice::Search,
            MenuChoice::AddRating,
            MenuChoice::Details,
            MenuChoice::Delete,
            MenuChoice::Exit,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddMovie => "Add a new movie",
            MenuChoice::ViewAll => "View all movies",
            MenuChoice::Search => "Search for a movie",
            MenuChoice::AddRating => "Add rating to a movie",
            MenuChoice::Details => "View movie details",
            MenuChoice::Delete => "Delete a movie",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::all().get(i).copied())
            .ok_or_else(|| Error::Validation(format!("Unknown menu choice: {}", s)))
    }
}

/// Line-oriented prompts with re-ask loops for required and numeric fields.
pub struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Read one trimmed line. End of input is reported as `UnexpectedEof`.
    pub fn line(&mut self, prompt: &str) -> Result<String> {
        ui::prompt(prompt)?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            println!();
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(buf.trim().to_string())
    }

    pub fn required_text(&mut self, prompt: &str) -> Result<String> {
        loop {
            let value = self.line(prompt)?;
            if !value.is_empty() {
                return Ok(value);
            }
            ui::warn("This field is required. Please try again.");
        }
    }

    /// Empty input means the field is absent
    pub fn optional_text(&mut self, prompt: &str) -> Result<Option<String>> {
        let value = self.line(prompt)?;
        Ok((!value.is_empty()).then_some(value))
    }

    pub fn required_number<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        loop {
            match self.required_text(prompt)?.parse() {
                Ok(n) => return Ok(n),
                Err(_) => ui::warn("Please enter a valid number."),
            }
        }
    }

    pub fn optional_number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        loop {
            let Some(value) = self.optional_text(prompt)? else {
                return Ok(None);
            };
            match value.parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => ui::warn("Please enter a valid number."),
            }
        }
    }

    /// Ask until the answer is a rating within range
    pub fn rating(&mut self, prompt: &str) -> Result<f64> {
        loop {
            let value: f64 = self.required_number(prompt)?;
            match validate_rating(value) {
                Ok(()) => return Ok(value),
                Err(_) => ui::warn("Rating must be between 0 and 10."),
            }
        }
    }
}

/// The menu loop, borrowing the store for its whole lifetime.
pub struct Shell<'a, R, W> {
    store: &'a MovieStore,
    input: Prompter<R>,
    out: W,
    term: Term,
}

impl<'a> Shell<'a, StdinLock<'static>, Stdout> {
    /// Shell on the process's standard input and output
    pub fn stdin(store: &'a MovieStore) -> Self {
        Self::new(store, io::stdin().lock(), io::stdout())
    }
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a MovieStore, input: R, out: W) -> Self {
        Self {
            store,
            input: Prompter::new(input),
            out,
            term: Term::stdout(),
        }
    }

    /// Give back the writer listings were rendered to
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user exits or input is closed
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let outcome = match self.input.required_text("Enter your choice (1-7): ") {
                Ok(raw) => match raw.parse::<MenuChoice>() {
                    Ok(MenuChoice::Exit) => {
                        println!("\n{} Thank you for using Movie Rating Database!", Icons::WAVE);
                        return Ok(());
                    }
                    Ok(choice) => self.dispatch(choice),
                    Err(_) => {
                        ui::error("Invalid choice. Please try again.");
                        self.pause()
                    }
                },
                Err(e) => Err(e),
            };

            match outcome {
                Ok(()) => {}
                Err(e) if is_input_closed(&e) => {
                    tracing::debug!("Input closed, leaving the menu");
                    return Ok(());
                }
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => {
                    if let Err(e) = self.report_failure(&e) {
                        if is_input_closed(&e) {
                            return Ok(());
                        }
                        return Err(e);
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        tracing::debug!("Menu choice: {:?}", choice);
        match choice {
            MenuChoice::AddMovie => self.add_movie(),
            MenuChoice::ViewAll => self.view_all_movies(),
            MenuChoice::Search => self.search_movies(),
            MenuChoice::AddRating => self.add_rating(),
            MenuChoice::Details => self.view_movie_details(),
            MenuChoice::Delete => self.delete_movie(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn report_failure(&mut self, err: &Error) -> Result<()> {
        tracing::error!("Menu action failed: {}", err);
        match err {
            Error::Validation(msg) => ui::error(msg),
            _ => ui::error("The database could not complete the operation."),
        }
        self.pause()
    }

    fn clear_screen(&self) -> Result<()> {
        if self.term.is_term() {
            self.term.clear_screen()?;
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.input.line("\nPress Enter to continue...")?;
        Ok(())
    }

    fn print_menu(&self) -> Result<()> {
        self.clear_screen()?;
        ui::header("MOVIE RATING DATABASE");
        println!();
        for (i, choice) in MenuChoice::all().iter().enumerate() {
            println!("{}. {}", i + 1, choice.label());
        }
        println!();
        ui::rule();
        Ok(())
    }

    fn add_movie(&mut self) -> Result<()> {
        ui::header("ADD NEW MOVIE");
        println!();

        let movie = NewMovie {
            title: self.input.required_text("Movie Title: ")?,
            year: self.input.optional_number("Year (press Enter to skip): ")?,
            genre: self.input.optional_text("Genre (press Enter to skip): ")?,
            director: self.input.optional_text("Director (press Enter to skip): ")?,
        };

        let movie_id = self.store.add_movie(&movie)?;
        ui::success(&format!("Movie '{}' added successfully! (ID: {})", movie.title, movie_id));

        println!();
        let answer = self.input.required_text("Would you like to add a rating now? (y/n): ")?;
        if answer.eq_ignore_ascii_case("y") {
            self.rate_movie(movie_id)
        } else {
            self.pause()
        }
    }

    fn add_rating(&mut self) -> Result<()> {
        ui::header("ADD RATING");
        println!();
        let movie_id = self.input.required_number("Enter movie ID: ")?;
        self.rate_movie(movie_id)
    }

    fn rate_movie(&mut self, movie_id: i64) -> Result<()> {
        let Some(movie) = self.store.movie_by_id(movie_id)? else {
            ui::error(&format!("Movie with ID {} not found.", movie_id));
            return self.pause();
        };

        println!("\n{} Adding rating for: {}", Icons::STAR, movie.title);
        let rating = self.input.rating("Rating (0-10): ")?;
        let comment = self.input.optional_text("Comment (press Enter to skip): ")?;

        let new_rating = NewRating { movie_id, rating, comment };
        if self.store.add_rating(&new_rating)? {
            ui::success("Rating added successfully!");
        } else {
            ui::error("Failed to add rating.");
        }
        self.pause()
    }

    fn view_all_movies(&mut self) -> Result<()> {
        ui::header("ALL MOVIES");

        let movies = self.store.all_movies()?;
        if movies.is_empty() {
            writeln!(self.out, "\nNo movies in the database yet.")?;
        } else {
            writeln!(self.out, "\n{}", ui::movies_table(&movies))?;
            let stats = self.store.stats()?;
            writeln!(self.out, "{} {}", Icons::DATABASE, ui::dim(&stats.to_string()))?;
        }
        self.out.flush()?;
        self.pause()
    }

    fn search_movies(&mut self) -> Result<()> {
        ui::header("SEARCH MOVIES");
        println!();

        let term = self.input.required_text("Enter search term: ")?;
        let hits = self.store.search_movies(&term)?;
        if hits.is_empty() {
            writeln!(self.out, "\n{} No movies found matching '{}'.", Icons::SEARCH, term)?;
        } else {
            writeln!(self.out, "\n{}", ui::search_table(&hits))?;
        }
        self.out.flush()?;
        self.pause()
    }

    fn view_movie_details(&mut self) -> Result<()> {
        ui::header("MOVIE DETAILS");
        println!();

        let movie_id = self.input.required_number("Enter movie ID: ")?;
        let Some(movie) = self.store.movie_by_id(movie_id)? else {
            ui::error(&format!("Movie with ID {} not found.", movie_id));
            return self.pause();
        };

        writeln!(self.out)?;
        writeln!(self.out, "{}", ui::field("Title", &movie.title))?;
        writeln!(self.out, "{}", ui::field("Year", &table::format_year(movie.year)))?;
        writeln!(self.out, "{}", ui::field("Genre", table::or_not_available(movie.genre.as_deref())))?;
        writeln!(
            self.out,
            "{}",
            ui::field("Director", table::or_not_available(movie.director.as_deref()))
        )?;
        writeln!(self.out, "{}", ui::field("Date Added", &movie.date_added))?;

        let ratings = self.store.movie_ratings(movie_id)?;
        if ratings.is_empty() {
            writeln!(self.out, "\nNo ratings yet for this movie.")?;
        } else {
            writeln!(self.out, "{}", ui::section(&format!("RATINGS ({} total)", ratings.len())))?;
            let total: f64 = ratings.iter().map(|r| r.rating).sum();
            let average = round_rating(total / ratings.len() as f64);
            writeln!(
                self.out,
                "\nAverage Rating: {}/10",
                format!("{:.2}", average).style(theme().rating(average))
            )?;
            writeln!(self.out, "\n{}", ui::ratings_table(&ratings))?;
        }
        self.out.flush()?;
        self.pause()
    }

    fn delete_movie(&mut self) -> Result<()> {
        ui::header("DELETE MOVIE");
        println!();

        let movie_id = self.input.required_number("Enter movie ID to delete: ")?;
        let Some(movie) = self.store.movie_by_id(movie_id)? else {
            ui::error(&format!("Movie with ID {} not found.", movie_id));
            return self.pause();
        };

        println!("\nMovie: {}", movie.title);
        let confirm = self
            .input
            .required_text("Are you sure you want to delete this movie? (yes/no): ")?;

        if confirm.eq_ignore_ascii_case("yes") {
            if self.store.delete_movie(movie_id)? {
                ui::success("Movie deleted successfully!");
            } else {
                ui::error("Failed to delete movie.");
            }
        } else {
            println!("\nDeletion cancelled.");
        }
        self.pause()
    }
}

fn is_input_closed(err: &Error) -> bool {
    matches!(err, Error::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()))
    }

    /// Run a scripted session and return what the screens rendered
    fn run_script(store: &MovieStore, script: &str) -> String {
        let mut shell = Shell::new(store, Cursor::new(script.as_bytes().to_vec()), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!("1".parse::<MenuChoice>().unwrap(), MenuChoice::AddMovie);
        assert_eq!(" 7 ".parse::<MenuChoice>().unwrap(), MenuChoice::Exit);
        assert!("0".parse::<MenuChoice>().is_err());
        assert!("8".parse::<MenuChoice>().is_err());
        assert!("add".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn test_required_text_reasks_on_empty() {
        let mut input = prompter("\n   \nAlien\n");
        assert_eq!(input.required_text("Title: ").unwrap(), "Alien");
    }

    #[test]
    fn test_optional_fields() {
        let mut input = prompter("\nabc\n1979\n");
        assert_eq!(input.optional_text("Genre: ").unwrap(), None);
        assert_eq!(input.optional_number::<i64>("Year: ").unwrap(), Some(1979));
    }

    #[test]
    fn test_optional_number_skips_on_empty() {
        let mut input = prompter("\n");
        assert_eq!(input.optional_number::<i64>("Year: ").unwrap(), None);
    }

    #[test]
    fn test_rating_reasks_until_in_range() {
        let mut input = prompter("eleven\n11\n-1\nNaN\n7.5\n");
        assert_eq!(input.rating("Rating: ").unwrap(), 7.5);
    }

    #[test]
    fn test_end_of_input() {
        let mut input = prompter("");
        let err = input.line("Anything: ").unwrap_err();
        assert!(is_input_closed(&err));
    }

    #[test]
    fn test_add_movie_and_rate_it() {
        let store = MovieStore::open_in_memory().unwrap();
        run_script(
            &store,
            "1\nInception\n2010\nSci-Fi\nChristopher Nolan\ny\n9.5\nMind-bending\n\n7\n",
        );

        let movies = store.all_movies().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Inception");
        assert_eq!(movies[0].year, Some(2010));
        assert_eq!(movies[0].avg_rating, Some(9.5));

        let ratings = store.movie_ratings(movies[0].id).unwrap();
        assert_eq!(ratings[0].comment.as_deref(), Some("Mind-bending"));
    }

    #[test]
    fn test_add_movie_with_skipped_fields() {
        let store = MovieStore::open_in_memory().unwrap();
        run_script(&store, "1\nAlien\n\n\n\nn\n\n7\n");

        let movie = store.movie_by_id(1).unwrap().unwrap();
        assert_eq!(movie.title, "Alien");
        assert_eq!(movie.year, None);
        assert_eq!(movie.genre, None);
        assert_eq!(movie.director, None);
        assert_eq!(store.count_ratings().unwrap(), 0);
    }

    #[test]
    fn test_delete_requires_yes() {
        let store = MovieStore::open_in_memory().unwrap();
        let id = store.add_movie(&NewMovie::new("Heat")).unwrap();
        store.add_rating(&NewRating::new(id, 8.0)).unwrap();

        run_script(&store, "6\n1\nno\n\n7\n");
        assert_eq!(store.count_movies().unwrap(), 1);

        run_script(&store, "6\n1\nyes\n\n7\n");
        assert_eq!(store.count_movies().unwrap(), 0);
        assert_eq!(store.count_ratings().unwrap(), 0);
    }

    #[test]
    fn test_rating_unknown_movie() {
        let store = MovieStore::open_in_memory().unwrap();
        run_script(&store, "4\n42\n\n7\n");
        assert_eq!(store.count_ratings().unwrap(), 0);
    }

    #[test]
    fn test_read_only_screens() {
        let store = MovieStore::open_in_memory().unwrap();
        let id = store.add_movie(&NewMovie::new("The Matrix").with_year(1999)).unwrap();
        store.add_rating(&NewRating::new(id, 9.0).with_comment("Whoa")).unwrap();

        let screens = run_script(&store, "2\n\n3\nMatrix\n\n3\nZzz\n\n5\n1\n\n5\n99\n\n9\n\n7\n");
        assert_eq!(store.count_movies().unwrap(), 1);

        // Listing: table header plus the movie row with its average and count
        assert!(screens.contains("# Ratings"));
        assert!(screens.contains("The Matrix"));
        assert!(screens.contains("9/10"));
        assert!(screens.contains("1 movies, 1 ratings"));

        // Search: a hit and a miss
        assert!(screens.contains("No movies found matching 'Zzz'."));

        // Details: fields, average and the rating list
        assert!(screens.contains("1999"));
        assert!(screens.contains("Director") && screens.contains("N/A"));
        assert!(screens.contains("RATINGS (1 total)"));
        assert!(screens.contains("Average Rating") && screens.contains("9.00"));
        assert!(screens.contains("Whoa"));
    }

    #[test]
    fn test_screens_for_empty_catalogue() {
        let store = MovieStore::open_in_memory().unwrap();
        let id = store.add_movie(&NewMovie::new("Alien")).unwrap();
        assert!(store.delete_movie(id).unwrap());

        let screens = run_script(&store, "2\n\n7\n");
        assert!(screens.contains("No movies in the database yet."));
        assert!(!screens.contains("# Ratings"));

        let id = store.add_movie(&NewMovie::new("Alien")).unwrap();
        let screens = run_script(&store, &format!("5\n{}\n\n7\n", id));
        assert!(screens.contains("Date Added") && screens.contains("Alien"));
        assert!(screens.contains("No ratings yet for this movie."));
    }

    #[test]
    fn test_storage_failure_returns_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.db");
        let store = MovieStore::open(&path).unwrap();

        let other = rusqlite::Connection::open(&path).unwrap();
        other.execute_batch("DROP TABLE ratings; DROP TABLE movies;").unwrap();
        drop(other);

        // Listing fails and is reported, then adding a movie fails too;
        // each failure pauses once and the session still ends on Exit
        let screens = run_script(&store, "2\n\n1\nAlien\n\n\n\n\n7\n");
        assert!(!screens.contains("# Ratings"));
        assert!(matches!(store.all_movies(), Err(Error::Storage(_))));
    }

    #[test]
    fn test_closed_input_ends_session() {
        let store = MovieStore::open_in_memory().unwrap();
        run_script(&store, "1\nAlien\n");
        assert_eq!(store.count_movies().unwrap(), 0);

        run_script(&store, "");
    }
}
