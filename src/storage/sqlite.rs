//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, ErrorCode, params, OptionalExtension};
use crate::{Result, Error};
use crate::movie::{round_rating, Movie, MovieSummary, NewMovie, NewRating, RatingEntry, SearchHit};
use super::schema;

/// SQLite-backed storage for movies and their ratings.
///
/// The store owns the only connection to the database file. Dropping it
/// releases the handle; `close` does the same but reports a failing close.
pub struct MovieStore {
    conn: Connection,
}

impl MovieStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::info!("Opened movie store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Apply connection pragmas and create any missing tables.
    /// Safe to run against an existing database.
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::CONNECTION_PRAGMAS)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Release the database handle
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Storage(e))?;
        tracing::info!("Closed movie store");
        Ok(())
    }

    // ========== Movie Operations ==========

    /// Insert a movie and return its new id
    pub fn add_movie(&self, movie: &NewMovie) -> Result<i64> {
        movie.validate()?;
        self.conn.execute(
            "INSERT INTO movies (title, year, genre, director) VALUES (?1, ?2, ?3, ?4)",
            params![movie.title, movie.year, movie.genre, movie.director],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!("Added movie {} ({:?})", id, movie.title);
        Ok(id)
    }

    /// Get a movie by id
    pub fn movie_by_id(&self, movie_id: i64) -> Result<Option<Movie>> {
        self.conn
            .query_row(
                "SELECT id, title, year, genre, director, date_added FROM movies WHERE id = ?1",
                [movie_id],
                |row| {
                    Ok(Movie {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        year: row.get(2)?,
                        genre: row.get(3)?,
                        director: row.get(4)?,
                        date_added: row.get(5)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// All movies with their average rating and rating count, ordered by title
    pub fn all_movies(&self) -> Result<Vec<MovieSummary>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT m.id, m.title, m.year, m.genre, m.director,
                   AVG(r.rating) AS avg_rating,
                   COUNT(r.id) AS rating_count
            FROM movies m
            LEFT JOIN ratings r ON m.id = r.movie_id
            GROUP BY m.id
            ORDER BY m.title, m.id
            "#,
        )?;

        let movies = stmt
            .query_map([], |row| {
                let avg: Option<f64> = row.get(5)?;
                Ok(MovieSummary {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    year: row.get(2)?,
                    genre: row.get(3)?,
                    director: row.get(4)?,
                    avg_rating: avg.map(round_rating),
                    rating_count: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("Listed {} movies", movies.len());
        Ok(movies)
    }

    /// Search movies whose title contains `term` (LIKE semantics: ASCII
    /// case-insensitive). `%`, `_` and `\` in the term match literally.
    pub fn search_movies(&self, term: &str) -> Result<Vec<SearchHit>> {
        let pattern = contains_pattern(term);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT m.id, m.title, m.year, m.genre, m.director,
                   AVG(r.rating) AS avg_rating
            FROM movies m
            LEFT JOIN ratings r ON m.id = r.movie_id
            WHERE m.title LIKE ?1 ESCAPE '\'
            GROUP BY m.id
            ORDER BY m.title, m.id
            "#,
        )?;

        let hits = stmt
            .query_map([pattern], |row| {
                let avg: Option<f64> = row.get(5)?;
                Ok(SearchHit {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    year: row.get(2)?,
                    genre: row.get(3)?,
                    director: row.get(4)?,
                    avg_rating: avg.map(round_rating),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("Search {:?} matched {} movies", term, hits.len());
        Ok(hits)
    }

    /// Delete a movie and, through the foreign key cascade, all its ratings.
    /// Returns whether a movie was removed.
    pub fn delete_movie(&self, movie_id: i64) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM movies WHERE id = ?1", [movie_id])?;
        tracing::debug!("Delete movie {}: {} row(s) removed", movie_id, removed);
        Ok(removed > 0)
    }

    // ========== Rating Operations ==========

    /// Insert a rating and return its id.
    ///
    /// Fails with `Error::IntegrityViolation` when the movie does not exist,
    /// in which case nothing is written.
    pub fn insert_rating(&self, rating: &NewRating) -> Result<i64> {
        rating.validate()?;
        let inserted = self.conn.execute(
            "INSERT INTO ratings (movie_id, rating, comment) VALUES (?1, ?2, ?3)",
            params![rating.movie_id, rating.rating, rating.comment],
        );

        match inserted {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                tracing::debug!("Added rating {} to movie {}", id, rating.movie_id);
                Ok(id)
            }
            Err(e) if is_foreign_key_violation(&e) => {
                tracing::warn!("Rejected rating for missing movie {}", rating.movie_id);
                Err(Error::IntegrityViolation { movie_id: rating.movie_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Add a rating. Returns `false` instead of failing when the movie does
    /// not exist; validation and storage failures are still errors.
    pub fn add_rating(&self, rating: &NewRating) -> Result<bool> {
        match self.insert_rating(rating) {
            Ok(_) => Ok(true),
            Err(Error::IntegrityViolation { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// All ratings of a movie, most recent first
    pub fn movie_ratings(&self, movie_id: i64) -> Result<Vec<RatingEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT rating, comment, date_rated FROM ratings WHERE movie_id = ?1 ORDER BY date_rated DESC, id DESC"
        )?;

        let ratings = stmt
            .query_map([movie_id], |row| {
                Ok(RatingEntry {
                    rating: row.get(0)?,
                    comment: row.get(1)?,
                    date_rated: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(ratings)
    }

    // ========== Statistics ==========

    /// Count all movies
    pub fn count_movies(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count all ratings
    pub fn count_ratings(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM ratings", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            movies: self.count_movies()?,
            ratings: self.count_ratings()?,
        })
    }
}

/// Build a LIKE pattern matching titles that contain `term` literally
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub movies: usize,
    pub ratings: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} movies, {} ratings", self.movies, self.ratings)
    }
}
