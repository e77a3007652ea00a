//! # moviedb - Movie Rating Database
//!
//! A single-user catalogue of movies and their ratings, backed by SQLite.
//!
//! moviedb provides:
//! - Movie and rating records with referential integrity (cascading deletes)
//! - Aggregate views: average rating and rating count per movie
//! - An interactive text menu on top of the store

pub mod movie;
pub mod storage;
pub mod config;
pub mod ui;
pub mod shell;

// Re-exports for convenient access
pub use movie::{Movie, MovieSummary, NewMovie, NewRating, RatingEntry, SearchHit};
pub use storage::MovieStore;

/// Result type alias for moviedb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for moviedb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Movie {movie_id} does not exist")]
    IntegrityViolation { movie_id: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
