//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - movies(id, title, year, genre, director, date_added)
//! - ratings(id, movie_id -> movies.id ON DELETE CASCADE, rating, comment, date_rated)

pub mod schema;
pub mod sqlite;

pub use sqlite::{MovieStore, StoreStats};
