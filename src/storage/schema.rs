//! Database schema definitions

/// Pragmas applied to every connection. Foreign keys are off by default in
/// SQLite and must be enabled per connection for the cascade to fire.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// SQL to create the movies table
pub const CREATE_MOVIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK(length(trim(title)) > 0),
    year INTEGER,
    genre TEXT,
    director TEXT,
    date_added TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the ratings table
pub const CREATE_RATINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER NOT NULL,
    rating REAL NOT NULL CHECK(rating >= 0 AND rating <= 10),
    comment TEXT,
    date_rated TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (movie_id) REFERENCES movies (id) ON DELETE CASCADE
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_ratings_movie ON ratings(movie_id)",
    "CREATE INDEX IF NOT EXISTS idx_movies_title ON movies(title)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_MOVIES_TABLE, CREATE_RATINGS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
