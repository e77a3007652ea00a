//! Movie and rating records
//!
//! Input types (`NewMovie`, `NewRating`) validate themselves before they reach
//! storage; output types mirror the rows the store returns, in the field order
//! the shell renders them.

use crate::{Error, Result};

/// Lowest accepted rating value
pub const MIN_RATING: f64 = 0.0;
/// Highest accepted rating value
pub const MAX_RATING: f64 = 10.0;

/// A movie as stored, including its creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Store-assigned identifier, never reused
    pub id: i64,
    pub title: String,
    /// Release year
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub director: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS` (UTC), set once at insert
    pub date_added: String,
}

/// A movie to be added to the catalogue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub director: Option<String>,
}

impl NewMovie {
    /// Create a movie with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    /// Reject an empty or whitespace-only title
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A rating to be attached to an existing movie.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    pub movie_id: i64,
    pub rating: f64,
    pub comment: Option<String>,
}

impl NewRating {
    pub fn new(movie_id: i64, rating: f64) -> Self {
        Self {
            movie_id,
            rating,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_rating(self.rating)
    }
}

/// Check that a rating is a finite number within `[MIN_RATING, MAX_RATING]`
pub fn validate_rating(rating: f64) -> Result<()> {
    if !rating.is_finite() {
        return Err(Error::Validation(format!("rating must be a number, got {}", rating)));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(Error::Validation(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(())
}

/// One row of the full catalogue listing.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub director: Option<String>,
    /// Mean rating rounded to 2 decimals, `None` when the movie has no ratings
    pub avg_rating: Option<f64>,
    pub rating_count: u32,
}

/// One row of a title search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: i64,
    pub title: String,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub avg_rating: Option<f64>,
}

/// A single rating as listed on the movie details screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingEntry {
    pub rating: f64,
    pub comment: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS` (UTC), set once at insert
    pub date_rated: String,
}

/// Round to 2 decimal places, ties to even.
pub fn round_rating(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_title_rejected() {
        assert!(NewMovie::new("").validate().is_err());
        assert!(NewMovie::new("   ").validate().is_err());
        assert!(NewMovie::new("Alien").validate().is_ok());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(10.0).is_ok());
        assert!(validate_rating(7.5).is_ok());
        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(10.01).is_err());
        assert!(validate_rating(f64::NAN).is_err());
        assert!(validate_rating(f64::INFINITY).is_err());
    }

    #[test]
    fn test_round_rating() {
        assert_eq!(round_rating(7.5), 7.5);
        assert_eq!(round_rating(8.75), 8.75);
        assert_eq!(round_rating(8.0), 8.0);
        assert_eq!(round_rating(20.0 / 3.0), 6.67);
        assert_eq!(round_rating(1.0 / 3.0), 0.33);
    }

    #[test]
    fn test_builders() {
        let movie = NewMovie::new("Heat").with_year(1995).with_director("Michael Mann");
        assert_eq!(movie.year, Some(1995));
        assert_eq!(movie.genre, None);
        assert_eq!(movie.director.as_deref(), Some("Michael Mann"));

        let rating = NewRating::new(3, 9.0).with_comment("Great");
        assert_eq!(rating.comment.as_deref(), Some("Great"));
    }
}
