use crate::movie::{MovieSummary, RatingEntry, SearchHit};
use tabled::{settings::Style, Table, Tabled};

/// Title column width in the catalogue listing
pub const LIST_TITLE_WIDTH: usize = 30;
/// Title column width in search results
pub const SEARCH_TITLE_WIDTH: usize = 35;
/// Genre column width
pub const GENRE_WIDTH: usize = 15;
/// Longest comment shown in full on the details screen
pub const COMMENT_WIDTH: usize = 38;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Tabled)]
pub struct MovieRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Year")]
    pub year: String,
    #[tabled(rename = "Genre")]
    pub genre: String,
    #[tabled(rename = "Avg Rating")]
    pub avg_rating: String,
    #[tabled(rename = "# Ratings")]
    pub rating_count: u32,
}

impl From<&MovieSummary> for MovieRow {
    fn from(movie: &MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: truncate_title(&movie.title, LIST_TITLE_WIDTH),
            year: format_year(movie.year),
            genre: format_genre(movie.genre.as_deref()),
            avg_rating: format_average(movie.avg_rating),
            rating_count: movie.rating_count,
        }
    }
}

#[derive(Tabled)]
pub struct SearchRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Year")]
    pub year: String,
    #[tabled(rename = "Genre")]
    pub genre: String,
    #[tabled(rename = "Avg Rating")]
    pub avg_rating: String,
}

impl From<&SearchHit> for SearchRow {
    fn from(hit: &SearchHit) -> Self {
        Self {
            id: hit.id,
            title: truncate_title(&hit.title, SEARCH_TITLE_WIDTH),
            year: format_year(hit.year),
            genre: format_genre(hit.genre.as_deref()),
            avg_rating: format_average(hit.avg_rating),
        }
    }
}

#[derive(Tabled)]
pub struct RatingRow {
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Comment")]
    pub comment: String,
}

impl From<&RatingEntry> for RatingRow {
    fn from(entry: &RatingEntry) -> Self {
        Self {
            rating: format!("{}/10", entry.rating),
            date: entry.date_rated.clone(),
            comment: format_comment(entry.comment.as_deref()),
        }
    }
}

pub fn movies_table(movies: &[MovieSummary]) -> String {
    render(movies.iter().map(MovieRow::from).collect())
}

pub fn search_table(hits: &[SearchHit]) -> String {
    render(hits.iter().map(SearchRow::from).collect())
}

pub fn ratings_table(ratings: &[RatingEntry]) -> String {
    render(ratings.iter().map(RatingRow::from).collect())
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Cut a title longer than `width` characters to `width - 2` plus ".."
pub fn truncate_title(title: &str, width: usize) -> String {
    if title.chars().count() > width {
        let kept: String = title.chars().take(width.saturating_sub(2)).collect();
        format!("{}..", kept)
    } else {
        title.to_string()
    }
}

pub fn format_year(year: Option<i64>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_genre(genre: Option<&str>) -> String {
    match genre {
        Some(g) if !g.is_empty() => g.chars().take(GENRE_WIDTH).collect(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_average(avg: Option<f64>) -> String {
    match avg {
        Some(value) => format!("{}/10", value),
        None => "Not rated".to_string(),
    }
}

/// Comments longer than `COMMENT_WIDTH` keep their first `COMMENT_WIDTH - 3`
/// characters followed by "..."
pub fn format_comment(comment: Option<&str>) -> String {
    match comment {
        Some(c) if c.chars().count() > COMMENT_WIDTH => {
            let kept: String = c.chars().take(COMMENT_WIDTH - 3).collect();
            format!("{}...", kept)
        }
        Some(c) if !c.is_empty() => c.to_string(),
        _ => "No comment".to_string(),
    }
}

/// Optional text for the details screen
pub fn or_not_available(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}
