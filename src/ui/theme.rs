use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Ratings at or above this are shown as good
const GOOD_RATING: f64 = 7.0;
/// Ratings below this are shown as poor
const POOR_RATING: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub prompt: Style,
    pub dim: Style,
    pub good: Style,
    pub average: Style,
    pub poor: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            prompt: Style::new().bold(),
            dim: Style::new().bright_black(),
            good: Style::new().green(),
            average: Style::new().yellow(),
            poor: Style::new().red(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            prompt: Style::new(),
            dim: Style::new(),
            good: Style::new(),
            average: Style::new(),
            poor: Style::new(),
        }
    }

    /// Style for a rating value, graded by score
    pub fn rating(&self, rating: f64) -> Style {
        if rating >= GOOD_RATING {
            self.good.clone()
        } else if rating >= POOR_RATING {
            self.average.clone()
        } else {
            self.poor.clone()
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
