pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const WARN: &str = "⚠️";
    pub const FILM: &str = "🎬";
    pub const STAR: &str = "⭐";
    pub const SEARCH: &str = "🔍";
    pub const DATABASE: &str = "🗄️";
    pub const WAVE: &str = "👋";
}
