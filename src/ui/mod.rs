pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, field, header, prompt, rule, section, success, warn};
pub use table::{movies_table, ratings_table, search_table};
pub use theme::{theme, Theme};
