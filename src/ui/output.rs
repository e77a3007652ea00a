use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;
use std::io::Write;

/// Width of the banner rules
pub const RULE_WIDTH: usize = 60;

pub fn header(text: &str) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("  {} {}", Icons::FILM, text.style(theme().header.clone()));
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn rule() {
    println!("{}", "-".repeat(RULE_WIDTH).style(theme().dim.clone()));
}

pub fn success(label: &str) {
    println!();
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!();
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    println!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

/// `label: value` line for a details screen
pub fn field(label: &str, value: &str) -> String {
    format!("{}: {}", label.style(theme().dim.clone()), value)
}

/// Titled block between two rules, preceded by a blank line
pub fn section(title: &str) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    format!("\n{}\n{}\n{}", rule, title.style(theme().header.clone()), rule)
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

/// Print a prompt without a trailing newline so input follows on the same line
pub fn prompt(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", text.style(theme().prompt.clone()))?;
    stdout.flush()
}
