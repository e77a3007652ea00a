//! moviedb CLI - interactive Movie Rating Database

use clap::Parser;
use std::path::PathBuf;
use moviedb::config;
use moviedb::shell::Shell;
use moviedb::storage::MovieStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "moviedb")]
#[command(version)]
#[command(about = "Movie Rating Database - track movies, ratings and comments")]
#[command(long_about = r#"
moviedb keeps a catalogue of movies and your ratings in a local SQLite file
and lets you browse it through an interactive menu:
  • Add movies and rate them from 0 to 10
  • List the catalogue with average ratings
  • Search titles, view details, delete movies

Example usage:
  moviedb
  moviedb --database ~/films/movies.db
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps the menu on stdout readable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let loaded = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database_path(cli.database, loaded.as_ref());
    config::ensure_db_dir(&database)?;

    tracing::info!("Using database {:?}", database);
    let store = MovieStore::open(&database)?;

    let outcome = Shell::stdin(&store).run();
    if let Err(e) = &outcome {
        tracing::error!("Shell stopped: {}", e);
    }
    store.close()?;
    outcome?;

    Ok(())
}
