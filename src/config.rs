use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MovieDbConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("moviedb.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("movies.db")
}

/// Load the config file.
///
/// A missing default `moviedb.toml` means "no config"; a missing file named
/// with `--config` is an error, as is a `database` key set to an empty string.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Option<MovieDbConfig>> {
    let path = match explicit {
        Some(path) if !path.is_file() => {
            anyhow::bail!("config file {} not found", path.display());
        }
        Some(path) => path.to_path_buf(),
        None => {
            let path = default_config_path();
            if !path.is_file() {
                return Ok(None);
            }
            path
        }
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: MovieDbConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing config {}", path.display()))?;

    if config.database.as_deref().is_some_and(|db| db.trim().is_empty()) {
        anyhow::bail!("config {}: `database` must not be empty", path.display());
    }

    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

/// Pick the database location: explicit flag, then config file, then the default.
pub fn resolve_database_path(flag: Option<PathBuf>, config: Option<&MovieDbConfig>) -> PathBuf {
    flag.or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(default_database_path)
}

/// Make sure the database file can be created: the path must not name a
/// directory, and a missing parent directory is created.
pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if db_path.is_dir() {
        anyhow::bail!("database path {} is a directory", db_path.display());
    }

    let parent = db_path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent.filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating database directory {}", parent.display()))?;
        tracing::info!("Created database directory {}", parent.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_empty_database_key_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviedb.toml");
        std::fs::write(&path, "database = \"  \"\n").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_config_without_database_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviedb.toml");
        std::fs::write(&path, "").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database, None);
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviedb.toml");
        std::fs::write(&path, "database = \"data/catalogue.db\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database.as_deref(), Some("data/catalogue.db"));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviedb.toml");
        std::fs::write(&path, "database = [").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_database_path_precedence() {
        let config = MovieDbConfig {
            database: Some("from_config.db".to_string()),
        };

        assert_eq!(
            resolve_database_path(Some(PathBuf::from("flag.db")), Some(&config)),
            PathBuf::from("flag.db")
        );
        assert_eq!(resolve_database_path(None, Some(&config)), PathBuf::from("from_config.db"));
        assert_eq!(resolve_database_path(None, Some(&MovieDbConfig::default())), default_database_path());
        assert_eq!(resolve_database_path(None, None), default_database_path());
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("movies.db");

        ensure_db_dir(&db_path).unwrap();
        assert!(dir.path().join("nested").is_dir());
        ensure_db_dir(Path::new("movies.db")).unwrap();
    }

    #[test]
    fn test_ensure_db_dir_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_db_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }
}
