use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the database location, mostly for scripting and tests.
pub const DB_PATH_ENV: &str = "EATFIT_DB";

pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "eatfit").context("Could not determine home directory")?;
        Self::resolve(proj_dirs.data_dir(), std::env::var_os(DB_PATH_ENV))
    }

    fn resolve(data_dir: &Path, db_override: Option<OsString>) -> Result<Self> {
        let db_path = if let Some(path) = db_override {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
            path
        } else {
            debug!("{DB_PATH_ENV} not set, using the default data directory");
            std::fs::create_dir_all(data_dir).with_context(|| {
                format!("Failed to create data directory: {}", data_dir.display())
            })?;
            data_dir.join("eatfit.db")
        };
        debug!(db_path = %db_path.display(), "resolved configuration");

        Ok(Config { db_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_creates_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().join("nested").join("eatfit");
        let config = Config::resolve(&data_dir, None).unwrap();
        assert!(data_dir.is_dir());
        assert_eq!(config.db_path, data_dir.join("eatfit.db"));
    }

    #[test]
    fn test_override_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let custom = tmp.path().join("elsewhere").join("state.db");
        let config =
            Config::resolve(&tmp.path().join("unused"), Some(custom.clone().into())).unwrap();
        assert_eq!(config.db_path, custom);
        assert!(tmp.path().join("elsewhere").is_dir());
        assert!(!tmp.path().join("unused").exists());
    }
}
