// src/pipeline/validate.rs

//! Configuration check.

use std::path::Path;

use crate::error::Result;
use crate::models::Config;
use crate::services::NoticeExtractor;

/// Load the configuration file strictly and compile every rule table.
///
/// Unlike the other commands this never falls back to defaults: a missing,
/// malformed or mistyped file is an error. Returns the number of location
/// patterns and category rules checked.
pub fn run_validate(path: &Path) -> Result<(usize, usize)> {
    let config = match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            return Err(e);
        }
    };
    log::info!("Loaded {}", path.display());

    if let Err(e) = config.check_settings() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    // Compiles the skip-title and location patterns as a real run would.
    NoticeExtractor::from_rules(&config.extractor, None)?;

    let rules = &config.extractor;
    log::info!(
        "Config OK: {} location patterns, {} category rules",
        rules.location_patterns.len(),
        rules.categories.len()
    );
    Ok((rules.location_patterns.len(), rules.categories.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::error::AppError;

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config_passes() {
        let (_dir, path) = write_config("");
        let (patterns, categories) = run_validate(&path).unwrap();
        assert_eq!(patterns, 4);
        assert_eq!(categories, 3);
    }

    #[test]
    fn test_mistyped_field_fails() {
        let (_dir, path) = write_config("[collector]\nmax_pages = \"three\"\n");
        assert!(matches!(run_validate(&path), Err(AppError::Toml(_))));
    }

    #[test]
    fn test_broken_pattern_fails() {
        let (_dir, path) = write_config("[extractor]\nlocation_patterns = [\"(\"]\n");
        assert!(matches!(run_validate(&path), Err(AppError::Pattern { .. })));
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run_validate(&dir.path().join("absent.toml")).is_err());
    }
}
