use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{GradingConfig, GradingScheme};
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".autograde.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML document and validate every category section in it.
pub fn parse_and_validate_config(contents: &str) -> Result<GradingScheme> {
    let config = toml::from_str::<GradingConfig>(contents)?;
    config.resolve()
}

/// Load configuration from an explicit path. Any failure is fatal.
pub fn load_config_from_path(path: &Path) -> Result<GradingScheme> {
    let contents = read_config_file(path).map_err(|e| Error::file_system(path, e))?;
    let scheme = parse_and_validate_config(&contents).map_err(|e| match e {
        Error::Toml(source) => Error::invalid_configuration(format!(
            "failed to parse {}: {}",
            path.display(),
            source
        )),
        other => other,
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(scheme)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.autograde.toml` above `start`.
pub fn find_config_file(start: PathBuf) -> Option<PathBuf> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Discover configuration from the current directory upwards.
///
/// Falls back to the default scheme when no file exists; a file that exists
/// but does not validate is still an error.
pub fn load_config() -> Result<GradingScheme> {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return Ok(GradingScheme::default());
        }
    };

    match find_config_file(current) {
        Some(path) => load_config_from_path(&path),
        None => {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            Ok(GradingScheme::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::scoring::{CategoryKind, Outcome};
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_section() {
        let scheme = parse_and_validate_config(indoc! {r#"
            [tests]
            enabled = true
            max_score = 50
            mode = "absolute"
            failure_outcomes = ["failed", "skipped"]

            [tests.weights]
            passed = 1
            failed = -5
            skipped = 0
        "#})
        .unwrap();

        let tests = scheme.get(CategoryKind::Tests).unwrap();
        assert_eq!(tests.max_score(), 50);
        assert_eq!(tests.weight(Outcome::Failed), -5);
        assert!(tests.is_failure(Outcome::Skipped));
        assert!(scheme.get(CategoryKind::Analysis).is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_outcome_key() {
        let err = parse_and_validate_config(indoc! {r#"
            [mutations.weights]
            killed = 1
        "#})
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_parse_rejects_relative_analysis() {
        let err = parse_and_validate_config(indoc! {r#"
            [analysis]
            mode = "relative"
        "#})
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_empty_document_configures_nothing() {
        let scheme = parse_and_validate_config("").unwrap();
        assert!(scheme.categories().is_empty());
    }

    #[test]
    fn test_load_from_path_reports_parse_errors_as_configuration_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[tests\nmax_score = ").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_load_from_missing_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config_from_path(&dir.path().join("missing.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();

        let found = find_config_file(nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let ancestors: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(
            ancestors,
            vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]
        );
    }
}
