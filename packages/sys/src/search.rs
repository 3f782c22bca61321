//! Non-recursive directory search by exact name or regex.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, SysError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Exact,
    Regex,
}

enum Matcher {
    Exact(String),
    Regex(Regex),
}

impl Matcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Exact(wanted) => name == wanted,
            Matcher::Regex(re) => re.is_match(name),
        }
    }
}

/// Names of the entries in `dir` that match `pattern`, sorted.
///
/// Names that are not valid UTF-8 are never matched.
pub fn search_dir(dir: impl AsRef<Path>, pattern: &str, mode: SearchMode) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let matcher = match mode {
        SearchMode::Exact => Matcher::Exact(pattern.to_string()),
        SearchMode::Regex => Matcher::Regex(Regex::new(pattern)?),
    };

    let entries =
        fs::read_dir(dir).map_err(|e| SysError::io(format!("reading {}", dir.display()), e))?;
    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SysError::io(format!("reading {}", dir.display()), e))?;
        if let Ok(name) = entry.file_name().into_string() {
            if matcher.matches(&name) {
                found.push(name);
            }
        }
    }
    found.sort();
    debug!(dir = %dir.display(), pattern, ?mode, hits = found.len(), "searched directory");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populated() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in ["alpha.txt", "beta.txt", "gamma.log"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("alpha.txt"), "deep").unwrap();
        dir
    }

    #[test]
    fn test_exact_match() {
        let dir = populated();
        assert_eq!(
            search_dir(dir.path(), "alpha.txt", SearchMode::Exact).unwrap(),
            vec!["alpha.txt"]
        );
        assert!(search_dir(dir.path(), "alpha", SearchMode::Exact)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_regex_match_is_not_recursive() {
        let dir = populated();
        assert_eq!(
            search_dir(dir.path(), r"\.txt$", SearchMode::Regex).unwrap(),
            vec!["alpha.txt", "beta.txt"]
        );
        assert_eq!(
            search_dir(dir.path(), "^n", SearchMode::Regex).unwrap(),
            vec!["nested"]
        );
    }

    #[test]
    fn test_invalid_regex() {
        let dir = populated();
        assert!(matches!(
            search_dir(dir.path(), "(", SearchMode::Regex).unwrap_err(),
            SysError::Regex(_)
        ));
    }

    #[test]
    fn test_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = search_dir(dir.path().join("gone"), "x", SearchMode::Exact).unwrap_err();
        assert!(err.io_error().is_some());
    }
}
