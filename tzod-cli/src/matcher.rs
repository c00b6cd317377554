//! Glob-based source file discovery.
//!
//! Walks a root directory (respecting `.gitignore`) and keeps the files
//! whose root-relative path matches the include patterns and none of the
//! exclude patterns. Include patterns prefixed with `!` are negations:
//! a path matching one is dropped even if a positive pattern matched.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::config::MatchConfig;
use crate::error::{CliResult, MatcherError};

/// Compiled file matcher.
#[derive(Debug)]
pub struct FileMatcher {
    include: Vec<glob::Pattern>,
    negated: Vec<glob::Pattern>,
    exclude: Vec<glob::Pattern>,
}

impl FileMatcher {
    /// Compile a matcher from configured patterns.
    pub fn new(config: &MatchConfig) -> Result<Self, MatcherError> {
        let mut include = Vec::new();
        let mut negated = Vec::new();
        for pattern in &config.include {
            match pattern.strip_prefix('!') {
                Some(rest) => negated.push(compile(rest)?),
                None => include.push(compile(pattern)?),
            }
        }
        let exclude = config
            .exclude
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            include,
            negated,
            exclude,
        })
    }

    /// Whether a root-relative path is selected.
    pub fn matches(&self, relative: &Path) -> bool {
        if !self.include.iter().any(|p| p.matches_path(relative)) {
            return false;
        }
        if self.negated.iter().any(|p| p.matches_path(relative)) {
            return false;
        }
        !self.exclude.iter().any(|p| p.matches_path(relative))
    }

    /// Find all matching files under `root`, as sorted root-relative paths.
    ///
    /// A matcher with no positive include patterns selects nothing.
    pub fn find(&self, root: &Path) -> CliResult<Vec<PathBuf>> {
        if !root.exists() {
            return Err(MatcherError::root_not_found(root.to_path_buf()).into());
        }
        if self.include.is_empty() {
            return Ok(Vec::new());
        }

        let walker = WalkBuilder::new(root)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .hidden(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(MatcherError::Walk)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            if self.matches(relative) {
                files.push(relative.to_path_buf());
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }
}

fn compile(pattern: &str) -> Result<glob::Pattern, MatcherError> {
    glob::Pattern::new(pattern)
        .map_err(|e| MatcherError::invalid_pattern(pattern, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(include: &[&str], exclude: &[&str]) -> FileMatcher {
        FileMatcher::new(&MatchConfig {
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_default_pattern_matches_ts_files() {
        let m = matcher(&["**/*.ts"], &[]);
        assert!(m.matches(Path::new("models/user.ts")));
        assert!(m.matches(Path::new("user.ts")));
        assert!(!m.matches(Path::new("user.js")));
    }

    #[test]
    fn test_negated_include_drops_matches() {
        let m = matcher(&["**/*.ts", "!**/*.test.ts"], &[]);
        assert!(m.matches(Path::new("src/user.ts")));
        assert!(!m.matches(Path::new("src/user.test.ts")));
    }

    #[test]
    fn test_exclude_patterns() {
        let m = matcher(&["**/*.ts"], &["vendor/**"]);
        assert!(m.matches(Path::new("src/user.ts")));
        assert!(!m.matches(Path::new("vendor/lib.ts")));
    }

    #[test]
    fn test_only_negations_select_nothing() {
        let m = matcher(&["!**/*.test.ts"], &[]);
        assert!(!m.matches(Path::new("src/user.ts")));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let result = FileMatcher::new(&MatchConfig {
            include: vec!["[".to_string()],
            exclude: vec![],
        });
        assert!(matches!(
            result.unwrap_err(),
            MatcherError::InvalidPattern { .. }
        ));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let m = matcher(&["**/*.ts"], &[]);
        let err = m.find(Path::new("/nonexistent/path")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Match(MatcherError::RootNotFound { .. })
        ));
    }
}
