//! Generation pipeline shared by the CLI commands.
//!
//! Collects classes from all matched files, then renders them through the
//! selected backend. Files that fail to parse do not abort the batch;
//! they are reported alongside the classes that did resolve.

use std::path::{Path, PathBuf};

use tzod::generator::BackendRegistry;
use tzod::{ParseError, ParsedClass};

use crate::error::CliResult;
use crate::matcher::FileMatcher;

/// Header prepended to every generated file.
pub const GENERATED_HEADER: &str = "// Generated by tzod. Do not edit manually.\n\n";

/// Classes collected from a batch of files, plus per-file failures.
#[derive(Debug)]
pub struct CollectOutcome {
    /// All resolved classes, in file order then declaration order.
    pub classes: Vec<ParsedClass>,

    /// Files that failed to parse, with their errors.
    pub failures: Vec<(PathBuf, ParseError)>,
}

/// Parse every matched file under `root`.
pub fn collect_classes(root: &Path, matcher: &FileMatcher) -> CliResult<CollectOutcome> {
    let files = matcher.find(root)?;

    let mut classes = Vec::new();
    let mut failures = Vec::new();
    for relative in files {
        match tzod::parse_file(&root.join(&relative)) {
            Ok(parsed) => classes.extend(parsed),
            Err(error) => failures.push((relative, error)),
        }
    }

    Ok(CollectOutcome { classes, failures })
}

/// Render collected classes through the backend serving `target`.
pub fn render(classes: &[ParsedClass], target: &str) -> CliResult<String> {
    let registry = BackendRegistry::default();
    let backend = registry.backend_for(target)?;
    Ok(format!("{}{}", GENERATED_HEADER, backend.generate(classes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use tempfile::TempDir;

    fn ts_matcher() -> FileMatcher {
        FileMatcher::new(&MatchConfig {
            include: vec!["**/*.ts".to_string()],
            exclude: vec![],
        })
        .unwrap()
    }

    #[test]
    fn test_collect_continues_past_failing_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("good.ts"),
            "export class User { id: string; }",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("bad.ts"),
            "export class Broken { cb: () => void; }",
        )
        .unwrap();

        let outcome = collect_classes(dir.path(), &ts_matcher()).unwrap();
        assert_eq!(outcome.classes.len(), 1);
        assert_eq!(outcome.classes[0].name, "User");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, PathBuf::from("bad.ts"));
    }

    #[test]
    fn test_render_prepends_header() {
        let outcome = CollectOutcome {
            classes: vec![],
            failures: vec![],
        };
        let code = render(&outcome.classes, "zod").unwrap();
        assert!(code.starts_with(GENERATED_HEADER));
        assert!(code.contains("import { z } from \"zod\";"));
    }

    #[test]
    fn test_render_unknown_target_fails() {
        let result = render(&[], "yup");
        assert!(result.is_err());
    }
}
