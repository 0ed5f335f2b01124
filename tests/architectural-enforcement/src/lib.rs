//! Architectural Enforcement Integration Tests
//!
//! Source scanners shared by the tests in `tests/`. They keep production
//! code of the runtime and the terminal surface compatible with a single
//! cooperative thread:
//! - No thread sleeps, and timed waits only where a delay is the behavior
//! - No blocking I/O inside async functions
//!
//! Test code (everything after a file's `#[cfg(test)]`) is not scanned.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Production source roots, relative to the workspace root
pub const PRODUCTION_ROOTS: [&str; 2] = ["conductor/core/src", "tui/src"];

/// One offending line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line_number: usize,
    pub kind: &'static str,
    pub line: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} - {}: {}",
            self.path.display(),
            self.line_number,
            self.kind,
            self.line
        )
    }
}

/// A production line with its location and context
#[derive(Debug, Clone, Copy)]
pub struct SourceLine<'a> {
    /// Code before any `//` comment
    pub code: &'a str,
    /// Whether the line sits inside an `async fn`
    pub in_async_fn: bool,
}

/// Workspace root (two levels above this crate)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// All `.rs` files under the production roots
pub fn production_files() -> Vec<PathBuf> {
    let root = workspace_root();
    let mut files = Vec::new();

    for dir in PRODUCTION_ROOTS {
        for entry in walkdir::WalkDir::new(root.join(dir))
            .into_iter()
            .filter_map(Result::ok)
        {
            if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files
}

/// Run `check` over every production line of every production file
///
/// `check` returns the violation kind for an offending line.
pub fn scan<F>(check: F) -> Vec<Violation>
where
    F: Fn(&Path, SourceLine<'_>) -> Option<&'static str>,
{
    let mut violations = Vec::new();
    for path in production_files() {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let lines: Vec<&str> = content.lines().collect();
        for (idx, line) in production_lines(&lines).enumerate() {
            let source = SourceLine {
                code: line.split("//").next().unwrap_or(line),
                in_async_fn: is_in_async_function(&lines, idx),
            };
            if let Some(kind) = check(&path, source) {
                violations.push(Violation {
                    path: path.clone(),
                    line_number: idx + 1,
                    kind,
                    line: line.trim().to_string(),
                });
            }
        }
    }
    violations
}

/// Lines before the first `#[cfg(test)]`
pub fn production_lines<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
    lines
        .iter()
        .take_while(|line| !line.trim().starts_with("#[cfg(test)]"))
        .copied()
}

/// Whether `lines[current_idx]` is inside an `async fn`
///
/// Scans backwards for the nearest function signature.
pub fn is_in_async_function(lines: &[&str], current_idx: usize) -> bool {
    for line in lines[..=current_idx.min(lines.len().saturating_sub(1))].iter().rev() {
        let code = line.split("//").next().unwrap_or(line).trim();
        if code.contains("async fn ") {
            return true;
        }
        if code.starts_with("fn ") || code.contains(" fn ") {
            return false;
        }
        if code.starts_with("mod ") || (code.starts_with("impl") && code.contains('{')) {
            return false;
        }
    }
    false
}

/// Panic with a report if `violations` is non-empty
pub fn assert_clean(violations: &[Violation], headline: &str, hints: &[&str]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {headline}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    eprintln!();
    for hint in hints {
        eprintln!("  - {hint}");
    }

    panic!(
        "\nFound {} violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_function_detection() {
        let code = [
            "pub async fn bad() {",
            "    let s = std::fs::read_to_string(\"file.txt\");",
            "}",
        ];
        assert!(is_in_async_function(&code, 1));
    }

    #[test]
    fn test_sync_function_detection() {
        let code = [
            "pub fn load() -> String {",
            "    std::fs::read_to_string(\"config.toml\").unwrap_or_default()",
            "}",
        ];
        assert!(!is_in_async_function(&code, 1));
    }

    #[test]
    fn test_nearest_signature_wins() {
        let code = [
            "async fn outer() {",
            "}",
            "fn inner() {",
            "    std::thread::sleep(d);",
            "}",
        ];
        assert!(!is_in_async_function(&code, 3));
    }

    #[test]
    fn test_test_module_is_skipped() {
        let code = ["fn a() {}", "#[cfg(test)]", "mod tests {", "fn b() {}", "}"];
        let kept: Vec<&str> = production_lines(&code).collect();
        assert_eq!(kept, vec!["fn a() {}"]);
    }

    #[test]
    fn test_production_roots_exist() {
        let root = workspace_root();
        for dir in PRODUCTION_ROOTS {
            assert!(root.join(dir).is_dir(), "missing {dir}");
        }
        assert!(!production_files().is_empty());
    }
}
