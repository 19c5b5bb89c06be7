//! Source scanning for the layering checks.

use std::fs;
use std::path::{Path, PathBuf};

/// A source line that broke a rule: `(file, line number, line)`.
pub type Hit = (String, usize, String);

/// Lines under `relative_dir` containing any of `patterns`.
pub fn find_lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    scan(relative_dir, |_, line| patterns.iter().any(|p| line.contains(p)))
}

/// Lines in `mod.rs` files other than module declarations, comments and
/// `#[cfg]` attributes.
pub fn find_non_export_lines_in_mod_files(relative_dir: &str) -> Vec<Hit> {
    scan(relative_dir, |file, line| {
        let line = line.trim();
        file.ends_with("mod.rs")
            && !(line.is_empty()
                || line.starts_with("//")
                || line.starts_with("pub mod ")
                || line.starts_with("mod ")
                || line.starts_with("#[cfg"))
    })
}

fn scan(relative_dir: &str, mut flagged: impl FnMut(&Path, &str) -> bool) -> Vec<Hit> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut hits = Vec::new();

    for file in rust_sources(&root.join(relative_dir)) {
        let source = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", file.display()));
        let shown = file
            .strip_prefix(root)
            .unwrap_or(&file)
            .display()
            .to_string();

        for (number, line) in (1..).zip(source.lines()) {
            if flagged(file.as_path(), line) {
                hits.push((shown.clone(), number, line.to_string()));
            }
        }
    }

    hits
}

/// Every `.rs` file below `dir`, sorted.
fn rust_sources(dir: &Path) -> Vec<PathBuf> {
    let mut pending = vec![dir.to_path_buf()];
    let mut sources = Vec::new();

    while let Some(next) = pending.pop() {
        let entries =
            fs::read_dir(&next).unwrap_or_else(|e| panic!("cannot list {}: {e}", next.display()));
        for entry in entries {
            let path = entry.expect("directory entry").path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                sources.push(path);
            }
        }
    }

    sources.sort();
    sources
}
