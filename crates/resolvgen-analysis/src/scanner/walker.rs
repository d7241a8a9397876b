//! Sequential file walker using the `ignore` crate's `WalkBuilder`.
//!
//! Entries are visited in lexical order at every directory level, so the
//! discovery order is stable across runs and platforms.

use std::path::{Component, Path};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use resolvgen_core::config::ScanConfig;
use resolvgen_core::errors::ScanError;

use super::types::{DiscoveredFile, Discovery};

/// Directories never searched for schema files.
pub const DEFAULT_IGNORES: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    "dist",
    "target",
    ".idea",
    ".vscode",
];

/// Walk a directory tree, collecting every regular file.
///
/// Respects `.gitignore` (unless disabled), the default ignores and the
/// configured extra patterns. Any walk error aborts discovery.
pub fn walk_directory(root: &Path, config: &ScanConfig) -> Result<Discovery, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidRoot {
            root: root.to_path_buf(),
        });
    }

    let respect_gitignore = config.effective_respect_gitignore();
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .parents(false)
        .git_ignore(respect_gitignore)
        .git_global(false)
        .git_exclude(respect_gitignore)
        .require_git(false)
        .follow_links(config.effective_follow_symlinks())
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut overrides = OverrideBuilder::new(root);
    for pattern in DEFAULT_IGNORES {
        // `!dir/**` plus `!dir` excludes the directory and everything below it
        add_ignore(&mut overrides, &format!("!{pattern}/**"))?;
        add_ignore(&mut overrides, &format!("!{pattern}"))?;
    }
    for pattern in &config.extra_ignore {
        add_ignore(&mut overrides, &format!("!{pattern}"))?;
    }
    let built = overrides.build().map_err(|e| ScanError::InvalidPattern {
        pattern: "<overrides>".to_string(),
        message: e.to_string(),
    })?;
    builder.overrides(built);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| ScanError::Walk {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path().to_path_buf();
        let relative = relative_path(root, &path);
        tracing::trace!(file = %relative, "discovered");
        files.push(DiscoveredFile { path, relative });
    }

    tracing::debug!(root = %root.display(), files = files.len(), "walk complete");
    Ok(Discovery::new(files))
}

fn add_ignore(overrides: &mut OverrideBuilder, glob: &str) -> Result<(), ScanError> {
    overrides
        .add(glob)
        .map(|_| ())
        .map_err(|e| ScanError::InvalidPattern {
            pattern: glob.to_string(),
            message: e.to_string(),
        })
}

/// Render `path` relative to `root` with `/` separators.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
