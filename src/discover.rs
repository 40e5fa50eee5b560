//! Source discovery — recursive glob below the source root.

use anyhow::{bail, Context, Result};
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    /// `/`-separated path relative to the source root
    pub rel: String,
    pub path: PathBuf,
}

/// Find every `*.<ext>` file below `root`, sorted by relative path.
pub fn discover(root: &Path, ext: &str) -> Result<Vec<SourceFile>> {
    if !root.is_dir() {
        bail!("source directory not found: {}", root.display());
    }

    let escaped = glob::Pattern::escape(&root.to_string_lossy());
    let pattern = format!("{}/**/*.{}", escaped, ext);
    let mut files: Vec<SourceFile> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .filter_map(|path| {
            let rel = relative_path(root, &path)?;
            Some(SourceFile { rel, path })
        })
        .collect();

    if files.is_empty() {
        warn!(root = %root.display(), ext, "no source files found");
    }

    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// "addons/fw/core/player.gd" under "addons/fw" → "core/player.gd".
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
