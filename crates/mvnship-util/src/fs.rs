use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::errors::MvnshipError;

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// A compiled include/exclude pattern list in the `["**", "!node_modules/**"]` style.
///
/// Patterns prefixed with `!` exclude; everything else includes. A path is
/// selected when it matches at least one include and no exclude.
#[derive(Debug, Clone)]
pub struct PatternSet {
    include: GlobSet,
    exclude: GlobSet,
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, MvnshipError> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();
        for raw in patterns {
            let raw = raw.as_ref();
            let (builder, pattern) = match raw.strip_prefix('!') {
                Some(rest) => (&mut exclude, rest),
                None => (&mut include, raw),
            };
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| MvnshipError::Config {
                    message: format!("Invalid file pattern '{raw}': {e}"),
                })?;
            builder.add(glob);
        }
        let build = |b: GlobSetBuilder| {
            b.build().map_err(|e| MvnshipError::Config {
                message: format!("Invalid file patterns: {e}"),
            })
        };
        Ok(Self {
            include: build(include)?,
            exclude: build(exclude)?,
        })
    }

    /// Whether a `/`-separated relative path is selected by this set.
    pub fn is_match(&self, relative: &str) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }
}

/// Recursively collect the files under `root` selected by `patterns`.
///
/// Returns `/`-separated paths relative to `root`, sorted. Excluded
/// directories are still descended into so that patterns such as
/// `!build/**` combined with `build/keep.txt` behave predictably.
pub fn collect_matching(root: &Path, patterns: &PatternSet) -> std::io::Result<Vec<String>> {
    let mut out = Vec::new();
    if root.is_dir() {
        collect_recursive(root, root, patterns, &mut out)?;
    }
    out.sort();
    Ok(out)
}

fn collect_recursive(
    root: &Path,
    dir: &Path,
    patterns: &PatternSet,
    out: &mut Vec<String>,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_recursive(root, &path, patterns, out)?;
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        let rel = to_slash(rel);
        if patterns.is_match(&rel) {
            out.push(rel);
        }
    }
    Ok(())
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join archive path segments with `/`, dropping empty segments.
pub fn join_slash(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|p| p.split('/'))
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}
