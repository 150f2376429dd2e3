//! Partial preprocessing.
//!
//! Each `partials/<name>.md` is paired with the theme fragment
//! `theme/<theme>/partials/<name>.html`, with `<name>` lower-cased. The fragment's element tokens are
//! filled from the markdown, and the result is cached under `<name>` for
//! every page to reuse.

use std::fs;
use std::path::{Path, PathBuf};

use kiln_page::{MarkdownRenderer, PartialCache, tokens};

use crate::BuildError;
use crate::error::{fs_error, read_template};

/// Resolve every partial under `partials_dir` against `fragments_dir`.
///
/// A missing `partials_dir` yields an empty cache.
///
/// # Errors
///
/// Returns `BuildError::TemplateMissing` if a partial has no fragment
/// template, or `BuildError::Filesystem` if a file cannot be read.
pub fn preprocess(
    partials_dir: &Path,
    fragments_dir: &Path,
    renderer: &dyn MarkdownRenderer,
) -> Result<PartialCache, BuildError> {
    let mut cache = PartialCache::default();
    if !partials_dir.is_dir() {
        tracing::debug!(path = %partials_dir.display(), "No partials directory");
        return Ok(cache);
    }

    for source in markdown_files(partials_dir)? {
        let Some(name) = source.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let markdown = fs::read_to_string(&source).map_err(fs_error(&source))?;
        let fragment_path = fragments_dir.join(format!("{}.html", name.to_lowercase()));
        let fragment = read_template(&fragment_path)?;

        let html = tokens::resolve_elements(fragment.trim(), &markdown, renderer);
        tracing::debug!(partial = name, "Resolved partial");
        cache.insert(name, html);
    }

    tracing::info!(count = cache.len(), "Preprocessed partials");
    Ok(cache)
}

/// `.md` files directly inside `dir`, sorted by name.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(fs_error(dir))? {
        let path = entry.map_err(fs_error(dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
