//! Output directory preparation and theme asset copying.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::BuildError;
use crate::error::fs_error;

/// Theme subdirectory holding partial fragment templates.
pub const PARTIALS_DIR: &str = "partials";

const TEMPLATE_EXTENSION: &str = "html";

/// Empty `output_dir`, creating it if needed.
///
/// # Errors
///
/// Returns `BuildError::Filesystem` if an entry cannot be removed.
pub fn clean_output(output_dir: &Path) -> Result<(), BuildError> {
    if !output_dir.exists() {
        return fs::create_dir_all(output_dir).map_err(fs_error(output_dir));
    }

    for entry in fs::read_dir(output_dir).map_err(fs_error(output_dir))? {
        let path = entry.map_err(fs_error(output_dir))?.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(fs_error(&path))?;
    }
    tracing::debug!(path = %output_dir.display(), "Cleaned output directory");
    Ok(())
}

/// Copy theme assets into the output directory.
///
/// Page templates at the theme root and fragment templates under
/// `partials/` are not assets and stay behind.
///
/// # Errors
///
/// Returns `BuildError::Filesystem` if a file cannot be read or copied.
pub fn copy_assets(theme_dir: &Path, output_dir: &Path) -> Result<usize, BuildError> {
    let mut files = Vec::new();
    walk_dir(theme_dir, theme_dir, &mut files).map_err(fs_error(theme_dir))?;

    let mut copied = 0;
    for (relative, source) in files {
        if is_template(&relative) {
            continue;
        }
        let dest = output_dir.join(&relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(fs_error(parent))?;
        }
        fs::copy(&source, &dest).map_err(fs_error(&source))?;
        copied += 1;
    }

    tracing::info!(theme = %theme_dir.display(), files = copied, "Copied theme assets");
    Ok(copied)
}

/// Whether a theme file (relative to the theme root) is a template.
fn is_template(relative: &Path) -> bool {
    let is_html = relative
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION));
    let mut components = relative.components();

    match (components.next(), components.next(), components.next()) {
        (Some(_), None, None) => is_html,
        (Some(dir), Some(_), None) => is_html && dir.as_os_str() == PARTIALS_DIR,
        _ => false,
    }
}

/// Collect `(relative, absolute)` paths of every file under `current`.
fn walk_dir(base: &Path, current: &Path, files: &mut Vec<(PathBuf, PathBuf)>) -> io::Result<()> {
    let mut entries = fs::read_dir(current)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk_dir(base, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(base).map(Path::to_path_buf) {
            files.push((relative, path));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_is_template() {
        assert!(is_template(Path::new("default.html")));
        assert!(is_template(Path::new("partials/header.html")));
        assert!(!is_template(Path::new("style.css")));
        assert!(!is_template(Path::new("assets/embed.html")));
        assert!(!is_template(Path::new("partials/notes.txt")));
    }

    #[test]
    fn test_clean_output_keeps_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("compiled");
        write(&output.join("old/page.html"), "stale");
        write(&output.join("stale.txt"), "stale");

        clean_output(&output).unwrap();

        assert!(output.is_dir());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
    }

    #[test]
    fn test_clean_output_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("compiled");

        clean_output(&output).unwrap();

        assert!(output.is_dir());
    }

    #[test]
    fn test_copy_assets_skips_templates() {
        let dir = tempfile::tempdir().unwrap();
        let theme = dir.path().join("theme");
        let output = dir.path().join("compiled");
        write(&theme.join("default.html"), "<html/>");
        write(&theme.join("partials/header.html"), "<header/>");
        write(&theme.join("css/site.css"), "body {}");
        write(&theme.join("assets/embed.html"), "<iframe/>");

        let copied = copy_assets(&theme, &output).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(output.join("css/site.css")).unwrap(),
            "body {}"
        );
        assert!(output.join("assets/embed.html").exists());
        assert!(!output.join("default.html").exists());
        assert!(!output.join("partials").exists());
    }
}
