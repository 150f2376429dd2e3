//! Page directory traversal.

use std::fs;
use std::path::{Path, PathBuf};

use crate::BuildError;
use crate::compiler::{Compiled, PageCompiler};
use crate::context::BuildContext;
use crate::error::fs_error;

/// Mirror `source_dir` into `dest_dir` and compile every file in it.
///
/// Each destination directory exists before anything inside it is
/// compiled. Within a directory, files are compiled in name order before
/// descending into subdirectories, so a section page such as `docs.md` is
/// discovered ahead of `docs/*.md`. Hidden entries are ignored.
///
/// Returns the number of compiled pages.
///
/// # Errors
///
/// Propagates the first compilation or filesystem error.
pub fn walk(
    source_dir: &Path,
    dest_dir: &Path,
    compiler: &PageCompiler<'_>,
    context: &mut BuildContext,
) -> Result<usize, BuildError> {
    fs::create_dir_all(dest_dir).map_err(fs_error(dest_dir))?;

    let (files, dirs) = list_dir(source_dir)?;

    let mut compiled = 0;
    for file in &files {
        if compiler.compile(file, context)? == Compiled::Page {
            compiled += 1;
        }
    }
    for dir in &dirs {
        let Some(name) = dir.file_name() else {
            continue;
        };
        compiled += walk(dir, &dest_dir.join(name), compiler, context)?;
    }
    Ok(compiled)
}

/// Split the visible entries of `dir` into sorted files and directories.
fn list_dir(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), BuildError> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in fs::read_dir(dir).map_err(fs_error(dir))? {
        let entry = entry.map_err(fs_error(dir))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            files.push(path);
        }
    }

    files.sort();
    dirs.sort();
    Ok((files, dirs))
}
