//! Build error types.

use std::io;
use std::path::{Path, PathBuf};

use kiln_page::PageError;
use kiln_sitemap::SitemapError;

/// Error returned while building a site.
///
/// A build stops at the first error; the output directory may then hold a
/// partial site.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The configured theme has no directory.
    #[error("Theme not found: {}", .0.display())]
    ThemeMissing(PathBuf),

    /// A page or partial names a template the theme does not provide.
    #[error("Template not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Invalid front matter in {}: {source}", path.display())]
    FrontMatterParse {
        path: PathBuf,
        #[source]
        source: PageError,
    },

    /// Two sources resolve to the same output file.
    #[error(
        "{} and {} both compile to {}",
        first.display(),
        second.display(),
        output.display()
    )]
    OutputConflict {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Sitemap(#[from] SitemapError),
}

/// `map_err` adapter attaching a path to an I/O error.
pub(crate) fn fs_error(path: &Path) -> impl FnOnce(io::Error) -> BuildError + '_ {
    move |source| BuildError::Filesystem {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a theme template, reporting a missing file as `TemplateMissing`.
pub(crate) fn read_template(path: &Path) -> Result<String, BuildError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            BuildError::TemplateMissing(path.to_path_buf())
        } else {
            fs_error(path)(source)
        }
    })
}
