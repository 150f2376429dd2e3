//! Output path and link resolution.
//!
//! Examples (source paths relative to `pages/`):
//!
//! | Source           | pretty = off                    | pretty = on                          |
//! |------------------|---------------------------------|--------------------------------------|
//! | `index.md`       | `index.html`, `/`               | `index.html`, `/`                    |
//! | `about.md`       | `about.html`, `/about.html`     | `about/index.html`, `/about/`        |
//! | `docs/index.md`  | `docs/index.html`, `/docs/`     | `docs/index.html`, `/docs/`          |
//! | `docs/intro.md`  | `docs/intro.html`, `/docs/intro.html` | `docs/intro/index.html`, `/docs/intro/` |
//!
//! The natural link is always the `pretty = off` link.

use std::fs;
use std::path::{Component, Path, PathBuf};

use kiln_config::Toggle;

use crate::PageError;

const INDEX_SOURCE: &str = "index.md";
const INDEX_OUTPUT: &str = "index.html";

/// Where a compiled page is written and how it is linked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLocation {
    /// File the page HTML is written to.
    pub output_path: PathBuf,
    /// Public link in the active URL mode.
    pub link: String,
    /// Public link as if pretty URLs were off.
    pub natural_link: String,
}

/// Maps page sources to output files for one URL mode.
#[derive(Clone, Debug)]
pub struct PathResolver {
    output_root: PathBuf,
    pretty: Toggle,
}

impl PathResolver {
    #[must_use]
    pub fn new(output_root: PathBuf, pretty: Toggle) -> Self {
        Self {
            output_root,
            pretty,
        }
    }

    /// Resolve a source path, relative to the pages directory.
    ///
    /// Pure: touches nothing on disk. See [`prepare`](Self::prepare).
    #[must_use]
    pub fn locate(&self, relative_source: &Path) -> PageLocation {
        let natural = relative_source.with_extension("html");
        let relative_output = if self.pretty.is_on() {
            pretty_output(relative_source)
        } else {
            natural.clone()
        };

        PageLocation {
            output_path: self.output_root.join(&relative_output),
            link: public_link(&relative_output),
            natural_link: public_link(&natural),
        }
    }

    /// Resolve a source path and create its pretty-URL directory.
    ///
    /// # Errors
    ///
    /// Returns `PageError::CreateDir` if the directory cannot be created.
    pub fn prepare(&self, relative_source: &Path) -> Result<PageLocation, PageError> {
        let location = self.locate(relative_source);
        if self.pretty.is_on()
            && let Some(dir) = location.output_path.parent()
        {
            fs::create_dir_all(dir).map_err(|source| PageError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        Ok(location)
    }

    /// Whether a location is the site's root `index.html`.
    #[must_use]
    pub fn is_site_root(&self, location: &PageLocation) -> bool {
        location.output_path == self.output_root.join(INDEX_OUTPUT)
    }
}

/// `dir/name.md` becomes `dir/name/index.html`; `dir/index.md` becomes
/// `dir/index.html`.
fn pretty_output(relative_source: &Path) -> PathBuf {
    let parent = relative_source.parent().unwrap_or(Path::new(""));
    let is_index = relative_source
        .file_name()
        .is_some_and(|name| name == INDEX_SOURCE);

    if is_index {
        parent.join(INDEX_OUTPUT)
    } else {
        let stem = relative_source.file_stem().unwrap_or_default();
        parent.join(stem).join(INDEX_OUTPUT)
    }
}

/// Forward-slash link for an output path relative to the output root, with
/// a trailing `index.html` dropped.
fn public_link(relative_output: &Path) -> String {
    let segments: Vec<_> = relative_output
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect();

    let link = format!("/{}", segments.join("/"));
    match link.strip_suffix(INDEX_OUTPUT) {
        Some(dir) if dir.ends_with('/') => dir.to_owned(),
        _ => link,
    }
}
