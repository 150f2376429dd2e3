//! Page output (second pass).

use std::fs;

use kiln_page::tokens;

use crate::BuildError;
use crate::context::PendingPage;
use crate::error::fs_error;

/// Insert the navigation menu into every pending page and write it out.
///
/// # Errors
///
/// Returns `BuildError::Filesystem` if a page cannot be written.
pub fn write_pages(pages: &[PendingPage], navigation: &str) -> Result<(), BuildError> {
    for page in pages {
        let html = tokens::resolve_navigation(&page.html, navigation);
        fs::write(&page.output_path, html).map_err(fs_error(&page.output_path))?;
        tracing::debug!(path = %page.output_path.display(), "Wrote page");
    }
    Ok(())
}
