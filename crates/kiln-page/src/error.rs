//! Page error types.

use std::path::PathBuf;

/// Error returned while reading or decoding a page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Front matter block exists but is not valid TOML for the schema.
    #[error("{0}")]
    FrontMatter(#[from] toml::de::Error),

    /// Output directory for a pretty URL could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
