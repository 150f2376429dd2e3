//! State carried across the two build passes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use kiln_page::PartialCache;
use kiln_sitemap::SitemapEntry;

use crate::BuildError;
use crate::navigation::NavigationEntry;

/// A compiled page waiting for the navigation menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingPage {
    pub output_path: PathBuf,
    pub html: String,
}

/// Everything one build accumulates.
///
/// Created fresh for every build and passed explicitly through the
/// passes, so two builds never share state.
#[derive(Debug)]
pub struct BuildContext {
    pub build_time: DateTime<Utc>,
    pub partials: PartialCache,
    pub pages: Vec<PendingPage>,
    pub navigation: Vec<NavigationEntry>,
    pub sitemap: Vec<SitemapEntry>,
    /// Output path to the source that claimed it.
    claimed: HashMap<PathBuf, PathBuf>,
}

impl BuildContext {
    #[must_use]
    pub fn new(build_time: DateTime<Utc>) -> Self {
        Self {
            build_time,
            partials: PartialCache::default(),
            pages: Vec::new(),
            navigation: Vec::new(),
            sitemap: Vec::new(),
            claimed: HashMap::new(),
        }
    }

    /// Record that `source` compiles to `output`.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::OutputConflict` if another source already
    /// compiles to the same file.
    pub fn claim_output(&mut self, output: &Path, source: &Path) -> Result<(), BuildError> {
        if let Some(first) = self.claimed.get(output) {
            return Err(BuildError::OutputConflict {
                output: output.to_path_buf(),
                first: first.clone(),
                second: source.to_path_buf(),
            });
        }
        self.claimed
            .insert(output.to_path_buf(), source.to_path_buf());
        Ok(())
    }
}
