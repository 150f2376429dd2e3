//! Site compilation for Kiln.
//!
//! A build runs in two passes over a project:
//!
//! 1. Partials are resolved once, then every file under `pages/` is
//!    compiled to HTML while navigation and sitemap entries accumulate in a
//!    [`BuildContext`].
//! 2. The navigation menu is rendered from all entries and injected into
//!    each page before it is written, followed by `sitemap.xml.gz`.
//!
//! [`SiteBuilder`] drives both passes.

mod builder;
pub mod compiler;
mod context;
mod error;
pub mod navigation;
pub mod partials;
pub mod theme;
pub mod walker;
pub mod writer;

pub use builder::{BuildSummary, SiteBuilder};
pub use context::{BuildContext, PendingPage};
pub use error::BuildError;
