//! Page-level building blocks for Kiln.
//!
//! This crate provides everything needed to turn one markdown source into
//! one HTML page, without knowledge of the surrounding site:
//! - [`FrontMatter`]: the `+++` delimited TOML block at the head of a page
//! - [`element`]: element blocks in markdown and element tokens in templates
//! - [`tokens`]: meta, element, partial and navigation token substitution
//! - [`PathResolver`]: source path to output path and public links
//! - [`MarkdownRenderer`]: the markdown-to-HTML seam
//!
//! # Example
//!
//! ```
//! use kiln_page::{CommonMarkRenderer, FrontMatter, PartialCache, tokens};
//!
//! let markdown = "+++\n[Meta]\ntitle = \"Home\"\n+++\n\n***HTML*** intro (Intro)\n# Hi\n***\n";
//! let template = "<title>[[meta name=\"title\"]]</title>\
//!     [[element type=\"html\" name=\"intro\" description=\"Intro\"]]";
//!
//! let front_matter = FrontMatter::parse(markdown).unwrap().unwrap();
//! let html = tokens::substitute(
//!     template,
//!     &front_matter,
//!     markdown,
//!     &PartialCache::default(),
//!     &CommonMarkRenderer::new(),
//! );
//! assert_eq!(html, "<title>Home</title><h1>Hi</h1>");
//! ```

pub mod element;
mod error;
mod front_matter;
mod markdown;
mod partial;
mod path;
pub mod tokens;

pub use error::PageError;
pub use front_matter::{Design, FrontMatter, Meta, NavigationMeta};
pub use markdown::{CommonMarkRenderer, MarkdownRenderer};
pub use partial::PartialCache;
pub use path::{PageLocation, PathResolver};
