//! Front matter support.
//!
//! A page starts with a TOML block between `+++` markers:
//!
//! ```text
//! +++
//! [Meta]
//! title = "About"
//! description = "About us"
//! keywords = "about, team"
//! author = "Jane"
//!
//! [Navigation]
//! text = "About"
//! order = "10"
//!
//! [Design]
//! template = "default"
//! +++
//! ```
//!
//! Pages without this block are not pages at all and are skipped by the
//! compiler.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::PageError;

/// Greedy match from the first `+++` to the last one in the file.
static FRONT_MATTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\+\+\+\n*(.*)\n*\+\+\+").expect("invalid front matter regex")
});

/// Decoded front matter of a single page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(rename = "Meta", alias = "meta")]
    pub meta: Meta,
    #[serde(rename = "Navigation", alias = "navigation")]
    pub navigation: NavigationMeta,
    #[serde(rename = "Design", alias = "design")]
    pub design: Design,
}

/// `[Meta]` table, exposed to templates through `[[meta name="..."]]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
}

/// `[Navigation]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavigationMeta {
    /// Menu label.
    pub text: String,
    /// Menu position, a string-encoded integer.
    pub order: String,
}

impl NavigationMeta {
    /// Integer sort key. Anything unparsable, surrounding whitespace
    /// included, sorts as `0`.
    #[must_use]
    pub fn order_key(&self) -> i64 {
        self.order.parse().unwrap_or(0)
    }
}

/// `[Design]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Design {
    /// Theme template file stem (without `.html`).
    pub template: String,
}

impl FrontMatter {
    /// Return the raw TOML between the `+++` markers, if any.
    #[must_use]
    pub fn extract(markdown: &str) -> Option<&str> {
        FRONT_MATTER_PATTERN
            .captures(markdown)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Parse the front matter of a markdown document.
    ///
    /// Returns `Ok(None)` when the document has no front matter block.
    ///
    /// # Errors
    ///
    /// Returns `PageError::FrontMatter` if the block is not valid TOML.
    pub fn parse(markdown: &str) -> Result<Option<Self>, PageError> {
        let Some(raw) = Self::extract(markdown) else {
            return Ok(None);
        };
        let front_matter = toml::from_str(raw)?;
        Ok(Some(front_matter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"+++

[Meta]
title = "About"
description = "About us"
keywords = "about, team"
author = "Jane"

[Navigation]
text = "About"
order = "10"

[Design]
template = "default"

+++

***HTML*** Body (Main content)

# About

***
"#;

    #[test]
    fn test_parse_full_front_matter() {
        let front_matter = FrontMatter::parse(PAGE).unwrap().unwrap();

        assert_eq!(
            front_matter,
            FrontMatter {
                meta: Meta {
                    title: "About".to_owned(),
                    description: "About us".to_owned(),
                    keywords: "about, team".to_owned(),
                    author: "Jane".to_owned(),
                },
                navigation: NavigationMeta {
                    text: "About".to_owned(),
                    order: "10".to_owned(),
                },
                design: Design {
                    template: "default".to_owned(),
                },
            }
        );
    }

    #[test]
    fn test_missing_block_is_none() {
        let result = FrontMatter::parse("# Just markdown\n").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let front_matter = FrontMatter::parse("+++\n[Design]\ntemplate = \"x\"\n+++\n")
            .unwrap()
            .unwrap();
        assert_eq!(front_matter.design.template, "x");
        assert_eq!(front_matter.meta, Meta::default());
        assert_eq!(front_matter.navigation.order, "");
    }

    #[test]
    fn test_malformed_block_is_error() {
        let result = FrontMatter::parse("+++\n[Meta\ntitle = \n+++\n");
        assert!(matches!(result, Err(PageError::FrontMatter(_))));
    }

    #[test]
    fn test_extract_is_greedy() {
        let raw = FrontMatter::extract("+++\na = 1\n+++\nbody\n+++\n").unwrap();
        assert_eq!(raw, "a = 1\n+++\nbody\n");
    }

    #[test]
    fn test_order_key() {
        let nav = |order: &str| NavigationMeta {
            text: String::new(),
            order: order.to_owned(),
        };
        assert_eq!(nav("5").order_key(), 5);
        assert_eq!(nav(" 12 ").order_key(), 0);
        assert_eq!(nav("-3").order_key(), -3);
        assert_eq!(nav("first").order_key(), 0);
        assert_eq!(nav("").order_key(), 0);
    }
}
