//! Element blocks and element tokens.
//!
//! A theme template declares placeholders:
//!
//! ```text
//! [[element type="html" name="intro" description="Opening paragraph"]]
//! ```
//!
//! and a markdown source fills them with typed blocks:
//!
//! ```text
//! ***HTML*** intro (Opening paragraph)
//!
//! Some **markdown** here.
//!
//! ***
//! ```
//!
//! Blocks are paired with tokens by position: the n-th block in the markdown
//! fills the n-th token in the template. The block name only guards the pair;
//! a block whose name differs from the token at the same position fills
//! nothing. See [`pair_in_declaration_order`].

use std::sync::LazyLock;

use regex::Regex;

use crate::MarkdownRenderer;

/// `[[element type="T" name="N" description="D"]]`
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\[\[element\stype="[a-zA-Z0-9]*"\sname="([a-zA-Z0-9_-]*)"\sdescription="[^"]*"\s*\]\]"#,
    )
    .expect("invalid element token regex")
});

/// `***TYPE*** name description-line\n body ***`
///
/// The body runs up to the next `*`, so it cannot contain asterisks past its
/// first character.
static BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*\*([a-zA-Z0-9]*)\*\*\*[ \t]+([a-zA-Z0-9_-]*)[^\n]*\n((?s:.)[^*]*)\*\*\*")
        .expect("invalid element block regex")
});

/// Characters trimmed from element content before insertion.
const TRIM_CHARS: &[char] = &['\n', '\t', ' '];

/// How an element block's body becomes HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// Inserted verbatim.
    Text,
    /// Rendered as markdown. Any type other than `text` behaves this way.
    Markdown,
}

impl ElementKind {
    fn from_type(kind: &str) -> Self {
        if kind.eq_ignore_ascii_case("text") {
            Self::Text
        } else {
            Self::Markdown
        }
    }
}

/// A typed section of a markdown source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementBlock {
    pub kind: ElementKind,
    /// Lower-cased block name.
    pub name: String,
    /// Raw body between the header line and the closing `***`.
    pub content: String,
}

impl ElementBlock {
    /// Produce the HTML inserted in place of the paired token.
    #[must_use]
    pub fn to_html(&self, renderer: &dyn MarkdownRenderer) -> String {
        match self.kind {
            ElementKind::Text => self.content.trim_matches(TRIM_CHARS).to_owned(),
            ElementKind::Markdown => renderer
                .render(&self.content)
                .trim_matches(TRIM_CHARS)
                .to_owned(),
        }
    }
}

/// An element placeholder declared by a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementToken {
    /// Exact token text as it appears in the template.
    pub raw: String,
    pub name: String,
}

/// Parse every element block of a markdown source, in order.
#[must_use]
pub fn parse_blocks(markdown: &str) -> Vec<ElementBlock> {
    BLOCK_PATTERN
        .captures_iter(markdown)
        .map(|caps| ElementBlock {
            kind: ElementKind::from_type(&caps[1]),
            name: caps[2].to_lowercase(),
            content: caps[3].to_owned(),
        })
        .collect()
}

/// Parse every element token of a template, in order.
#[must_use]
pub fn parse_tokens(template: &str) -> Vec<ElementToken> {
    TOKEN_PATTERN
        .captures_iter(template)
        .map(|caps| ElementToken {
            raw: caps[0].to_owned(),
            name: caps[1].to_owned(),
        })
        .collect()
}

/// Pair template tokens with markdown blocks by ordinal position.
///
/// The n-th token is paired with the n-th block, and the pair is kept only
/// if their names match case-insensitively. Blocks are never matched by name
/// alone: a markdown file listing its elements in a different order than the
/// template leaves the mismatched tokens unfilled.
#[must_use]
pub fn pair_in_declaration_order<'a>(
    tokens: &'a [ElementToken],
    blocks: &'a [ElementBlock],
) -> Vec<(&'a ElementToken, &'a ElementBlock)> {
    if tokens.len() != blocks.len() {
        tracing::debug!(
            tokens = tokens.len(),
            blocks = blocks.len(),
            "Element token and block counts differ"
        );
    }

    tokens
        .iter()
        .zip(blocks)
        .filter(|(token, block)| {
            let matched = token.name.to_lowercase() == block.name;
            if !matched {
                tracing::warn!(
                    token = %token.name,
                    block = %block.name,
                    "Element block does not match template token at same position"
                );
            }
            matched
        })
        .collect()
}
