//! Theme token substitution.
//!
//! Templates carry four token families:
//!
//! | Token                                          | Replaced with                     |
//! |------------------------------------------------|-----------------------------------|
//! | `[[meta name="X"]]`                            | front matter `[Meta]` field `X`   |
//! | `[[element type="T" name="N" description="D"]]`| paired element block (see below)  |
//! | `[[partial name="N"]]`                         | cached partial HTML               |
//! | `[[navigation]]`                               | site navigation, after all pages  |
//!
//! [`substitute`] runs the meta, element and partial passes in that order.
//! Navigation is resolved separately by [`resolve_navigation`] once every
//! page of the site is known.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::element::{self, pair_in_declaration_order};
use crate::{FrontMatter, MarkdownRenderer, Meta, PartialCache};

/// Placeholder for the site navigation menu.
pub const NAVIGATION_TOKEN: &str = "[[navigation]]";

static META_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[\[meta\sname="([a-zA-Z0-9_-]*)"\s*\]\]"#).expect("invalid meta token regex")
});

static PARTIAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[\[partial\sname="([a-zA-Z0-9_-]*)"\s*\]\]"#)
        .expect("invalid partial token regex")
});

type MetaAccessor = fn(&Meta) -> &str;

fn meta_title(meta: &Meta) -> &str {
    &meta.title
}

fn meta_description(meta: &Meta) -> &str {
    &meta.description
}

fn meta_keywords(meta: &Meta) -> &str {
    &meta.keywords
}

fn meta_author(meta: &Meta) -> &str {
    &meta.author
}

/// Meta token names (lower-case) and the field each one reads.
const META_FIELDS: &[(&str, MetaAccessor)] = &[
    ("title", meta_title),
    ("description", meta_description),
    ("keywords", meta_keywords),
    ("author", meta_author),
];

/// Value of a `[Meta]` field by token name, ignoring case.
///
/// Unknown names resolve to an empty string.
#[must_use]
pub fn meta_value<'a>(meta: &'a Meta, name: &str) -> &'a str {
    let name = name.to_lowercase();
    META_FIELDS
        .iter()
        .find(|(field, _)| *field == name)
        .map_or("", |(_, accessor)| accessor(meta))
}

/// Replace every `[[meta name="X"]]` token.
#[must_use]
pub fn resolve_meta(template: &str, meta: &Meta) -> String {
    META_PATTERN
        .replace_all(template, |caps: &Captures<'_>| {
            meta_value(meta, &caps[1]).to_owned()
        })
        .into_owned()
}

/// Replace element tokens with the element blocks of `markdown`.
///
/// Tokens and blocks are paired by position; unpaired tokens are left in
/// place.
#[must_use]
pub fn resolve_elements(template: &str, markdown: &str, renderer: &dyn MarkdownRenderer) -> String {
    let tokens = element::parse_tokens(template);
    let blocks = element::parse_blocks(markdown);

    let mut output = template.to_owned();
    for (token, block) in pair_in_declaration_order(&tokens, &blocks) {
        output = output.replace(&token.raw, &block.to_html(renderer));
    }
    output
}

/// Replace partial tokens with cached HTML; unknown partials stay as-is.
#[must_use]
pub fn resolve_partials(template: &str, partials: &PartialCache) -> String {
    PARTIAL_PATTERN
        .replace_all(template, |caps: &Captures<'_>| {
            partials
                .get(&caps[1])
                .map_or_else(|| caps[0].to_owned(), ToOwned::to_owned)
        })
        .into_owned()
}

/// Replace the navigation token with the rendered menu.
#[must_use]
pub fn resolve_navigation(html: &str, navigation: &str) -> String {
    html.replace(NAVIGATION_TOKEN, navigation)
}

/// Run the meta, element and partial passes over a page template.
#[must_use]
pub fn substitute(
    template: &str,
    front_matter: &FrontMatter,
    markdown: &str,
    partials: &PartialCache,
    renderer: &dyn MarkdownRenderer,
) -> String {
    let output = resolve_meta(template, &front_matter.meta);
    let output = resolve_elements(&output, markdown, renderer);
    resolve_partials(&output, partials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommonMarkRenderer;
    use pretty_assertions::assert_eq;

    fn meta() -> Meta {
        Meta {
            title: "About".to_owned(),
            description: "About us".to_owned(),
            keywords: "about".to_owned(),
            author: "Jane".to_owned(),
        }
    }

    #[test]
    fn test_meta_value_lookup() {
        let meta = meta();
        assert_eq!(meta_value(&meta, "title"), "About");
        assert_eq!(meta_value(&meta, "Description"), "About us");
        assert_eq!(meta_value(&meta, "AUTHOR"), "Jane");
        assert_eq!(meta_value(&meta, "unknown"), "");
    }

    #[test]
    fn test_resolve_meta() {
        let template = r#"<title>[[meta name="title"]]</title>
<meta name="description" content="[[meta name="description"]]">
<meta name="keywords" content="[[meta name="Keywords" ]]">
<meta name="generator" content="[[meta name="generator"]]">"#;

        let html = resolve_meta(template, &meta());

        assert_eq!(
            html,
            r#"<title>About</title>
<meta name="description" content="About us">
<meta name="keywords" content="about">
<meta name="generator" content="">"#
        );
    }

    #[test]
    fn test_resolve_meta_replaces_every_occurrence() {
        let html = resolve_meta(r#"[[meta name="title"]]|[[meta name="title"]]"#, &meta());
        assert_eq!(html, "About|About");
    }

    #[test]
    fn test_resolve_meta_does_not_expand_dollar_signs() {
        let meta = Meta {
            title: "$1 deals".to_owned(),
            ..Meta::default()
        };
        assert_eq!(resolve_meta(r#"[[meta name="title"]]"#, &meta), "$1 deals");
    }

    #[test]
    fn test_resolve_elements_inserts_rendered_markdown_in_place() {
        let template =
            r#"<div>[[element type="html" name="intro" description="Intro"]]</div><footer/>"#;
        let markdown = "***HTML*** intro (Intro)\n\n## Welcome\n\nHello.\n\n***\n";

        let html = resolve_elements(template, markdown, &CommonMarkRenderer::new());

        assert_eq!(
            html,
            "<div><h2>Welcome</h2>\n<p>Hello.</p></div><footer/>"
        );
    }

    #[test]
    fn test_resolve_elements_text_is_raw() {
        let template = r#"<h1>[[element type="text" name="headline" description=""]]</h1>"#;
        let markdown = "***TEXT*** headline\n# Not a heading\n***\n";

        let html = resolve_elements(template, markdown, &CommonMarkRenderer::new());

        assert_eq!(html, "<h1># Not a heading</h1>");
    }

    #[test]
    fn test_resolve_elements_leaves_unpaired_tokens() {
        let template = r#"[[element type="text" name="a" description=""]][[element type="text" name="b" description=""]]"#;
        let markdown = "***TEXT*** a\nfirst\n***\n";

        let html = resolve_elements(template, markdown, &CommonMarkRenderer::new());

        assert_eq!(
            html,
            r#"first[[element type="text" name="b" description=""]]"#
        );
    }

    #[test]
    fn test_resolve_partials() {
        let mut partials = PartialCache::default();
        partials.insert("header", "<header>Site</header>".to_owned());

        let html = resolve_partials(
            r#"[[partial name="header"]]<main/>[[partial name="missing"]]"#,
            &partials,
        );

        assert_eq!(html, r#"<header>Site</header><main/>[[partial name="missing"]]"#);
    }

    #[test]
    fn test_resolve_navigation() {
        let html = resolve_navigation("<nav>[[navigation]]</nav>", "<ul>\n</ul>");
        assert_eq!(html, "<nav><ul>\n</ul></nav>");
    }

    #[test]
    fn test_substitute_runs_all_passes() {
        let markdown = "+++\n[Meta]\ntitle = \"Home\"\n+++\n\n***TEXT*** body\nHi\n***\n";
        let front_matter = FrontMatter::parse(markdown).unwrap().unwrap();
        let mut partials = PartialCache::default();
        partials.insert("footer", "<footer>F</footer>".to_owned());
        let template = r#"<title>[[meta name="title"]]</title><p>[[element type="text" name="body" description=""]]</p>[[partial name="footer"]][[navigation]]"#;

        let html = substitute(
            template,
            &front_matter,
            markdown,
            &partials,
            &CommonMarkRenderer::new(),
        );

        assert_eq!(
            html,
            "<title>Home</title><p>Hi</p><footer>F</footer>[[navigation]]"
        );
    }
}
