//! Site navigation menu.
//!
//! Every compiled page contributes one [`NavigationEntry`]. Once all pages
//! are known the entries are sorted by their `order` and rendered as a list
//! nested at most two levels deep (indented with tabs in the output):
//!
//! ```text
//! <ul>
//!     <li><a href="/docs/">Docs</a>
//!         <ul>
//!             <li><a href="/docs/intro/">Intro</a></li>
//!         </ul>
//!     </li>
//!     <li><a href="/contact/">Contact</a></li>
//! </ul>
//! ```

use std::fmt::Write;

/// Nesting level of a menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
    Top,
    Nested,
}

impl Depth {
    /// Depth from the natural link: three `/`-separated segments
    /// (`/docs/intro.html`) nest, anything else is top level.
    #[must_use]
    pub fn from_natural_link(natural_link: &str) -> Self {
        if natural_link.split('/').count() == 3 {
            Self::Nested
        } else {
            Self::Top
        }
    }
}

/// One page's place in the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationEntry {
    pub text: String,
    pub order: i64,
    pub link: String,
    pub natural_link: String,
    pub depth: Depth,
}

impl NavigationEntry {
    #[must_use]
    pub fn new(text: String, order: i64, link: String, natural_link: String) -> Self {
        let depth = Depth::from_natural_link(&natural_link);
        Self {
            text,
            order,
            link,
            natural_link,
            depth,
        }
    }

    /// Whether `other` sits in the section this page introduces:
    /// `/docs.html` owns `/docs/...`, while `/` owns nothing.
    #[must_use]
    pub fn owns(&self, other: &Self) -> bool {
        self.natural_link
            .strip_suffix(".html")
            .and_then(|stem| other.natural_link.strip_prefix(stem))
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Sort entries by `order`, keeping discovery order on ties.
pub fn sort(entries: &mut [NavigationEntry]) {
    entries.sort_by_key(|entry| entry.order);
}

/// Render sorted entries as the navigation HTML.
///
/// A top-level entry directly followed by a nested entry of its own
/// section becomes the parent item of that list. Any other nested entry
/// following a top-level one opens the nested list itself.
#[must_use]
pub fn render(entries: &[NavigationEntry]) -> String {
    let mut html = String::from("<ul>\n");
    let mut nested_open = false;

    for (i, entry) in entries.iter().enumerate() {
        let opens_children = entries
            .get(i + 1)
            .is_some_and(|next| next.depth == Depth::Nested && entry.owns(next));

        match (entry.depth, nested_open) {
            (Depth::Nested, true) => {
                let _ = writeln!(html, "\t\t\t{}", list_item(entry));
            }
            (Depth::Nested, false) => {
                push_parent_item(&mut html, entry);
                nested_open = true;
            }
            (Depth::Top, was_open) => {
                if was_open {
                    html.push_str("\t\t</ul>\n\t</li>\n");
                }
                if opens_children {
                    push_parent_item(&mut html, entry);
                } else {
                    let _ = writeln!(html, "\t{}", list_item(entry));
                }
                nested_open = opens_children;
            }
        }
    }

    if nested_open {
        html.push_str("\t\t</ul>\n\t</li>\n");
    }
    html.push_str("</ul>");
    html
}

fn list_item(entry: &NavigationEntry) -> String {
    format!("<li>{}</li>", anchor(entry))
}

fn push_parent_item(html: &mut String, entry: &NavigationEntry) {
    let _ = write!(html, "\t<li>{}\n\t\t<ul>\n", anchor(entry));
}

fn anchor(entry: &NavigationEntry) -> String {
    format!(r#"<a href="{}">{}</a>"#, entry.link, entry.text)
}
