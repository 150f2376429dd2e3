//! Per-page compilation (first pass).

use std::fs;
use std::path::{Path, PathBuf};

use kiln_config::SiteConfig;
use kiln_page::{FrontMatter, MarkdownRenderer, PathResolver, tokens};
use kiln_sitemap::SitemapEntry;

use crate::BuildError;
use crate::context::{BuildContext, PendingPage};
use crate::error::{fs_error, read_template};
use crate::navigation::NavigationEntry;

/// Outcome of compiling one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compiled {
    Page,
    /// The file has no front matter and is not a page.
    Skipped,
}

/// Turns page sources into pending pages plus their navigation and sitemap
/// entries.
pub struct PageCompiler<'a> {
    pages_dir: PathBuf,
    theme_dir: PathBuf,
    base_url: String,
    resolver: PathResolver,
    renderer: &'a dyn MarkdownRenderer,
}

impl<'a> PageCompiler<'a> {
    #[must_use]
    pub fn new(
        pages_dir: PathBuf,
        theme_dir: PathBuf,
        output_dir: PathBuf,
        config: &SiteConfig,
        renderer: &'a dyn MarkdownRenderer,
    ) -> Self {
        Self {
            pages_dir,
            theme_dir,
            base_url: format!("{}{}", config.scheme(), config.domain.trim_end_matches('/')),
            resolver: PathResolver::new(output_dir, config.pretty),
            renderer,
        }
    }

    /// Compile `source` into `context`.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::FrontMatterParse` for malformed front matter,
    /// `BuildError::TemplateMissing` if the chosen template does not exist,
    /// and `BuildError::Filesystem` for I/O failures.
    pub fn compile(&self, source: &Path, context: &mut BuildContext) -> Result<Compiled, BuildError> {
        let bytes = fs::read(source).map_err(fs_error(source))?;
        let Ok(markdown) = String::from_utf8(bytes) else {
            tracing::debug!(path = %source.display(), "Not UTF-8 text, skipping");
            return Ok(Compiled::Skipped);
        };

        let front_matter = FrontMatter::parse(&markdown).map_err(|err| BuildError::FrontMatterParse {
            path: source.to_path_buf(),
            source: err,
        })?;
        let Some(front_matter) = front_matter else {
            tracing::debug!(path = %source.display(), "No front matter, skipping");
            return Ok(Compiled::Skipped);
        };

        let template_path = self
            .theme_dir
            .join(format!("{}.html", front_matter.design.template));
        let template = read_template(&template_path)?;

        let html = tokens::substitute(
            &template,
            &front_matter,
            &markdown,
            &context.partials,
            self.renderer,
        );

        let relative = source.strip_prefix(&self.pages_dir).unwrap_or(source);
        let location = self.resolver.prepare(relative)?;
        context.claim_output(&location.output_path, source)?;

        context.sitemap.push(SitemapEntry::for_page(
            format!("{}{}", self.base_url, location.link),
            context.build_time,
            self.resolver.is_site_root(&location),
        ));
        context.navigation.push(NavigationEntry::new(
            front_matter.navigation.text.clone(),
            front_matter.navigation.order_key(),
            location.link.clone(),
            location.natural_link,
        ));

        tracing::debug!(
            path = %source.display(),
            output = %location.output_path.display(),
            template = %front_matter.design.template,
            "Compiled page"
        );
        context.pages.push(PendingPage {
            output_path: location.output_path,
            html,
        });
        Ok(Compiled::Page)
    }
}
