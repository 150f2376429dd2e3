//! Whole-site build orchestration.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use kiln_config::{Project, SiteConfig};
use kiln_page::{CommonMarkRenderer, MarkdownRenderer};

use crate::compiler::PageCompiler;
use crate::context::BuildContext;
use crate::{BuildError, navigation, partials, theme, walker, writer};

/// Result of a successful build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildSummary {
    /// Number of pages written.
    pub pages: usize,
    pub output_dir: PathBuf,
    pub sitemap_path: PathBuf,
    pub elapsed: Duration,
}

/// Builds one project into its `compiled/` directory.
///
/// ```no_run
/// use kiln_config::{Project, SiteConfig};
/// use kiln_site::SiteBuilder;
///
/// let project = Project::locate(Some("blog"), std::path::Path::new("."))?;
/// let config = SiteConfig::load(&project)?;
/// let summary = SiteBuilder::new(&project, &config).build()?;
/// println!("{} pages", summary.pages);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SiteBuilder<'a> {
    project: &'a Project,
    config: &'a SiteConfig,
    renderer: Box<dyn MarkdownRenderer>,
    build_time: DateTime<Utc>,
}

impl<'a> SiteBuilder<'a> {
    #[must_use]
    pub fn new(project: &'a Project, config: &'a SiteConfig) -> Self {
        Self {
            project,
            config,
            renderer: Box::new(CommonMarkRenderer::new()),
            build_time: Utc::now(),
        }
    }

    /// Use a different markdown renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn MarkdownRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Fix the timestamp written to the sitemap.
    #[must_use]
    pub fn with_build_time(mut self, build_time: DateTime<Utc>) -> Self {
        self.build_time = build_time;
        self
    }

    /// Run the build.
    ///
    /// Pass one compiles every page while collecting navigation and sitemap
    /// entries; pass two writes the pages once the navigation menu can be
    /// rendered.
    ///
    /// # Errors
    ///
    /// Returns the first error hit. Output written before the failure is
    /// left in place.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        let start = Instant::now();
        let theme_dir = self.project.theme_dir(&self.config.theme);
        if !theme_dir.is_dir() {
            return Err(BuildError::ThemeMissing(theme_dir));
        }
        let output_dir = self.project.output_dir();

        theme::clean_output(&output_dir)?;
        theme::copy_assets(&theme_dir, &output_dir)?;

        let mut context = BuildContext::new(self.build_time);
        context.partials = partials::preprocess(
            &self.project.partials_dir(),
            &theme_dir.join(theme::PARTIALS_DIR),
            self.renderer.as_ref(),
        )?;

        let pages_dir = self.project.pages_dir();
        let compiler = PageCompiler::new(
            pages_dir.clone(),
            theme_dir,
            output_dir.clone(),
            self.config,
            self.renderer.as_ref(),
        );
        let pages = walker::walk(&pages_dir, &output_dir, &compiler, &mut context)?;

        navigation::sort(&mut context.navigation);
        let menu = navigation::render(&context.navigation);
        writer::write_pages(&context.pages, &menu)?;

        let sitemap_path = kiln_sitemap::write(&output_dir, &context.sitemap)?;

        let elapsed = start.elapsed();
        tracing::info!(
            pages,
            output = %output_dir.display(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Site built"
        );
        Ok(BuildSummary {
            pages,
            output_dir,
            sitemap_path,
            elapsed,
        })
    }
}
