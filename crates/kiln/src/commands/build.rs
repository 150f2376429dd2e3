//! `kiln build` command implementation.

use clap::Args;
use kiln_config::{Project, SiteConfig};
use kiln_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Project name (default: the project in the current directory).
    pub(crate) project: Option<String>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cwd = std::env::current_dir()?;
        let project = Project::locate(self.project.as_deref(), &cwd)?;
        let config = SiteConfig::load(&project)?;

        output.highlight(&format!("Building {}", config.domain));
        output.info(&format!("Project: {}", project.root().display()));
        output.info(&format!("Theme: {}", config.theme));

        let summary = SiteBuilder::new(&project, &config).build()?;

        output.success(&format!(
            "Built {} pages to {} in {:.2}s",
            summary.pages,
            summary.output_dir.display(),
            summary.elapsed.as_secs_f64()
        ));
        Ok(())
    }
}
