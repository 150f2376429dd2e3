//! Project directory discovery and layout.

use std::path::{Path, PathBuf};

use crate::{CONFIG_FILENAME, ConfigError};

/// Folder holding several projects side by side.
const SITES_DIR: &str = "sites";

/// Project subdirectories a user may be standing in when building.
const CONTENT_SUBDIRS: &[&str] = &["pages", "partials", "blog"];

/// A site project on disk.
///
/// ```text
/// <root>/config.toml
/// <root>/pages/**/*.md
/// <root>/partials/*.md
/// <root>/theme/<theme>/**
/// <root>/compiled/**
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Wrap an already known project directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Locate a project from an optional name and the working directory.
    ///
    /// Resolution order:
    /// 1. `<cwd>/sites/<name>` when `cwd` contains a `sites` folder
    /// 2. `<cwd>/<name>` when `cwd` is itself the `sites` folder
    /// 3. the parent of `cwd` when standing in `pages`, `partials` or `blog`
    ///    (a given name selects a sibling project instead)
    /// 4. `<cwd>/<name>` if it exists, then `<cwd>/../<name>`
    /// 5. `cwd` itself when no name is given
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ProjectNotFound` if the resolved directory does
    /// not exist.
    pub fn locate(name: Option<&str>, cwd: &Path) -> Result<Self, ConfigError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let cwd_name = cwd.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        let root = match name {
            Some(name) if cwd.join(SITES_DIR).is_dir() => cwd.join(SITES_DIR).join(name),
            Some(name) if cwd_name == SITES_DIR => cwd.join(name),
            _ if CONTENT_SUBDIRS.contains(&cwd_name) => {
                let project_dir = cwd.parent().unwrap_or(cwd);
                match name {
                    Some(name) => project_dir.parent().unwrap_or(project_dir).join(name),
                    None => project_dir.to_path_buf(),
                }
            }
            Some(name) => {
                let nested = cwd.join(name);
                if nested.is_dir() {
                    nested
                } else {
                    cwd.parent().unwrap_or(cwd).join(name)
                }
            }
            None => cwd.to_path_buf(),
        };

        if !root.is_dir() {
            return Err(ConfigError::ProjectNotFound(root));
        }
        tracing::debug!(root = %root.display(), "Located project");
        Ok(Self { root })
    }

    /// Project root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to `config.toml`.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    /// Markdown page sources.
    #[must_use]
    pub fn pages_dir(&self) -> PathBuf {
        self.root.join("pages")
    }

    /// Markdown partial sources.
    #[must_use]
    pub fn partials_dir(&self) -> PathBuf {
        self.root.join("partials")
    }

    /// Directory of the named theme.
    #[must_use]
    pub fn theme_dir(&self, theme: &str) -> PathBuf {
        self.root.join("theme").join(theme)
    }

    /// Build output directory.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join("compiled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_layout_paths() {
        let project = Project::new(PathBuf::from("/site"));
        assert_eq!(project.config_path(), PathBuf::from("/site/config.toml"));
        assert_eq!(project.pages_dir(), PathBuf::from("/site/pages"));
        assert_eq!(project.partials_dir(), PathBuf::from("/site/partials"));
        assert_eq!(
            project.theme_dir("default"),
            PathBuf::from("/site/theme/default")
        );
        assert_eq!(project.output_dir(), PathBuf::from("/site/compiled"));
    }

    #[test]
    fn test_locate_inside_sites_folder() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sites/example.com")).unwrap();

        let project = Project::locate(Some("example.com"), dir.path()).unwrap();

        assert_eq!(project.root(), dir.path().join("sites/example.com"));
    }

    #[test]
    fn test_locate_from_sites_folder() {
        let dir = tempfile::tempdir().unwrap();
        let sites = dir.path().join("sites");
        fs::create_dir_all(sites.join("example.com")).unwrap();

        let project = Project::locate(Some("example.com"), &sites).unwrap();

        assert_eq!(project.root(), sites.join("example.com"));
    }

    #[test]
    fn test_locate_from_pages_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let pages = dir.path().join("example.com/pages");
        fs::create_dir_all(&pages).unwrap();

        let project = Project::locate(None, &pages).unwrap();

        assert_eq!(project.root(), dir.path().join("example.com"));
    }

    #[test]
    fn test_locate_sibling_from_partials_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let partials = dir.path().join("one.com/partials");
        fs::create_dir_all(&partials).unwrap();
        fs::create_dir_all(dir.path().join("two.com")).unwrap();

        let project = Project::locate(Some("two.com"), &partials).unwrap();

        assert_eq!(project.root(), dir.path().join("two.com"));
    }

    #[test]
    fn test_locate_nested_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("mysite")).unwrap();

        let project = Project::locate(Some("mysite"), dir.path()).unwrap();

        assert_eq!(project.root(), dir.path().join("mysite"));
    }

    #[test]
    fn test_locate_sibling_name() {
        let dir = tempfile::tempdir().unwrap();
        let here = dir.path().join("here");
        fs::create_dir_all(&here).unwrap();
        fs::create_dir_all(dir.path().join("there")).unwrap();

        let project = Project::locate(Some("there"), &here).unwrap();

        assert_eq!(project.root(), dir.path().join("there"));
    }

    #[test]
    fn test_locate_without_name_uses_cwd() {
        let dir = tempfile::tempdir().unwrap();

        let project = Project::locate(None, dir.path()).unwrap();

        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn test_locate_missing_project() {
        let dir = tempfile::tempdir().unwrap();

        let err = Project::locate(Some("nope"), dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::ProjectNotFound(_)));
    }
}
