//! Run configuration shared by every component.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Filename of a package descriptor.
pub const DESCRIPTOR_FILENAME: &str = "package.json";

/// Filename under which the pristine root descriptor is preserved.
pub const BACKUP_FILENAME: &str = "package.json.orig";

/// Filename of the persisted change ledger.
pub const LEDGER_FILENAME: &str = "shadow_changes.json";

/// Leading marker on a relative path denoting a private package.
pub const PRIVATE_PREFIX: &str = "_";

/// Whether a relative package path names a private package.
pub fn is_private(relative_path: &str) -> bool {
    relative_path.starts_with(PRIVATE_PREFIX)
}

/// Configuration for a shadow-tree run.
///
/// Components never read ambient process state; the CLI resolves flags and
/// environment variables into a `ShadowConfig` up front and passes it down.
#[derive(Debug, Clone)]
pub struct ShadowConfig {
    /// Directory of the installed distribution package
    /// (for example `.../node_modules/@stdlib/stdlib`).
    pub install_root: PathBuf,
    /// Scope under which the internal packages are published
    /// (for example `@stdlib`).
    pub scope: String,
    /// Slash-delimited path from the installation root to the directory
    /// holding the scope (for example `lib/node_modules`).
    pub library_prefix: String,
    /// When set, no filesystem mutation occurs anywhere; the same change
    /// records are still accumulated for inspection.
    pub dry_run: bool,
}

impl ShadowConfig {
    pub fn new(install_root: impl Into<PathBuf>, scope: impl Into<String>) -> Self {
        Self {
            install_root: install_root.into(),
            scope: scope.into(),
            library_prefix: "lib/node_modules".to_string(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_library_prefix(mut self, library_prefix: impl Into<String>) -> Self {
        self.library_prefix = library_prefix.into();
        self
    }

    /// Directory containing the real internal packages.
    pub fn package_root(&self) -> PathBuf {
        self.install_root
            .join(&self.library_prefix)
            .join(&self.scope)
    }

    /// Directory under which shadow entries are created: the parent of the
    /// installation root.
    pub fn destination_root(&self) -> Result<PathBuf> {
        self.install_root
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::InvalidInstallRoot(self.install_root.clone()))
    }

    /// Fixed relative address from the destination root back to the package
    /// root, slash-delimited for use inside descriptors.
    pub fn destination_offset(&self) -> Result<String> {
        let dir_name = self
            .install_root
            .file_name()
            .ok_or_else(|| Error::InvalidInstallRoot(self.install_root.clone()))?;
        Ok(format!(
            "{}/{}/{}",
            dir_name.to_string_lossy(),
            self.library_prefix,
            self.scope
        ))
    }

    pub fn root_descriptor_path(&self) -> PathBuf {
        self.install_root.join(DESCRIPTOR_FILENAME)
    }

    pub fn backup_descriptor_path(&self) -> PathBuf {
        self.install_root.join(BACKUP_FILENAME)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.install_root.join(LEDGER_FILENAME)
    }
}
