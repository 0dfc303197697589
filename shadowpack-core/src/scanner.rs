//! Package discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::DESCRIPTOR_FILENAME;
use crate::context::INSTALL_MARKER;
use crate::error::Result;

/// Discovers internal package directories under a package root.
///
/// Every directory directly containing a descriptor file is a package,
/// namespace directories included. Nested `node_modules` trees belong to
/// installed third-party dependencies and are never descended into. Private
/// packages are still reported; exclusion is the builder's decision.
pub struct Scanner {
    package_root: PathBuf,
}

impl Scanner {
    pub fn new(package_root: impl AsRef<Path>) -> Self {
        Self {
            package_root: package_root.as_ref().to_path_buf(),
        }
    }

    /// Returns the discovered package directories as sorted absolute paths.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut packages: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(&self.package_root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| e.file_name() != INSTALL_MARKER)
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_dir() && entry.path().join(DESCRIPTOR_FILENAME).is_file() {
                packages.push(entry.path().to_path_buf());
            }
        }
        packages.sort();
        Ok(packages)
    }
}
