//! Idempotent directory creation with change recording.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ledger::ChangeLedger;

/// Ensures `relative_path` exists as a directory chain under `root`,
/// recording a create for every directory that was (or, in dry-run, would
/// be) made.
///
/// Prefixes that already exist as directories are left untouched and produce
/// no record. A prefix occupied by anything other than a directory aborts the
/// run: silently shadowing or replacing an existing entry would destroy
/// state the ledger knows nothing about.
///
/// Returns the deepest directory of the chain.
pub fn materialize_dir(
    root: &Path,
    relative_path: &str,
    dry_run: bool,
    ledger: &mut ChangeLedger,
) -> Result<PathBuf> {
    let mut current = root.to_path_buf();
    for segment in relative_path.split('/').filter(|s| !s.is_empty()) {
        current.push(segment);
        if current.is_dir() || ledger.contains_create(&current) {
            continue;
        }
        // is_dir follows symlinks, so a symlink to a directory passes above;
        // anything else occupying the prefix is a conflict.
        if fs::symlink_metadata(&current).is_ok() {
            return Err(Error::PathConflict(current));
        }
        if !dry_run {
            fs::create_dir(&current)?;
        }
        ledger.record_create(current.clone());
    }
    Ok(current)
}
