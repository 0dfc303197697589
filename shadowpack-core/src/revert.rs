//! Reversal of a recorded run.

use std::fs;

use crate::config::ShadowConfig;
use crate::error::Result;
use crate::ledger::{ChangeLedger, ChangeRecord};

/// Summary of a revert pass.
#[derive(Debug, Default)]
pub struct RevertReport {
    /// Number of ledger entries undone.
    pub undone: usize,
    /// Entries whose target no longer existed and were skipped.
    pub notices: Vec<String>,
}

/// Undoes every recorded change in reverse order.
///
/// A `create` is undone by deleting the path (files before the directories
/// that contain them, which reverse order guarantees are already empty by
/// then); a `rename` is undone by renaming back. A path that no longer
/// exists is reported and skipped so a partially reverted tree can be
/// reverted again.
pub fn revert(config: &ShadowConfig, records: &[ChangeRecord]) -> Result<RevertReport> {
    let mut report = RevertReport::default();
    for record in records.iter().rev() {
        match record {
            ChangeRecord::Create { path } => {
                let metadata = match fs::symlink_metadata(path) {
                    Ok(metadata) => metadata,
                    Err(_) => {
                        report
                            .notices
                            .push(format!("{}: already gone; skipped", path.display()));
                        continue;
                    }
                };
                if !config.dry_run {
                    if metadata.is_dir() {
                        fs::remove_dir(path)?;
                    } else {
                        fs::remove_file(path)?;
                    }
                }
                report.undone += 1;
            }
            ChangeRecord::Rename { from, to } => {
                if to.exists() {
                    if !config.dry_run {
                        fs::rename(to, from)?;
                    }
                    report.undone += 1;
                } else {
                    report
                        .notices
                        .push(format!("{}: already gone; skipped", to.display()));
                }
            }
        }
    }
    Ok(report)
}

/// Loads the persisted ledger for `config` and reverts it.
pub fn revert_from_ledger(config: &ShadowConfig) -> Result<RevertReport> {
    let records = ChangeLedger::load(&config.ledger_path())?;
    revert(config, &records)
}
