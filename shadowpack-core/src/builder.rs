//! Shadow tree orchestration.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::{is_private, ShadowConfig, DESCRIPTOR_FILENAME};
use crate::descriptor::{synthesize_proxy, Descriptor};
use crate::error::{Error, Result};
use crate::ledger::{ChangeLedger, ChangeRecord};
use crate::materialize::materialize_dir;
use crate::reconcile::reconcile_root;
use crate::resolver::Resolver;

/// A discovered package: its real location and its identity relative to the
/// package root. The relative path is derived once, at discovery time, and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    pub absolute_path: PathBuf,
    pub relative_path: String,
}

/// Final state reached by one discovered package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageOutcome {
    /// Relative path begins with the private marker; excluded from the tree.
    SkippedPrivate,
    /// A proxy descriptor already exists at the destination; left untouched.
    SkippedExisting,
    /// Proxy descriptor written (or, in dry-run, its write recorded).
    Written,
}

/// Per-package results of a build, in discovery order.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// `(relative_path, outcome)` for every discovered package.
    pub outcomes: Vec<(String, PackageOutcome)>,
    /// Diagnostics for optional descriptor fields with unexpected shapes.
    pub notices: Vec<String>,
}

impl BuildReport {
    pub fn count(&self, outcome: PackageOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Builds the shadow tree for a set of discovered packages.
///
/// Packages are processed strictly one at a time in discovery order; ordering
/// and existence checks substitute for locking, since the run is assumed to
/// be the only writer.
pub struct ShadowBuilder {
    config: ShadowConfig,
    resolver: Resolver,
    package_root: PathBuf,
    destination_root: PathBuf,
}

impl ShadowBuilder {
    pub fn new(config: &ShadowConfig) -> Result<Self> {
        Ok(Self {
            resolver: Resolver::new(config.destination_offset()?),
            package_root: config.package_root(),
            destination_root: config.destination_root()?,
            config: config.clone(),
        })
    }

    /// Derives each discovered directory's relative identity. Done up front,
    /// so a discovery result pointing outside the package root aborts the
    /// run before any filesystem mutation.
    pub fn records(&self, discovered: &[PathBuf]) -> Result<Vec<PackageRecord>> {
        discovered
            .iter()
            .map(|path| {
                Ok(PackageRecord {
                    absolute_path: path.clone(),
                    relative_path: self.relative_path(path)?,
                })
            })
            .collect()
    }

    /// Slash-delimited path of a package directory relative to the package
    /// root.
    pub fn relative_path(&self, package_dir: &Path) -> Result<String> {
        let relative =
            package_dir
                .strip_prefix(&self.package_root)
                .map_err(|_| Error::OutsidePackageRoot {
                    path: package_dir.to_path_buf(),
                    root: self.package_root.clone(),
                })?;
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Ok(segments.join("/"))
    }

    /// Processes every discovered package. A fatal error aborts the whole
    /// run: the root-descriptor reconciliation that follows assumes the
    /// discovery result was processed exhaustively and consistently.
    pub fn build(&self, discovered: &[PathBuf], ledger: &mut ChangeLedger) -> Result<BuildReport> {
        let records = self.records(discovered)?;
        let mut report = BuildReport::default();
        for record in &records {
            let outcome = self.build_one(record, ledger, &mut report.notices)?;
            report.outcomes.push((record.relative_path.clone(), outcome));
        }
        Ok(report)
    }

    fn build_one(
        &self,
        record: &PackageRecord,
        ledger: &mut ChangeLedger,
        notices: &mut Vec<String>,
    ) -> Result<PackageOutcome> {
        let relative = record.relative_path.as_str();
        if is_private(relative) {
            return Ok(PackageOutcome::SkippedPrivate);
        }

        let source = Descriptor::load(&record.absolute_path.join(DESCRIPTOR_FILENAME))?;

        // No-op for directory chains a prior run already created.
        let shadow_dir = materialize_dir(
            &self.destination_root,
            relative,
            self.config.dry_run,
            ledger,
        )?;

        let proxy_path = shadow_dir.join(DESCRIPTOR_FILENAME);
        if proxy_path.is_file() {
            return Ok(PackageOutcome::SkippedExisting);
        }

        let proxy = synthesize_proxy(&source, relative, &self.resolver, notices)?;
        if !self.config.dry_run {
            fs::write(&proxy_path, proxy.to_json()?)?;
        }
        ledger.record_create(proxy_path);
        Ok(PackageOutcome::Written)
    }
}

/// Results of a complete run: build outcomes plus the accumulated change
/// records, including the ledger artifact's own record when one was flushed.
#[derive(Debug)]
pub struct RunReport {
    pub build: BuildReport,
    pub changes: Vec<ChangeRecord>,
}

/// Drives a complete run over a discovery result: shadow tree build, root
/// descriptor reconciliation, ledger flush.
pub fn run(config: &ShadowConfig, discovered: &[PathBuf]) -> Result<RunReport> {
    let builder = ShadowBuilder::new(config)?;
    let mut ledger = ChangeLedger::new();
    let build = builder.build(discovered, &mut ledger)?;

    let relative_paths: Vec<String> = build.outcomes.iter().map(|(p, _)| p.clone()).collect();
    reconcile_root(config, &relative_paths, &mut ledger)?;

    ledger.flush(&config.ledger_path(), config.dry_run)?;
    Ok(RunReport {
        build,
        changes: ledger.into_records(),
    })
}
