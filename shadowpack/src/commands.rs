//! Command implementations for the CLI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use shadowpack_core::context::is_installed_location;
use shadowpack_core::{
    revert_from_ledger, run, ChangeRecord, PackageOutcome, Scanner, ShadowConfig,
};
use tracing::debug;

fn resolve_config(install_root: PathBuf, scope: String, dry_run: bool) -> Result<ShadowConfig> {
    let install_root = install_root.canonicalize().with_context(|| {
        format!("Cannot resolve installation root {}", install_root.display())
    })?;
    Ok(ShadowConfig::new(install_root, scope).with_dry_run(dry_run))
}

pub fn cmd_build(install_root: PathBuf, scope: String, dry_run: bool) -> Result<()> {
    let config = resolve_config(install_root, scope, dry_run)?;

    // Outside an installed-dependency location the build is a silent no-op;
    // dry runs bypass the guard so the logic can be exercised anywhere.
    if !config.dry_run && !is_installed_location(&config.install_root) {
        debug!(
            install_root = %config.install_root.display(),
            "not an installed-dependency location; nothing to do"
        );
        return Ok(());
    }

    let packages = Scanner::new(config.package_root()).scan()?;
    let report = run(&config, &packages)?;

    println!("{}", "[Building shadow tree...]".bold().cyan());
    println!();
    println!(
        "  {} {} written, {} already present, {} private",
        "OK".green(),
        report
            .build
            .count(PackageOutcome::Written)
            .to_string()
            .bold()
            .cyan(),
        report.build.count(PackageOutcome::SkippedExisting),
        report.build.count(PackageOutcome::SkippedPrivate)
    );
    for notice in &report.build.notices {
        println!("  {} {}", "WARNING:".yellow(), notice);
    }
    println!();

    if report.changes.is_empty() {
        println!("  {} No changes", "OK".green());
    } else {
        let heading = if config.dry_run {
            "intended changes (dry run, nothing written)"
        } else {
            "changes"
        };
        println!(
            "  {} {}:",
            report.changes.len().to_string().bold().cyan(),
            heading.bold()
        );
        for change in &report.changes {
            match change {
                ChangeRecord::Create { path } => {
                    println!("  {} {}", "create".green(), path.display());
                }
                ChangeRecord::Rename { from, to } => {
                    println!(
                        "  {} {} -> {}",
                        "rename".yellow(),
                        from.display(),
                        to.display()
                    );
                }
            }
        }
    }
    println!();

    Ok(())
}

pub fn cmd_revert(install_root: PathBuf, scope: String, dry_run: bool) -> Result<()> {
    let config = resolve_config(install_root, scope, dry_run)?;
    let report = revert_from_ledger(&config)?;

    println!("{}", "[Reverting shadow tree...]".bold().cyan());
    println!();
    let heading = if config.dry_run {
        "entries would be undone (dry run)"
    } else {
        "entries undone"
    };
    println!(
        "  {} {} {}",
        "OK".green(),
        report.undone.to_string().bold().cyan(),
        heading.bold()
    );
    for notice in &report.notices {
        println!("  {} {}", "WARNING:".yellow(), notice);
    }
    println!();

    Ok(())
}

pub fn cmd_scan(install_root: PathBuf, scope: String, json: bool) -> Result<()> {
    let config = resolve_config(install_root, scope, false)?;
    let package_root = config.package_root();
    let packages = Scanner::new(&package_root).scan()?;

    let relative: Vec<String> = packages
        .iter()
        .map(|p| {
            p.strip_prefix(&package_root)
                .unwrap_or(p)
                .display()
                .to_string()
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&relative)?);
    } else {
        println!("{}", "[Scanning packages...]".bold().cyan());
        println!();

        if relative.is_empty() {
            println!("  {} No packages found", "WARNING:".yellow());
        } else {
            println!(
                "  {} Found {} {}",
                "OK".green(),
                relative.len().to_string().bold().cyan(),
                "packages".bold()
            );
            println!();
            for package in &relative {
                println!("  {}", package.bold().white());
            }
        }
        println!();
    }

    Ok(())
}
