//! Root descriptor reconciliation.

use std::collections::BTreeSet;
use std::fs;

use serde_json::{Map, Value};

use crate::config::{is_private, ShadowConfig};
use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::ledger::ChangeLedger;

/// Rewrites the root descriptor so every top-level internal namespace is
/// declared as a local `file:` dependency.
///
/// Package managers prune directory structure they did not install
/// themselves, which would destroy the shadow tree. Declared as local
/// dependencies, the namespaces are re-materialized as symlinks after a
/// pruning pass, which preserves the short import paths.
///
/// The mutation is a two-step rename-then-recreate: the pristine descriptor
/// is renamed aside first, then the reconciled content is written under the
/// original name, so a reader of the original name sees either the pristine
/// or the fully reconciled file, never a torn write. On a rerun whose entries
/// are already present the whole operation is a no-op, and an existing
/// backup is never overwritten.
pub fn reconcile_root(
    config: &ShadowConfig,
    relative_paths: &[String],
    ledger: &mut ChangeLedger,
) -> Result<()> {
    let namespaces: BTreeSet<&str> = relative_paths
        .iter()
        .map(String::as_str)
        .filter(|p| !p.is_empty() && !is_private(p) && !p.contains('/'))
        .collect();

    if namespaces.is_empty() {
        return Ok(());
    }

    let descriptor_path = config.root_descriptor_path();
    let source = Descriptor::load(&descriptor_path)?;
    let mut fields = source.fields().clone();

    let dependencies = fields
        .entry("dependencies".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let dependencies = dependencies
        .as_object_mut()
        .ok_or_else(|| Error::MalformedRootDescriptor {
            path: descriptor_path.clone(),
            message: "dependencies field is not an object".to_string(),
        })?;

    let mut changed = false;
    for namespace in namespaces {
        let key = format!("{}/{}", config.scope, namespace);
        let value = format!(
            "file:./{}/{}/{}",
            config.library_prefix, config.scope, namespace
        );
        if dependencies.get(&key).and_then(Value::as_str) != Some(value.as_str()) {
            dependencies.insert(key, Value::String(value));
            changed = true;
        }
    }

    if !changed {
        return Ok(());
    }

    let backup_path = config.backup_descriptor_path();
    if !backup_path.exists() {
        if !config.dry_run {
            fs::rename(&descriptor_path, &backup_path)?;
        }
        ledger.record_rename(descriptor_path.clone(), backup_path);
    }

    let reconciled = Descriptor::from_fields(fields);
    if !config.dry_run {
        fs::write(&descriptor_path, reconciled.to_json()?)?;
    }
    ledger.record_create(descriptor_path);
    Ok(())
}
