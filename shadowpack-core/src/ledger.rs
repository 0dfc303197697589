//! Append-only record of filesystem mutations.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A single filesystem mutation.
///
/// Serialized as a JSON tuple: `["create", path]` or
/// `["rename", from, to]`. The tuple form is the contract with the revert
/// collaborator, which undoes entries in reverse order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeRecord {
    Create { path: PathBuf },
    Rename { from: PathBuf, to: PathBuf },
}

impl Serialize for ChangeRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ChangeRecord::Create { path } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("create")?;
                seq.serialize_element(&path.to_string_lossy())?;
                seq.end()
            }
            ChangeRecord::Rename { from, to } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("rename")?;
                seq.serialize_element(&from.to_string_lossy())?;
                seq.serialize_element(&to.to_string_lossy())?;
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ChangeRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = ChangeRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a [kind, path, ...] change tuple")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let kind: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                match kind.as_str() {
                    "create" => {
                        let path: String = seq
                            .next_element()?
                            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                        Ok(ChangeRecord::Create {
                            path: PathBuf::from(path),
                        })
                    }
                    "rename" => {
                        let from: String = seq
                            .next_element()?
                            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                        let to: String = seq
                            .next_element()?
                            .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                        Ok(ChangeRecord::Rename {
                            from: PathBuf::from(from),
                            to: PathBuf::from(to),
                        })
                    }
                    other => Err(de::Error::unknown_variant(other, &["create", "rename"])),
                }
            }
        }

        deserializer.deserialize_seq(RecordVisitor)
    }
}

/// Accumulates every mutation performed (or, in dry-run, intended) during a
/// run, for later reversal.
#[derive(Debug, Default)]
pub struct ChangeLedger {
    records: Vec<ChangeRecord>,
}

impl ChangeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_create(&mut self, path: impl Into<PathBuf>) {
        self.records.push(ChangeRecord::Create { path: path.into() });
    }

    pub fn record_rename(&mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) {
        self.records.push(ChangeRecord::Rename {
            from: from.into(),
            to: to.into(),
        });
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// Whether a create has already been recorded for `path`. In dry-run
    /// mode this is what distinguishes a directory the run would already
    /// have created from one that is genuinely missing.
    pub fn contains_create(&self, path: &Path) -> bool {
        self.records
            .iter()
            .any(|r| matches!(r, ChangeRecord::Create { path: p } if p == path))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<ChangeRecord> {
        self.records
    }

    /// Persists the full record sequence to `path`, first appending a final
    /// record naming the artifact itself so that a revert removes it too.
    ///
    /// A ledger with no accumulated records is not persisted: a no-op rerun
    /// must not overwrite the ledger of the run that actually mutated the
    /// tree. In dry-run mode nothing is written either; the record sequence
    /// is still extended and returned for inspection.
    pub fn flush(&mut self, path: &Path, dry_run: bool) -> Result<&[ChangeRecord]> {
        if self.records.is_empty() {
            return Ok(&self.records);
        }

        self.record_create(path.to_path_buf());
        if !dry_run {
            let mut serialized =
                serde_json::to_string(&self.records).map_err(|error| Error::Json {
                    error,
                    context: path.display().to_string(),
                })?;
            serialized.push('\n');
            fs::write(path, serialized)?;
        }
        Ok(&self.records)
    }

    /// Loads a previously persisted ledger.
    pub fn load(path: &Path) -> Result<Vec<ChangeRecord>> {
        if !path.is_file() {
            return Err(Error::LedgerNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|error| Error::Json {
            error,
            context: path.display().to_string(),
        })
    }
}
