//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {context}: {error}")]
    Json {
        error: serde_json::Error,
        context: String,
    },

    #[error("Descriptor not found: {0}")]
    DescriptorNotFound(PathBuf),

    #[error("Package {package} has no usable main entry point; its proxy descriptor would be unusable")]
    MissingEntryPoint { package: String },

    #[error("Path conflict: {0} already exists and is not a directory")]
    PathConflict(PathBuf),

    #[error("Discovered path {path} is outside the package root {root}")]
    OutsidePackageRoot { path: PathBuf, root: PathBuf },

    #[error("Invalid installation root: {0}")]
    InvalidInstallRoot(PathBuf),

    #[error("Malformed root descriptor {path}: {message}")]
    MalformedRootDescriptor { path: PathBuf, message: String },

    #[error("Change ledger not found: {0}. Nothing to revert.")]
    LedgerNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
