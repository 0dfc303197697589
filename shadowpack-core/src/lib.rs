//! Core library for shadow-tree generation.

pub mod builder;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod ledger;
pub mod materialize;
pub mod reconcile;
pub mod resolver;
pub mod revert;
pub mod scanner;

pub use builder::{run, BuildReport, PackageOutcome, PackageRecord, RunReport, ShadowBuilder};
pub use config::ShadowConfig;
pub use descriptor::Descriptor;
pub use error::{Error, Result};
pub use ledger::{ChangeLedger, ChangeRecord};
pub use resolver::Resolver;
pub use revert::{revert, revert_from_ledger, RevertReport};
pub use scanner::Scanner;
