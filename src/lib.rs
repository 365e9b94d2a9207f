pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{etl::EtlEngine, pipeline::MaintenancePipeline};
pub use domain::model::{
    Alert, Category, ChangeSet, CookieRecord, DataSource, MaintenanceReport, OutputFormat,
    SiteProfile, Snapshot, ValidatedRecord, ValidationIssue,
};
pub use utils::error::{AuditError, Result};
