pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
use crate::domain::model::{DataSource, OutputFormat, SiteProfile};
use crate::utils::error::Result;
use crate::utils::validation;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HUBDB_BASE_URL: &str = "https://api.hubapi.com";
pub const DEFAULT_PORTAL_ID: &str = "491011";
pub const DEFAULT_TABLE_ID: &str = "130537251";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Embedded,
    Hubdb,
    File,
}

/// Shared source checks for the CLI and TOML front ends.
pub(crate) fn validate_source(source: &DataSource) -> Result<()> {
    match source {
        DataSource::Embedded => Ok(()),
        DataSource::HubDb {
            base_url,
            portal_id,
            table_id,
        } => {
            validation::validate_url("hubdb_base_url", base_url)?;
            validation::validate_non_empty_string("portal_id", portal_id)?;
            validation::validate_non_empty_string("table_id", table_id)
        }
        DataSource::File { path } => validation::validate_json_file("input", path),
    }
}

pub(crate) fn validate_site(profile: &SiteProfile) -> Result<()> {
    validation::validate_domain("site_domain", &profile.domain)?;
    validation::validate_domain("first_party_provider", &profile.first_party_provider)?;
    for marker in &profile.infrastructure_markers {
        validation::validate_non_empty_string("infrastructure_markers", marker)?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, clap::Parser)]
#[command(name = "cookie-audit")]
#[command(about = "Validate the LS Retail cookie catalogue and regenerate consent banner data")]
pub struct CliConfig {
    #[arg(long, value_enum, default_value = "embedded")]
    pub source: SourceKind,

    #[arg(long, help = "Scanner export or HubDB dump (JSON) when --source file")]
    pub input: Option<String>,

    #[arg(long, default_value = DEFAULT_HUBDB_BASE_URL)]
    pub hubdb_base_url: String,

    #[arg(long, default_value = DEFAULT_PORTAL_ID)]
    pub portal_id: String,

    #[arg(long, default_value = DEFAULT_TABLE_ID)]
    pub table_id: String,

    #[arg(long, default_value = "./automated-maintenance")]
    pub output_path: String,

    #[arg(long, default_value = "www.lsretail.com")]
    pub site_domain: String,

    #[arg(long, default_value = "lsretail.com")]
    pub first_party_provider: String,

    #[arg(long, value_delimiter = ',', default_values = ["hubspot", "hs-"])]
    pub infrastructure_markers: Vec<String>,

    #[arg(long, value_enum, value_delimiter = ',', default_values = ["json", "csv", "markdown"])]
    pub formats: Vec<OutputFormat>,

    #[arg(long, help = "Rewrite data files even when nothing changed")]
    pub force: bool,

    #[arg(long, help = "Skip alert generation")]
    pub no_alerts: bool,

    #[arg(long, help = "Also write a ZIP bundle of the data files")]
    pub bundle: bool,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_source(&self) -> DataSource {
        match self.source {
            SourceKind::Embedded => DataSource::Embedded,
            SourceKind::Hubdb => DataSource::HubDb {
                base_url: self.hubdb_base_url.clone(),
                portal_id: self.portal_id.clone(),
                table_id: self.table_id.clone(),
            },
            SourceKind::File => DataSource::File {
                path: self.input.clone().unwrap_or_default(),
            },
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn site_profile(&self) -> SiteProfile {
        SiteProfile {
            domain: self.site_domain.clone(),
            first_party_provider: self.first_party_provider.clone(),
            infrastructure_markers: self.infrastructure_markers.clone(),
        }
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn alerts_enabled(&self) -> bool {
        !self.no_alerts
    }

    fn force_update(&self) -> bool {
        self.force
    }

    fn bundle_artifacts(&self) -> bool {
        self.bundle
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.source == SourceKind::File {
            validation::validate_required_field("input", &self.input)?;
        }
        validate_source(&self.data_source())?;
        validation::validate_path("output_path", &self.output_path)?;
        validate_site(&self.site_profile())?;
        validation::validate_range("timeout_secs", self.timeout_secs, 1, 300)
    }
}
