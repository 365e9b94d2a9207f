use crate::config::{
    validate_site, validate_source, SourceKind, DEFAULT_HUBDB_BASE_URL, DEFAULT_PORTAL_ID,
    DEFAULT_TABLE_ID, DEFAULT_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::domain::model::{DataSource, OutputFormat, SiteProfile};
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub audit: AuditConfig,
    pub source: SourceConfig,
    pub site: Option<SiteConfig>,
    pub output: OutputConfig,
    pub alerts: Option<AlertsConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub r#type: SourceKind,
    pub endpoint: Option<String>,
    pub portal_id: Option<String>,
    pub table_id: Option<String>,
    pub path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub domain: String,
    pub first_party_provider: String,
    #[serde(default = "default_infrastructure_markers")]
    pub infrastructure_markers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,
    pub force_update: Option<bool>,
    pub bundle: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_infrastructure_markers() -> Vec<String> {
    SiteProfile::default().infrastructure_markers
}

fn default_formats() -> Vec<OutputFormat> {
    OutputFormat::ALL.to_vec()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuditError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AuditError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HUBDB_TABLE_ID})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            AuditError::ConfigValidationError {
                field: "env_substitution".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if self.source.r#type == SourceKind::File {
            validation::validate_required_field("source.path", &self.source.path)?;
        }
        validate_source(&self.data_source())?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }

        validation::validate_path("output.output_path", &self.output.output_path)?;

        if self.output.formats.is_empty() {
            return Err(AuditError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: "[]".to_string(),
                reason: "At least one of json, csv, markdown is required".to_string(),
            });
        }

        validate_site(&self.site_profile())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_source(&self) -> DataSource {
        let source = &self.source;
        match source.r#type {
            SourceKind::Embedded => DataSource::Embedded,
            SourceKind::Hubdb => DataSource::HubDb {
                base_url: source
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| DEFAULT_HUBDB_BASE_URL.to_string()),
                portal_id: source
                    .portal_id
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PORTAL_ID.to_string()),
                table_id: source
                    .table_id
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TABLE_ID.to_string()),
            },
            SourceKind::File => DataSource::File {
                path: source.path.clone().unwrap_or_default(),
            },
        }
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn site_profile(&self) -> SiteProfile {
        match &self.site {
            Some(site) => SiteProfile {
                domain: site.domain.clone(),
                first_party_provider: site.first_party_provider.clone(),
                infrastructure_markers: site.infrastructure_markers.clone(),
            },
            None => SiteProfile::default(),
        }
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output.formats
    }

    fn alerts_enabled(&self) -> bool {
        self.alerts.as_ref().map(|a| a.enabled).unwrap_or(true)
    }

    fn force_update(&self) -> bool {
        self.output.force_update.unwrap_or(false)
    }

    fn bundle_artifacts(&self) -> bool {
        self.output.bundle.unwrap_or(false)
    }

    fn request_timeout_secs(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
