use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Consent category as reported by the HubSpot cookie scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Necessary,
    Functionality,
    Analytics,
    Advertisement,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Necessary,
        Category::Functionality,
        Category::Analytics,
        Category::Advertisement,
    ];

    /// HubDB `category_key`; the banner depends on these values.
    pub fn key(self) -> &'static str {
        match self {
            Category::Necessary => "1",
            Category::Functionality => "2",
            Category::Analytics => "3",
            Category::Advertisement => "4",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key.trim())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Necessary => "necessary",
            Category::Functionality => "functionality",
            Category::Analytics => "analytics",
            Category::Advertisement => "advertisement",
        }
    }

    /// Category id used by the banner UI.
    pub fn banner_id(self) -> &'static str {
        match self {
            Category::Necessary => "essential",
            Category::Functionality => "functional",
            Category::Analytics => "analytics",
            Category::Advertisement => "marketing",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Necessary => "Essential Cookies",
            Category::Functionality => "Functional Cookies",
            Category::Analytics => "Analytics Cookies",
            Category::Advertisement => "Marketing Cookies",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Category::Necessary)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub provider: String,
    pub category: Category,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub description: String,
}

impl CookieRecord {
    /// Change-detection key. Not unique across the scanner data.
    pub fn key(&self) -> String {
        format!("{}_{}", self.name, self.provider)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssue {
    #[serde(rename = "Missing description")]
    MissingDescription,
    #[serde(rename = "Suspicious domain attribution")]
    SuspiciousDomainAttribution,
    #[serde(rename = "Suspicious category assignment")]
    SuspiciousCategoryAssignment,
}

impl ValidationIssue {
    pub fn label(self) -> &'static str {
        match self {
            ValidationIssue::MissingDescription => "Missing description",
            ValidationIssue::SuspiciousDomainAttribution => "Suspicious domain attribution",
            ValidationIssue::SuspiciousCategoryAssignment => "Suspicious category assignment",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A cookie record after the validation rules have run over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedRecord {
    pub name: String,
    pub provider: String,
    pub category: Category,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub expiry: String,
    pub description: String,
    #[serde(default)]
    pub validation_issues: Vec<ValidationIssue>,
    #[serde(default)]
    pub description_generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_source: Option<String>,
    #[serde(default)]
    pub domain_corrected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_category: Option<Category>,
    #[serde(default)]
    pub expiry_standardized: String,
}

impl ValidatedRecord {
    pub fn key(&self) -> String {
        format!("{}_{}", self.name, self.provider)
    }

    /// Drops the derived fields. The repaired description is kept.
    pub fn into_record(self) -> CookieRecord {
        CookieRecord {
            name: self.name,
            provider: self.provider,
            category: self.category,
            domain: self.domain,
            expiry: self.expiry,
            description: self.description,
        }
    }

    /// Display name of whoever actually sets the cookie.
    pub fn source_name(&self) -> &str {
        self.actual_source.as_deref().unwrap_or(&self.provider)
    }

    pub fn purpose(&self) -> String {
        format!("{} - {}", self.source_name(), self.category)
    }

    pub fn has_issue(&self, issue: ValidationIssue) -> bool {
        self.validation_issues.contains(&issue)
    }
}

/// One validation pass over a cookie list; persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub cookies: Vec<ValidatedRecord>,
    pub validation_issues: Vec<ValidationIssue>,
    pub validated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedCookie {
    pub current: ValidatedRecord,
    pub previous: ValidatedRecord,
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub new_cookies: Vec<ValidatedRecord>,
    pub removed_cookies: Vec<ValidatedRecord>,
    pub modified_cookies: Vec<ModifiedCookie>,
    pub total_changes: usize,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.total_changes == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    NewCookies,
    RemovedCookies,
    ValidationIssues,
    SuspiciousCategorization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    High,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub details: Vec<String>,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpdate {
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub cookie_count: usize,
}

/// Output of the transform phase, consumed by load.
#[derive(Debug, Clone)]
pub struct MaintenanceRun {
    pub snapshot: Snapshot,
    pub changes: ChangeSet,
    pub alerts: Vec<Alert>,
}

/// Per-run result written to `latest-maintenance.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceReport {
    pub timestamp: DateTime<Utc>,
    pub cookie_count: usize,
    pub changes: ChangeSet,
    pub validation_issues: Vec<ValidationIssue>,
    pub file_updates: Vec<FileUpdate>,
    pub alerts: Vec<Alert>,
    pub success: bool,
}

/// Site-specific attribution settings used by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub domain: String,
    pub first_party_provider: String,
    pub infrastructure_markers: Vec<String>,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            domain: "www.lsretail.com".to_string(),
            first_party_provider: "lsretail.com".to_string(),
            infrastructure_markers: vec!["hubspot".to_string(), "hs-".to_string()],
        }
    }
}

impl SiteProfile {
    pub fn is_first_party_infrastructure(&self, provider: &str) -> bool {
        provider == self.first_party_provider
            || self
                .infrastructure_markers
                .iter()
                .any(|marker| provider.contains(marker.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// The scanner baseline compiled into the binary.
    Embedded,
    HubDb {
        base_url: String,
        portal_id: String,
        table_id: String,
    },
    File {
        path: String,
    },
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Embedded => "embedded scanner baseline".to_string(),
            DataSource::HubDb {
                base_url, table_id, ..
            } => format!("HubDB table {} at {}", table_id, base_url),
            DataSource::File { path } => format!("file {}", path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Csv, OutputFormat::Markdown];
}
