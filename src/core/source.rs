use crate::domain::baseline::scanner_baseline;
use crate::domain::model::{Category, CookieRecord, DataSource};
use crate::utils::error::{AuditError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// HubDB rows response: `{"rows": [{"values": {...}}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubDbTable {
    pub rows: Vec<HubDbRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubDbRow {
    pub values: HubDbValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubDbValues {
    pub category_key: CategoryKey,
    pub cookie_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// HubDB hands the key back as text or as a number depending on column type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryKey {
    Text(String),
    Number(u64),
}

impl CategoryKey {
    fn category(&self) -> Option<Category> {
        match self {
            CategoryKey::Text(key) => Category::from_key(key),
            CategoryKey::Number(n) => Category::from_key(&n.to_string()),
        }
    }

    fn raw(&self) -> String {
        match self {
            CategoryKey::Text(key) => key.clone(),
            CategoryKey::Number(n) => n.to_string(),
        }
    }
}

impl HubDbTable {
    /// Checks every row and converts it; the first bad row aborts the load.
    pub fn into_records(self, site_domain: &str) -> Result<Vec<CookieRecord>> {
        self.rows
            .into_iter()
            .enumerate()
            .map(|(row, HubDbRow { values })| -> Result<CookieRecord> {
                let category = values.category_key.category().ok_or_else(|| {
                    AuditError::SchemaError {
                        row,
                        message: format!(
                            "unknown category_key '{}'",
                            values.category_key.raw()
                        ),
                    }
                })?;

                let record = CookieRecord {
                    name: values.cookie_name,
                    provider: values.provider,
                    category,
                    domain: values.domain.unwrap_or_else(|| site_domain.to_string()),
                    expiry: values.duration,
                    description: values.description,
                };
                check_identity(row, &record)?;
                Ok(record)
            })
            .collect()
    }
}

/// Input file: a scanner export (array of records) or a HubDB table dump.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileContents {
    Records(Vec<CookieRecord>),
    Table(HubDbTable),
}

fn check_identity(row: usize, record: &CookieRecord) -> Result<()> {
    if record.name.trim().is_empty() {
        return Err(AuditError::SchemaError {
            row,
            message: "cookie_name is empty".to_string(),
        });
    }
    if record.provider.trim().is_empty() {
        return Err(AuditError::SchemaError {
            row,
            message: format!("provider is empty for cookie '{}'", record.name),
        });
    }
    Ok(())
}

pub fn hubdb_rows_url(base_url: &str, table_id: &str, portal_id: &str) -> Result<Url> {
    let endpoint = format!(
        "{}/hubdb/api/v2/tables/{}/rows",
        base_url.trim_end_matches('/'),
        table_id
    );
    Url::parse_with_params(&endpoint, &[("portalId", portal_id)]).map_err(|e| {
        AuditError::InvalidConfigValueError {
            field: "hubdb_base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }
    })
}

/// Loads the current cookie list from the configured source.
pub struct CookieLoader {
    client: Client,
    source: DataSource,
    site_domain: String,
}

impl CookieLoader {
    pub fn new(source: DataSource, site_domain: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("⚠️ Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            source,
            site_domain,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub async fn load(&self) -> Result<Vec<CookieRecord>> {
        tracing::info!("🔄 Fetching cookie data from {}", self.source.describe());

        let records = match &self.source {
            DataSource::Embedded => scanner_baseline(),
            DataSource::HubDb {
                base_url,
                portal_id,
                table_id,
            } => self.fetch_hubdb(base_url, table_id, portal_id).await?,
            DataSource::File { path } => self.read_file(path).await?,
        };

        tracing::info!("📊 Retrieved {} cookies", records.len());
        Ok(records)
    }

    async fn fetch_hubdb(
        &self,
        base_url: &str,
        table_id: &str,
        portal_id: &str,
    ) -> Result<Vec<CookieRecord>> {
        let url = hubdb_rows_url(base_url, table_id, portal_id)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(AuditError::HttpStatusError {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let table: HubDbTable = response.json().await?;
        table.into_records(&self.site_domain)
    }

    async fn read_file(&self, path: &str) -> Result<Vec<CookieRecord>> {
        let bytes = tokio::fs::read(path).await?;

        match serde_json::from_slice::<FileContents>(&bytes)? {
            FileContents::Records(records) => records
                .into_iter()
                .enumerate()
                .map(|(row, mut record)| -> Result<CookieRecord> {
                    check_identity(row, &record)?;
                    if record.domain.trim().is_empty() {
                        record.domain = self.site_domain.clone();
                    }
                    Ok(record)
                })
                .collect(),
            FileContents::Table(table) => table.into_records(&self.site_domain),
        }
    }
}
