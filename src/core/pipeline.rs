use crate::core::export::{self, Artifact, BUNDLE_FILE, REPORT_FILE};
use crate::core::source::CookieLoader;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    AlertSeverity, CookieRecord, FileUpdate, MaintenanceReport, MaintenanceRun, OutputFormat,
    Snapshot,
};
use crate::domain::services::{detect_changes, generate_alerts, Validator};
use crate::utils::error::{AuditError, Result};
use chrono::Utc;

pub const SNAPSHOT_FILE: &str = "previous-cookie-data.json";
pub const LATEST_REPORT_FILE: &str = "latest-maintenance.json";

/// Fetch → validate → diff → alert → write, the full maintenance cycle.
pub struct MaintenancePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    loader: CookieLoader,
    validator: Validator,
}

impl<S: Storage, C: ConfigProvider> MaintenancePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let profile = config.site_profile();
        let loader = CookieLoader::new(
            config.data_source(),
            profile.domain.clone(),
            config.request_timeout_secs(),
        );

        Self {
            storage,
            config,
            loader,
            validator: Validator::new(profile),
        }
    }

    /// Snapshot saved by the last successful run, if one is readable.
    async fn load_previous(&self) -> Option<Snapshot> {
        match self.storage.read_file(SNAPSHOT_FILE).await {
            Ok(bytes) => match serde_json::from_slice::<Snapshot>(&bytes) {
                Ok(snapshot) => {
                    tracing::debug!(
                        "Loaded previous snapshot with {} cookies from {}",
                        snapshot.cookies.len(),
                        snapshot.validated_at
                    );
                    Some(snapshot)
                }
                Err(e) => {
                    tracing::warn!("⚠️ Could not parse previous data: {}", e);
                    None
                }
            },
            Err(AuditError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("⚠️ Could not load previous data: {}", e);
                None
            }
        }
    }

    async fn write_json<T: serde::Serialize>(&self, path: &str, value: &T) -> Result<()> {
        let data = serde_json::to_vec_pretty(value)?;
        self.storage.write_file(path, &data).await
    }

    async fn write_artifacts(&self, run: &MaintenanceRun) -> Result<Vec<FileUpdate>> {
        tracing::info!("🔧 Updating cookie enhancer files...");

        let cookies = &run.snapshot.cookies;
        let artifacts: Vec<Artifact> =
            export::data_artifacts(cookies, self.config.output_formats(), run.snapshot.validated_at)?;

        let mut updates = Vec::with_capacity(artifacts.len() + 1);
        for artifact in &artifacts {
            self.storage
                .write_file(&artifact.file_name, &artifact.contents)
                .await?;
            updates.push(FileUpdate {
                file: artifact.file_name.clone(),
                kind: artifact.kind.clone(),
                cookie_count: cookies.len(),
            });
        }

        if self.config.bundle_artifacts() && !artifacts.is_empty() {
            let zip_data = export::bundle_zip(&artifacts)?;
            tracing::debug!("Writing bundle ({} bytes) to storage", zip_data.len());
            self.storage.write_file(BUNDLE_FILE, &zip_data).await?;
            updates.push(FileUpdate {
                file: BUNDLE_FILE.to_string(),
                kind: "Artifact bundle".to_string(),
                cookie_count: cookies.len(),
            });
        }

        tracing::info!("✅ Updated {} files", updates.len());
        Ok(updates)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MaintenancePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<CookieRecord>> {
        self.loader.load().await
    }

    async fn transform(&self, records: Vec<CookieRecord>) -> Result<MaintenanceRun> {
        tracing::info!("🔍 Validating and enhancing cookie data...");
        let previous = self.load_previous().await;

        let snapshot = self.validator.validate_all(&records);
        tracing::info!(
            "✅ Validated {} cookies, found {} issues",
            snapshot.cookies.len(),
            snapshot.validation_issues.len()
        );

        let changes = detect_changes(
            &snapshot.cookies,
            previous.as_ref().map(|p| p.cookies.as_slice()),
        );

        let alerts = if self.config.alerts_enabled() {
            generate_alerts(&changes, &snapshot.validation_issues)
        } else {
            Vec::new()
        };

        Ok(MaintenanceRun {
            snapshot,
            changes,
            alerts,
        })
    }

    async fn load(&self, run: MaintenanceRun) -> Result<String> {
        let timestamp = Utc::now();

        let file_updates = if run.changes.total_changes > 0 || self.config.force_update() {
            self.write_artifacts(&run).await?
        } else {
            tracing::info!("No cookie changes, data files left as they are");
            Vec::new()
        };

        if self.config.output_formats().contains(&OutputFormat::Markdown) {
            let report = export::markdown_report(&run);
            self.storage.write_file(REPORT_FILE, report.as_bytes()).await?;
        }

        let report = MaintenanceReport {
            timestamp,
            cookie_count: run.snapshot.cookies.len(),
            changes: run.changes.clone(),
            validation_issues: run.snapshot.validation_issues.clone(),
            file_updates,
            alerts: run.alerts.clone(),
            success: true,
        };

        let millis = timestamp.timestamp_millis();
        self.write_json(&format!("maintenance-{}.json", millis), &report)
            .await?;
        self.write_json(LATEST_REPORT_FILE, &report).await?;

        if !run.alerts.is_empty() {
            tracing::info!("📧 {} alerts raised:", run.alerts.len());
            for alert in &run.alerts {
                match alert.severity {
                    AlertSeverity::Info => tracing::info!("   INFO: {}", alert.message),
                    AlertSeverity::Warning => tracing::warn!("   WARNING: {}", alert.message),
                    AlertSeverity::High => tracing::error!("   HIGH: {}", alert.message),
                }
            }
            self.write_json(&format!("alerts-{}.json", millis), &run.alerts)
                .await?;
        }

        // 這次的結果成為下次比對的基準
        self.write_json(SNAPSHOT_FILE, &run.snapshot).await?;

        tracing::info!(
            "📊 Summary: {} cookies, {} changes, {} alerts",
            report.cookie_count,
            report.changes.total_changes,
            report.alerts.len()
        );

        Ok(format!("{}/{}", self.config.output_path(), LATEST_REPORT_FILE))
    }
}
