use crate::core::source::{CategoryKey, HubDbRow, HubDbTable, HubDbValues};
use crate::domain::model::{
    Category, MaintenanceRun, OutputFormat, ValidatedRecord, ValidationIssue,
};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const ENHANCER_DATA_FILE: &str = "cookie-enhancer-data.json";
pub const BANNER_CONFIG_FILE: &str = "banner-config.json";
pub const HUBDB_IMPORT_FILE: &str = "hubdb-import-updated.csv";
pub const REPORT_FILE: &str = "COOKIE_REPORT.md";
pub const BUNDLE_FILE: &str = "cookie-audit-bundle.zip";

const CSV_HEADER: [&str; 6] = [
    "category_key",
    "cookie_name",
    "purpose",
    "duration",
    "description",
    "provider",
];

#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub kind: String,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerCategory {
    pub key: String,
    pub id: String,
    pub label: String,
    pub description: String,
    pub required: bool,
    pub cookie_count: usize,
}

/// Category summary consumed by the banner script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerConfig {
    pub categories: Vec<BannerCategory>,
    pub total_cookies: usize,
    pub hubspot_sync_date: DateTime<Utc>,
}

fn banner_description(category: Category) -> &'static str {
    match category {
        Category::Necessary => "These cookies are necessary for LS Retail's platform to function properly and cannot be disabled.",
        Category::Functionality => "Enable enhanced functionality and personalization features for improved user experience.",
        Category::Analytics => "Help us understand how businesses use our retail solutions to improve our products.",
        Category::Advertisement => "Enable targeted content about our unified commerce solutions for your business type.",
    }
}

/// Rows in the same `{rows: [{values}]}` shape the loader reads.
pub fn enhancer_table(cookies: &[ValidatedRecord]) -> HubDbTable {
    HubDbTable {
        rows: cookies
            .iter()
            .map(|cookie| HubDbRow {
                values: HubDbValues {
                    category_key: CategoryKey::Text(cookie.category.key().to_string()),
                    cookie_name: cookie.name.clone(),
                    purpose: Some(cookie.purpose()),
                    duration: cookie.expiry_standardized.clone(),
                    description: cookie.description.clone(),
                    provider: cookie.provider.clone(),
                    domain: None,
                },
            })
            .collect(),
    }
}

pub fn hubdb_import_csv(cookies: &[ValidatedRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for cookie in cookies {
        writer.write_record([
            cookie.category.key(),
            cookie.name.as_str(),
            cookie.purpose().as_str(),
            cookie.expiry_standardized.as_str(),
            cookie.description.as_str(),
            cookie.provider.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn banner_config(cookies: &[ValidatedRecord], synced_at: DateTime<Utc>) -> BannerConfig {
    let categories = Category::ALL
        .into_iter()
        .map(|category| BannerCategory {
            key: category.key().to_string(),
            id: category.banner_id().to_string(),
            label: category.label().to_string(),
            description: banner_description(category).to_string(),
            required: category.is_required(),
            cookie_count: cookies.iter().filter(|c| c.category == category).count(),
        })
        .collect();

    BannerConfig {
        categories,
        total_cookies: cookies.len(),
        hubspot_sync_date: synced_at,
    }
}

fn count_issue(run: &MaintenanceRun, issue: ValidationIssue) -> usize {
    run.snapshot
        .validation_issues
        .iter()
        .filter(|i| **i == issue)
        .count()
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

pub fn markdown_report(run: &MaintenanceRun) -> String {
    let mut out = String::new();
    if let Err(e) = write_report(&mut out, run) {
        tracing::warn!("⚠️ Markdown report truncated: {}", e);
    }
    out
}

/// Cookie count per provider, most cookies first; ties keep first-seen order.
fn provider_counts(cookies: &[ValidatedRecord]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for cookie in cookies {
        match counts.iter_mut().find(|(p, _)| *p == cookie.provider) {
            Some((_, n)) => *n += 1,
            None => counts.push((cookie.provider.as_str(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn recommendations(run: &MaintenanceRun) -> Vec<String> {
    let cookies = &run.snapshot.cookies;
    let mut items = Vec::new();

    let misattributed = count_issue(run, ValidationIssue::SuspiciousDomainAttribution);
    if misattributed > 0 {
        items.push(format!(
            "Fix domain attribution for {} third-party cookies",
            misattributed
        ));
    }

    let generated = count_issue(run, ValidationIssue::MissingDescription);
    if generated > 0 {
        items.push(format!(
            "Replace {} generated descriptions with reviewed text",
            generated
        ));
    }

    let suspicious: Vec<&str> = cookies
        .iter()
        .filter(|c| c.has_issue(ValidationIssue::SuspiciousCategoryAssignment))
        .map(|c| c.name.as_str())
        .collect();
    if !suspicious.is_empty() {
        items.push(format!(
            "Review suspicious category assignments ({})",
            suspicious.join(", ")
        ));
    }

    if !run.changes.removed_cookies.is_empty() {
        items.push("Confirm removed cookies are no longer set before publishing".to_string());
    }

    items
}

fn write_report(out: &mut String, run: &MaintenanceRun) -> std::fmt::Result {
    let cookies = &run.snapshot.cookies;
    let changes = &run.changes;

    writeln!(out, "# Cookie Maintenance Report")?;
    writeln!(out)?;
    writeln!(out, "Validated at {}", run.snapshot.validated_at.to_rfc3339())?;
    writeln!(out)?;

    writeln!(out, "## Overview")?;
    writeln!(out)?;
    writeln!(out, "- Total cookies: {}", cookies.len())?;
    for category in Category::ALL {
        writeln!(
            out,
            "- {}: {}",
            category.label(),
            cookies.iter().filter(|c| c.category == category).count()
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Providers")?;
    writeln!(out)?;
    for (provider, count) in provider_counts(cookies) {
        writeln!(out, "- {}: {}", provider, count)?;
    }
    writeln!(out)?;

    writeln!(out, "## Validation")?;
    writeln!(out)?;
    writeln!(
        out,
        "- Missing descriptions: {}",
        count_issue(run, ValidationIssue::MissingDescription)
    )?;
    writeln!(
        out,
        "- Domain attribution issues: {}",
        count_issue(run, ValidationIssue::SuspiciousDomainAttribution)
    )?;
    writeln!(
        out,
        "- Category issues: {}",
        count_issue(run, ValidationIssue::SuspiciousCategoryAssignment)
    )?;
    writeln!(out)?;

    writeln!(out, "## Changes")?;
    writeln!(out)?;
    writeln!(
        out,
        "{} new, {} modified, {} removed ({} total)",
        changes.new_cookies.len(),
        changes.modified_cookies.len(),
        changes.removed_cookies.len(),
        changes.total_changes
    )?;
    for modified in &changes.modified_cookies {
        writeln!(
            out,
            "- `{}` ({}): {}",
            modified.current.name,
            modified.current.provider,
            modified.changes.join("; ")
        )?;
    }
    for removed in &changes.removed_cookies {
        writeln!(out, "- `{}` ({}) removed", removed.name, removed.provider)?;
    }
    writeln!(out)?;

    if !run.alerts.is_empty() {
        writeln!(out, "## Alerts")?;
        writeln!(out)?;
        for alert in &run.alerts {
            writeln!(
                out,
                "- **{}** {} ({})",
                alert.severity.to_string().to_uppercase(),
                alert.message,
                alert.action
            )?;
        }
        writeln!(out)?;
    }

    let recommended = recommendations(run);
    if !recommended.is_empty() {
        writeln!(out, "## Recommendations")?;
        writeln!(out)?;
        for item in recommended {
            writeln!(out, "- {}", item)?;
        }
        writeln!(out)?;
    }

    let flagged: Vec<&ValidatedRecord> = cookies
        .iter()
        .filter(|c| !c.validation_issues.is_empty())
        .collect();
    if !flagged.is_empty() {
        writeln!(out, "## Flagged Cookies")?;
        writeln!(out)?;
        writeln!(
            out,
            "| Cookie | Provider | Category | Issues | Actual source | Suggested category |"
        )?;
        writeln!(out, "|---|---|---|---|---|---|")?;
        for cookie in flagged {
            let issues: Vec<String> = cookie
                .validation_issues
                .iter()
                .map(|i| i.to_string())
                .collect();
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                escape_cell(&cookie.name),
                escape_cell(&cookie.provider),
                cookie.category,
                issues.join(", "),
                cookie.actual_source.as_deref().map(escape_cell).unwrap_or_default(),
                cookie
                    .suggested_category
                    .map(|c| c.to_string())
                    .unwrap_or_default()
            )?;
        }
    }

    Ok(())
}

/// Data files for the banner and the HubDB import, filtered by format.
pub fn data_artifacts(
    cookies: &[ValidatedRecord],
    formats: &[OutputFormat],
    synced_at: DateTime<Utc>,
) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();

    if formats.contains(&OutputFormat::Json) {
        artifacts.push(Artifact {
            file_name: ENHANCER_DATA_FILE.to_string(),
            kind: "Cookie enhancer data".to_string(),
            contents: serde_json::to_vec_pretty(&enhancer_table(cookies))?,
        });
        artifacts.push(Artifact {
            file_name: BANNER_CONFIG_FILE.to_string(),
            kind: "Banner category config".to_string(),
            contents: serde_json::to_vec_pretty(&banner_config(cookies, synced_at))?,
        });
    }

    if formats.contains(&OutputFormat::Csv) {
        artifacts.push(Artifact {
            file_name: HUBDB_IMPORT_FILE.to_string(),
            kind: "HubDB import file".to_string(),
            contents: hubdb_import_csv(cookies)?.into_bytes(),
        });
    }

    Ok(artifacts)
}

pub fn bundle_zip(artifacts: &[Artifact]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for artifact in artifacts {
        zip.start_file::<_, ()>(artifact.file_name.as_str(), FileOptions::default())?;
        zip.write_all(&artifact.contents)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::baseline::scanner_baseline;
    use crate::domain::model::{ChangeSet, CookieRecord};
    use crate::domain::services::{detect_changes, generate_alerts, validate, Validator};

    fn baseline_run() -> MaintenanceRun {
        let snapshot = Validator::default().validate_all(&scanner_baseline());
        let changes = detect_changes(&snapshot.cookies, None);
        let alerts = generate_alerts(&changes, &snapshot.validation_issues);
        MaintenanceRun {
            snapshot,
            changes,
            alerts,
        }
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let cookie = validate(&CookieRecord {
            name: "_ga".to_string(),
            provider: "lsretail.com".to_string(),
            category: Category::Analytics,
            domain: "www.lsretail.com".to_string(),
            expiry: "399 days".to_string(),
            description: "ID used to \"identify\" users".to_string(),
        });

        let csv = hubdb_import_csv(&[cookie]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "\"category_key\",\"cookie_name\",\"purpose\",\"duration\",\"description\",\"provider\""
        );
        assert_eq!(
            lines[1],
            "3,\"_ga\",\"lsretail.com - analytics\",\"13 months\",\"ID used to \"\"identify\"\" users\",\"lsretail.com\""
        );
    }

    #[test]
    fn test_csv_reads_back() {
        let run = baseline_run();
        let csv = hubdb_import_csv(&run.snapshot.cookies).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());
        assert_eq!(reader.records().count(), 54);
    }

    #[test]
    fn test_enhancer_table_shape() {
        let run = baseline_run();
        let value = serde_json::to_value(enhancer_table(&run.snapshot.cookies)).unwrap();

        let rows = value["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 54);
        let first = &rows[0]["values"];
        assert_eq!(first["category_key"], "1");
        assert_eq!(first["cookie_name"], "__cf_bm");
        assert_eq!(first["duration"], "Session");
        assert!(first.get("domain").is_none());
    }

    #[test]
    fn test_enhancer_table_reloads() {
        let run = baseline_run();
        let table = enhancer_table(&run.snapshot.cookies);
        let records = table.into_records("www.lsretail.com").unwrap();
        assert_eq!(records.len(), 54);
        assert!(records.iter().all(|r| !r.description.is_empty()));
    }

    #[test]
    fn test_banner_config_counts() {
        let run = baseline_run();
        let config = banner_config(&run.snapshot.cookies, Utc::now());

        assert_eq!(config.total_cookies, 54);
        assert_eq!(config.categories.len(), 4);
        assert_eq!(config.categories[3].id, "marketing");
        assert!(config.categories[0].required);
        let sum: usize = config.categories.iter().map(|c| c.cookie_count).sum();
        assert_eq!(sum, 54);
    }

    #[test]
    fn test_markdown_report_sections() {
        let run = baseline_run();
        let report = markdown_report(&run);

        assert!(report.starts_with("# Cookie Maintenance Report"));
        assert!(report.contains("- Total cookies: 54"));
        assert!(report.contains("- Missing descriptions: 7"));
        assert!(report.contains("- Category issues: 2"));
        assert!(report.contains("54 new, 0 modified, 0 removed (54 total)"));
        assert!(report.contains("**HIGH** Advertising cookies categorized as necessary"));
        assert!(report.contains("| IDE | doubleclick.net | necessary |"));
    }

    #[test]
    fn test_markdown_report_without_alerts() {
        let run = MaintenanceRun {
            snapshot: Validator::default().validate_all(&[]),
            changes: ChangeSet::default(),
            alerts: vec![],
        };
        let report = markdown_report(&run);
        assert!(!report.contains("## Alerts"));
        assert!(!report.contains("## Flagged Cookies"));
        assert!(!report.contains("## Recommendations"));
    }

    #[test]
    fn test_markdown_report_providers_and_recommendations() {
        let record = |name: &str, provider: &str, category: Category| CookieRecord {
            name: name.to_string(),
            provider: provider.to_string(),
            category,
            domain: "www.lsretail.com".to_string(),
            expiry: "session".to_string(),
            description: "set by a third party".to_string(),
        };
        let snapshot = Validator::default().validate_all(&[
            record("IDE", "doubleclick.net", Category::Necessary),
            record("YSC", "youtube.com", Category::Functionality),
            record("VISITOR_INFO1_LIVE", "youtube.com", Category::Advertisement),
        ]);
        let run = MaintenanceRun {
            snapshot,
            changes: ChangeSet::default(),
            alerts: vec![],
        };

        let report = markdown_report(&run);

        let youtube = report.find("- youtube.com: 2").unwrap();
        let doubleclick = report.find("- doubleclick.net: 1").unwrap();
        assert!(report.find("## Providers").unwrap() < youtube);
        assert!(youtube < doubleclick);

        assert!(report.contains("## Recommendations"));
        assert!(report.contains("- Fix domain attribution for 3 third-party cookies"));
        assert!(report.contains("- Review suspicious category assignments (IDE)"));
        assert!(!report.contains("generated descriptions"));
    }

    #[test]
    fn test_data_artifacts_respect_formats() {
        let run = baseline_run();
        let csv_only = data_artifacts(&run.snapshot.cookies, &[OutputFormat::Csv], Utc::now()).unwrap();
        assert_eq!(csv_only.len(), 1);
        assert_eq!(csv_only[0].file_name, HUBDB_IMPORT_FILE);

        let all = data_artifacts(&run.snapshot.cookies, &OutputFormat::ALL, Utc::now()).unwrap();
        let names: Vec<&str> = all.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec![ENHANCER_DATA_FILE, BANNER_CONFIG_FILE, HUBDB_IMPORT_FILE]);
    }

    #[test]
    fn test_bundle_zip_contents() {
        let artifacts = vec![
            Artifact {
                file_name: "a.json".to_string(),
                kind: "test".to_string(),
                contents: b"{}".to_vec(),
            },
            Artifact {
                file_name: "b.csv".to_string(),
                kind: "test".to_string(),
                contents: b"x,y".to_vec(),
            },
        ];

        let bytes = bundle_zip(&artifacts).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        std::io::Read::read_to_string(&mut archive.by_name("b.csv").unwrap(), &mut content).unwrap();
        assert_eq!(content, "x,y");
    }
}
