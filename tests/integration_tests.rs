use clap::Parser;
use cookie_audit::utils::error::AuditError;
use cookie_audit::{
    CliConfig, EtlEngine, LocalStorage, MaintenancePipeline, MaintenanceReport, Snapshot,
};
use httpmock::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn cli_config(output_path: &str, extra: &[&str]) -> CliConfig {
    let mut args = vec!["cookie-audit", "--output-path", output_path];
    args.extend_from_slice(extra);
    CliConfig::parse_from(args)
}

async fn run_once(config: CliConfig) -> cookie_audit::Result<String> {
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = MaintenancePipeline::new(storage, config);
    EtlEngine::new(pipeline).run().await
}

fn read_report(output_path: &str) -> MaintenanceReport {
    let data = std::fs::read(Path::new(output_path).join("latest-maintenance.json")).unwrap();
    serde_json::from_slice(&data).unwrap()
}

#[tokio::test]
async fn test_end_to_end_embedded_baseline() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let result = run_once(cli_config(&output_path, &["--bundle"])).await;
    let report_path = result.unwrap();
    assert!(report_path.ends_with("latest-maintenance.json"));

    let out = Path::new(&output_path);
    for file in [
        "cookie-enhancer-data.json",
        "banner-config.json",
        "hubdb-import-updated.csv",
        "COOKIE_REPORT.md",
        "cookie-audit-bundle.zip",
        "previous-cookie-data.json",
    ] {
        assert!(out.join(file).exists(), "missing {}", file);
    }

    let report = read_report(&output_path);
    assert!(report.success);
    assert_eq!(report.cookie_count, 54);
    assert_eq!(report.changes.new_cookies.len(), 54);
    assert_eq!(report.changes.total_changes, 54);
    assert!(!report.alerts.is_empty());

    // 快照中的描述已補齊
    let snapshot: Snapshot =
        serde_json::from_slice(&std::fs::read(out.join("previous-cookie-data.json")).unwrap())
            .unwrap();
    assert!(snapshot.cookies.iter().all(|c| !c.description.is_empty()));

    let csv_content = std::fs::read_to_string(out.join("hubdb-import-updated.csv")).unwrap();
    assert!(csv_content.starts_with("\"category_key\""));

    let zip_data = std::fs::read(out.join("cookie-audit-bundle.zip")).unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    let file_names: Vec<&str> = archive.file_names().collect();
    assert!(file_names.contains(&"cookie-enhancer-data.json"));
    assert!(file_names.contains(&"banner-config.json"));
    assert!(file_names.contains(&"hubdb-import-updated.csv"));
}

#[tokio::test]
async fn test_second_run_detects_no_changes() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    run_once(cli_config(&output_path, &[])).await.unwrap();
    let enhancer = Path::new(&output_path).join("cookie-enhancer-data.json");
    std::fs::remove_file(&enhancer).unwrap();

    run_once(cli_config(&output_path, &[])).await.unwrap();

    let report = read_report(&output_path);
    assert_eq!(report.changes.total_changes, 0);
    assert!(report.file_updates.is_empty());
    // 沒有變更時不重寫資料檔
    assert!(!enhancer.exists());
    assert!(Path::new(&output_path).join("COOKIE_REPORT.md").exists());
}

#[tokio::test]
async fn test_force_rewrites_unchanged_data() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    run_once(cli_config(&output_path, &[])).await.unwrap();
    run_once(cli_config(&output_path, &["--force", "--formats", "json"]))
        .await
        .unwrap();

    let report = read_report(&output_path);
    assert_eq!(report.changes.total_changes, 0);
    let files: Vec<&str> = report.file_updates.iter().map(|u| u.file.as_str()).collect();
    assert_eq!(files, vec!["cookie-enhancer-data.json", "banner-config.json"]);
}

#[tokio::test]
async fn test_file_source_reports_modifications() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();
    let input = temp_dir.path().join("scan.json");
    let input_path = input.to_str().unwrap().to_string();

    std::fs::write(
        &input,
        serde_json::json!([
            {"name": "_ga", "provider": "lsretail.com", "category": "analytics", "expiry": "399 days", "description": "ID"},
            {"name": "fr", "provider": "facebook.com", "category": "advertisement", "expiry": "89 days", "description": "Ads"}
        ])
        .to_string(),
    )
    .unwrap();
    run_once(cli_config(&output_path, &["--source", "file", "--input", input_path.as_str()]))
        .await
        .unwrap();

    std::fs::write(
        &input,
        serde_json::json!([
            {"name": "_ga", "provider": "lsretail.com", "category": "analytics", "expiry": "399 days", "description": "Google Analytics ID"},
            {"name": "YSC", "provider": "youtube.com", "category": "functionality", "expiry": "session", "description": "yt"}
        ])
        .to_string(),
    )
    .unwrap();
    run_once(cli_config(&output_path, &["--source", "file", "--input", input_path.as_str()]))
        .await
        .unwrap();

    let report = read_report(&output_path);
    assert_eq!(report.changes.new_cookies.len(), 1);
    assert_eq!(report.changes.removed_cookies.len(), 1);
    assert_eq!(report.changes.modified_cookies.len(), 1);
    assert_eq!(report.changes.total_changes, 3);
    assert_eq!(
        report.changes.modified_cookies[0].changes,
        vec!["Description: \"ID\" → \"Google Analytics ID\"".to_string()]
    );
}

#[tokio::test]
async fn test_end_to_end_hubdb_source() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/hubdb/api/v2/tables/99/rows")
            .query_param("portalId", "491011");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "rows": [
                    {"values": {"category_key": 1, "cookie_name": "__hssc", "provider": "hubspot.com", "duration": "1 hour", "description": ""}},
                    {"values": {"category_key": "4", "cookie_name": "MUID", "provider": "clarity.ms", "duration": "1 year", "description": "Clarity"}}
                ]
            }));
    });

    let base_url = server.base_url();
    let config = cli_config(
        &output_path,
        &["--source", "hubdb", "--hubdb-base-url", base_url.as_str(), "--table-id", "99"],
    );
    run_once(config).await.unwrap();

    api_mock.assert();
    let report = read_report(&output_path);
    assert_eq!(report.cookie_count, 2);
    assert!(report
        .validation_issues
        .iter()
        .any(|i| i.to_string() == "Missing description"));
}

#[tokio::test]
async fn test_end_to_end_with_api_failure() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/hubdb/api/v2/tables/130537251/rows");
        then.status(500);
    });

    let base_url = server.base_url();
    let config = cli_config(&output_path, &["--source", "hubdb", "--hubdb-base-url", base_url.as_str()]);
    let result = run_once(config).await;

    api_mock.assert();
    match result {
        Err(e @ AuditError::HttpStatusError { status: 500, .. }) => {
            assert_eq!(e.exit_code(), 2);
        }
        other => panic!("expected HTTP 500 error, got {:?}", other),
    }
    // 失敗時不留下任何輸出
    assert!(!Path::new(&output_path).join("previous-cookie-data.json").exists());
    assert!(!Path::new(&output_path).join("latest-maintenance.json").exists());
}

#[tokio::test]
async fn test_end_to_end_with_monitoring() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = cli_config(&output_path, &["--no-alerts", "--monitor"]);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = MaintenancePipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, true);

    engine.run().await.unwrap();

    let report = read_report(&output_path);
    assert!(report.alerts.is_empty());
    let alert_files = std::fs::read_dir(&output_path)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("alerts-"))
        .count();
    assert_eq!(alert_files, 0);
}
