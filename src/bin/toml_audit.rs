use clap::Parser;
use cookie_audit::core::ConfigProvider;
use cookie_audit::domain::baseline::scanner_baseline;
use cookie_audit::domain::services::Validator;
use cookie_audit::utils::{logger, validation::Validate};
use cookie_audit::{
    DataSource, EtlEngine, LocalStorage, MaintenancePipeline, TomlConfig, ValidationIssue,
};

#[derive(Parser)]
#[command(name = "toml-audit")]
#[command(about = "Cookie maintenance driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "cookie-audit.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override output.force_update from config
    #[arg(long)]
    force: Option<bool>,

    /// Dry run - show what would be processed without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based cookie audit");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(force) = args.force {
        config.output.force_update = Some(force);
        tracing::info!("🔧 Force update overridden to: {}", force);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = MaintenancePipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report_path) => {
            tracing::info!("✅ Automated maintenance completed successfully!");
            println!("✅ Automated maintenance completed successfully!");
            println!("📁 Report saved to: {}", report_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Maintenance failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn format_list(config: &TomlConfig) -> String {
    config
        .output_formats()
        .iter()
        .map(|f| format!("{:?}", f).to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Audit: {} v{}", config.audit.name, config.audit.version);
    println!("  Source: {}", config.data_source().describe());
    println!("  Site: {}", config.site_profile().domain);
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", format_list(config));
    println!("  Force Update: {}", config.force_update());
    println!("  Alerts: {}", config.alerts_enabled());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Data Source Analysis:");
    match config.data_source() {
        DataSource::Embedded => {
            let records = scanner_baseline();
            let snapshot = Validator::new(config.site_profile()).validate_all(&records);
            let count = |issue: ValidationIssue| {
                snapshot
                    .cookies
                    .iter()
                    .filter(|c| c.has_issue(issue))
                    .count()
            };

            println!("  Embedded baseline: {} cookies", records.len());
            println!(
                "  Missing descriptions: {}",
                count(ValidationIssue::MissingDescription)
            );
            println!(
                "  Suspicious categories: {}",
                count(ValidationIssue::SuspiciousCategoryAssignment)
            );
            println!(
                "  Suspicious domains: {}",
                count(ValidationIssue::SuspiciousDomainAttribution)
            );
        }
        DataSource::HubDb {
            base_url,
            portal_id,
            table_id,
        } => {
            println!("  Endpoint: {}", base_url);
            println!("  Portal: {}", portal_id);
            println!("  Table: {}", table_id);
            println!("  Timeout: {}s", config.request_timeout_secs());
        }
        DataSource::File { path } => {
            println!("  File: {}", path);
        }
    }

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_path());
    println!("  Formats: {}", format_list(config));
    if config.bundle_artifacts() {
        println!("  Bundle: cookie-audit-bundle.zip (ZIP)");
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
