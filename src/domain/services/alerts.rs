use crate::domain::catalog;
use crate::domain::model::{Alert, AlertKind, AlertSeverity, ChangeSet, ValidationIssue};

/// Builds the alerts for one run, in the order new, removed, validation,
/// suspicious categorisation. Each check adds at most one alert.
pub fn generate_alerts(changes: &ChangeSet, validation_issues: &[ValidationIssue]) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if !changes.new_cookies.is_empty() {
        alerts.push(Alert {
            kind: AlertKind::NewCookies,
            severity: AlertSeverity::Info,
            message: format!("{} new cookies detected", changes.new_cookies.len()),
            details: changes
                .new_cookies
                .iter()
                .map(|c| format!("{} ({})", c.name, c.provider))
                .collect(),
            action: "Review and categorize new cookies".to_string(),
        });
    }

    if !changes.removed_cookies.is_empty() {
        alerts.push(Alert {
            kind: AlertKind::RemovedCookies,
            severity: AlertSeverity::Warning,
            message: format!(
                "{} cookies no longer detected",
                changes.removed_cookies.len()
            ),
            details: changes
                .removed_cookies
                .iter()
                .map(|c| format!("{} ({})", c.name, c.provider))
                .collect(),
            action: "Verify if removal is expected".to_string(),
        });
    }

    if !validation_issues.is_empty() {
        alerts.push(Alert {
            kind: AlertKind::ValidationIssues,
            severity: AlertSeverity::Warning,
            message: format!("{} validation issues found", validation_issues.len()),
            details: validation_issues.iter().map(|i| i.to_string()).collect(),
            action: "Review and resolve validation issues".to_string(),
        });
    }

    let suspicious: Vec<String> = changes
        .new_cookies
        .iter()
        .filter(|c| catalog::denylisted_category(&c.name, &c.provider, c.category).is_some())
        .map(|c| format!("{}: {}", c.name, c.category))
        .collect();

    if !suspicious.is_empty() {
        alerts.push(Alert {
            kind: AlertKind::SuspiciousCategorization,
            severity: AlertSeverity::High,
            message: "Advertising cookies categorized as necessary".to_string(),
            details: suspicious,
            action: "Manually review and recategorize if needed".to_string(),
        });
    }

    alerts
}
