use crate::domain::catalog;
use crate::domain::model::{CookieRecord, SiteProfile, Snapshot, ValidatedRecord, ValidationIssue};
use chrono::Utc;

/// Applies the data-quality rules to scanner records.
///
/// Every rule runs on every record; issues are recorded in rule order
/// (description, attribution, category). Expiry standardisation never adds
/// an issue.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    profile: SiteProfile,
}

impl Validator {
    pub fn new(profile: SiteProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub fn validate(&self, record: &CookieRecord) -> ValidatedRecord {
        let mut issues = Vec::new();

        let (description, description_generated) = if record.description.trim().is_empty() {
            issues.push(ValidationIssue::MissingDescription);
            (generate_description(record), true)
        } else {
            (record.description.clone(), false)
        };

        let actual_source = if self.is_domain_attribution_suspicious(record) {
            issues.push(ValidationIssue::SuspiciousDomainAttribution);
            Some(identify_actual_source(&record.provider))
        } else {
            None
        };

        let suggested_category =
            catalog::denylisted_category(&record.name, &record.provider, record.category);
        if suggested_category.is_some() {
            issues.push(ValidationIssue::SuspiciousCategoryAssignment);
        }

        ValidatedRecord {
            name: record.name.clone(),
            provider: record.provider.clone(),
            category: record.category,
            domain: record.domain.clone(),
            expiry: record.expiry.clone(),
            description,
            validation_issues: issues,
            description_generated,
            domain_corrected: actual_source.is_some(),
            actual_source,
            suggested_category,
            expiry_standardized: catalog::standardize_expiry(&record.expiry).to_string(),
        }
    }

    pub fn validate_all(&self, records: &[CookieRecord]) -> Snapshot {
        let cookies: Vec<ValidatedRecord> = records.iter().map(|r| self.validate(r)).collect();
        let validation_issues = cookies
            .iter()
            .flat_map(|c| c.validation_issues.iter().copied())
            .collect::<Vec<_>>();

        tracing::debug!(
            "Validated {} cookies, found {} issues",
            cookies.len(),
            validation_issues.len()
        );

        Snapshot {
            cookies,
            validation_issues,
            validated_at: Utc::now(),
        }
    }

    /// A third-party cookie reported under the site's own domain.
    fn is_domain_attribution_suspicious(&self, record: &CookieRecord) -> bool {
        record.domain == self.profile.domain
            && !self.profile.is_first_party_infrastructure(&record.provider)
    }
}

/// Validates one record against the default site profile.
pub fn validate(record: &CookieRecord) -> ValidatedRecord {
    Validator::default().validate(record)
}

pub fn generate_description(record: &CookieRecord) -> String {
    if let Some(text) = catalog::provider_description(&record.provider) {
        return format!("{} Duration: {}.", text, record.expiry);
    }
    if let Some(text) = catalog::name_description(&record.name) {
        return text.to_string();
    }
    format!(
        "{} integration for {} functionality. Duration: {}.",
        record.provider, record.category, record.expiry
    )
}

pub fn identify_actual_source(provider: &str) -> String {
    catalog::source_display_name(provider)
        .unwrap_or(provider)
        .to_string()
}
