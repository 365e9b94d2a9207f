//! Lookup tables behind the validation rules.

use crate::domain::model::Category;

/// Description text per provider, exact match.
const PROVIDER_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "spotify.com",
        "Spotify integration functionality for audio content and podcast features on LS Retail resources.",
    ),
    (
        "linkedin.com",
        "LinkedIn professional network integration for B2B targeting and embedded content.",
    ),
    (
        "facebook.com",
        "Facebook social media integration for targeted advertising and user engagement.",
    ),
    (
        "youtube.com",
        "YouTube video integration for educational content and product demonstrations.",
    ),
    (
        "bing.com",
        "Microsoft Bing advertising and analytics integration for search marketing optimization.",
    ),
    (
        "clarity.ms",
        "Microsoft Clarity user experience analytics for website optimization and performance monitoring.",
    ),
    (
        "google.com",
        "Google services integration for advertising, analytics, and website optimization.",
    ),
    (
        "doubleclick.net",
        "Google DoubleClick advertising platform for targeted marketing campaigns.",
    ),
];

/// Description text per cookie name, matched as a prefix in table order.
const NAME_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "SM",
        "Microsoft Clarity session identifier for user experience analytics and heatmap generation.",
    ),
    (
        "_clck",
        "Microsoft Clarity click tracking cookie for user interaction analysis and website optimization.",
    ),
    (
        "_clsk",
        "Microsoft Clarity session key for maintaining user session state during analytics collection.",
    ),
    (
        "CLID",
        "Microsoft Clarity session ID for tracking user behavior and website performance metrics.",
    ),
    (
        "ar_debug",
        "Google Analytics debug mode cookie for testing and validating tracking implementations.",
    ),
    (
        "VISITOR_PRIVACY_METADATA",
        "YouTube visitor privacy metadata for GDPR compliance and privacy preference management.",
    ),
    (
        "__Secure-ROLLOUT_TOKEN",
        "YouTube security token for progressive feature rollout and A/B testing.",
    ),
];

/// Display name of the real setter, keyed by provider.
const SOURCE_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("google-analytics.com", "Google Analytics"),
    ("facebook.com", "Facebook"),
    ("linkedin.com", "LinkedIn"),
    ("youtube.com", "YouTube"),
    ("spotify.com", "Spotify"),
    ("bing.com", "Microsoft Bing"),
    ("clarity.ms", "Microsoft Clarity"),
    ("doubleclick.net", "Google DoubleClick"),
];

const EXPIRY_STANDARDS: &[(&str, &str)] = &[
    ("session", "Session"),
    ("29 minutes", "30 minutes"),
    ("14 minutes", "15 minutes"),
    ("1 days", "1 day"),
    ("7 days", "1 week"),
    ("29 days", "1 month"),
    ("89 days", "3 months"),
    ("179 days", "6 months"),
    ("183 days", "6 months"),
    ("364 days", "1 year"),
    ("365 days", "1 year"),
    ("390 days", "13 months"),
    ("399 days", "13 months"),
];

/// Known mis-categorised cookies: (name, provider, declared, suggested).
const CATEGORY_DENYLIST: &[(&str, &str, Category, Category)] = &[
    (
        "IDE",
        "doubleclick.net",
        Category::Necessary,
        Category::Advertisement,
    ),
    ("MUID", "clarity.ms", Category::Necessary, Category::Analytics),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}

pub fn provider_description(provider: &str) -> Option<&'static str> {
    lookup(PROVIDER_DESCRIPTIONS, provider)
}

pub fn name_description(cookie_name: &str) -> Option<&'static str> {
    NAME_DESCRIPTIONS
        .iter()
        .find(|(prefix, _)| cookie_name.starts_with(prefix))
        .map(|(_, text)| *text)
}

pub fn source_display_name(provider: &str) -> Option<&'static str> {
    lookup(SOURCE_DISPLAY_NAMES, provider)
}

/// Canonical duration for a scanner expiry token; unknown tokens pass through.
pub fn standardize_expiry(expiry: &str) -> &str {
    lookup(EXPIRY_STANDARDS, expiry).unwrap_or(expiry)
}

/// Suggested category when (name, provider, category) is on the denylist.
pub fn denylisted_category(name: &str, provider: &str, category: Category) -> Option<Category> {
    CATEGORY_DENYLIST
        .iter()
        .find(|(n, p, declared, _)| *n == name && *p == provider && *declared == category)
        .map(|(_, _, _, suggested)| *suggested)
}
