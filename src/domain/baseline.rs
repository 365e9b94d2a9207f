//! Cookie list from the last HubSpot cookie scanner run on www.lsretail.com.
//!
//! Used when no live source is configured. Every entry was reported under the
//! site's own domain, which is what the attribution check looks for.

use crate::domain::model::{Category, CookieRecord};

pub const BASELINE_DOMAIN: &str = "www.lsretail.com";

struct BaselineEntry {
    name: &'static str,
    provider: &'static str,
    category: Category,
    expiry: &'static str,
    description: &'static str,
}

const SCANNER_BASELINE: &[BaselineEntry] = &[
    BaselineEntry {
        name: "__cf_bm",
        provider: "hscta.net",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic to protect your site from bad bots...",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hubspotvideo.com",
        category: Category::Necessary,
        expiry: "29 minutes",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "ar_debug",
        provider: "google-analytics.com",
        category: Category::Analytics,
        expiry: "session",
        description: "",
    },
    BaselineEntry {
        name: "sp_t",
        provider: "spotify.com",
        category: Category::Functionality,
        expiry: "session",
        description: "Required to ensure the functionality of the integrated Spotify plugin...",
    },
    BaselineEntry {
        name: "sp_landing",
        provider: "spotify.com",
        category: Category::Functionality,
        expiry: "session",
        description: "Required to ensure the functionality of the integrated Spotify plugin...",
    },
    BaselineEntry {
        name: "_ga",
        provider: "lsretail.com",
        category: Category::Analytics,
        expiry: "399 days",
        description: "ID used to identify users",
    },
    BaselineEntry {
        name: "__hs_do_not_track",
        provider: "lsretail.com",
        category: Category::Necessary,
        expiry: "179 days",
        description: "Prevents the tracking code from sending any information to HubSpot",
    },
    BaselineEntry {
        name: "MR",
        provider: "bing.com",
        category: Category::Advertisement,
        expiry: "7 days",
        description: "Used to collect information for analytics purposes.",
    },
    BaselineEntry {
        name: "__hstc",
        provider: "lsretail.com",
        category: Category::Analytics,
        expiry: "179 days",
        description: "Analytics tracking cookie",
    },
    BaselineEntry {
        name: "AnalyticsSyncHistory",
        provider: "linkedin.com",
        category: Category::Functionality,
        expiry: "29 days",
        description: "Used to store information about the time a sync with the lms_analytics cookie took place...",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "usemessages.com",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "li_sugr",
        provider: "linkedin.com",
        category: Category::Analytics,
        expiry: "89 days",
        description: "Used to make a probabilistic match of a user's identity outside the Designated Countries",
    },
    BaselineEntry {
        name: "_ga_CWBWGSSZTV",
        provider: "lsretail.com",
        category: Category::Analytics,
        expiry: "399 days",
        description: "Used to persist session state",
    },
    BaselineEntry {
        name: "SM",
        provider: "clarity.ms",
        category: Category::Analytics,
        expiry: "session",
        description: "",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hs-analytics.net",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "hubspotutk",
        provider: "lsretail.com",
        category: Category::Analytics,
        expiry: "179 days",
        description: "Contains visitor's identity",
    },
    BaselineEntry {
        name: "__hssrc",
        provider: "lsretail.com",
        category: Category::Analytics,
        expiry: "session",
        description: "Used to determine if a session is a new session",
    },
    BaselineEntry {
        name: "ANONCHK",
        provider: "clarity.ms",
        category: Category::Advertisement,
        expiry: "session",
        description: "Used to store session ID for a users session to ensure that clicks from adverts...",
    },
    BaselineEntry {
        name: "bcookie",
        provider: "linkedin.com",
        category: Category::Advertisement,
        expiry: "365 days",
        description: "Used by LinkedIn to track the use of embedded services.",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hs-banner.com",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "__hssc",
        provider: "lsretail.com",
        category: Category::Analytics,
        expiry: "29 minutes",
        description: "Analytics session cookie",
    },
    BaselineEntry {
        name: "_fbp",
        provider: "lsretail.com",
        category: Category::Advertisement,
        expiry: "89 days",
        description: "Facebook analytics cookie",
    },
    BaselineEntry {
        name: "_gcl_au",
        provider: "lsretail.com",
        category: Category::Advertisement,
        expiry: "89 days",
        description: "Used by Google AdSense for experimenting with advertisement efficiency...",
    },
    BaselineEntry {
        name: "_rdt_uuid",
        provider: "lsretail.com",
        category: Category::Advertisement,
        expiry: "session",
        description: "This cookie is set by Reddit and is used for remarketing on reddit.com",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "linkedin.com",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hsadspixel.net",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hubspot.com",
        category: Category::Necessary,
        expiry: "29 minutes",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "_clck",
        provider: "lsretail.com",
        category: Category::Functionality,
        expiry: "session",
        description: "",
    },
    BaselineEntry {
        name: "SRM_B",
        provider: "bing.com",
        category: Category::Functionality,
        expiry: "session",
        description: "Collected user data is specifically adapted to the user or device...",
    },
    BaselineEntry {
        name: "MUID",
        provider: "clarity.ms",
        category: Category::Necessary,
        expiry: "session",
        description: "Identifies unique web browsers visiting Microsoft sites...",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hsappstatic.net",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "lidc",
        provider: "linkedin.com",
        category: Category::Advertisement,
        expiry: "1 days",
        description: "Used by the social networking service, LinkedIn, for tracking the use of embedded services.",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hsforms.com",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "MR",
        provider: "clarity.ms",
        category: Category::Advertisement,
        expiry: "session",
        description: "Used to collect information for analytics purposes.",
    },
    BaselineEntry {
        name: "UserMatchHistory",
        provider: "linkedin.com",
        category: Category::Advertisement,
        expiry: "29 days",
        description: "These cookies are set by LinkedIn for advertising purposes...",
    },
    BaselineEntry {
        name: "bscookie",
        provider: "linkedin.com",
        category: Category::Advertisement,
        expiry: "364 days",
        description: "Used by LinkedIn to track the use of embedded services.",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "lsretail.com",
        category: Category::Necessary,
        expiry: "29 minutes",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "CLID",
        provider: "clarity.ms",
        category: Category::Analytics,
        expiry: "session",
        description: "",
    },
    BaselineEntry {
        name: "_clsk",
        provider: "lsretail.com",
        category: Category::Functionality,
        expiry: "session",
        description: "",
    },
    BaselineEntry {
        name: "MUID",
        provider: "bing.com",
        category: Category::Advertisement,
        expiry: "390 days",
        description: "Identifies unique web browsers visiting Microsoft sites...",
    },
    BaselineEntry {
        name: "__hs_cookie_cat_pref",
        provider: "lsretail.com",
        category: Category::Necessary,
        expiry: "session",
        description: "The HubSpot Cookie Banner's consent preferences cookie.",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hubspotusercontent-na1.net",
        category: Category::Necessary,
        expiry: "29 minutes",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "ARRAffinitySameSite",
        provider: "runevents.net",
        category: Category::Functionality,
        expiry: "session",
        description: "When using Microsoft Azure as a hosting platform...",
    },
    BaselineEntry {
        name: "test_cookie",
        provider: "doubleclick.net",
        category: Category::Functionality,
        expiry: "14 minutes",
        description: "This cookie is set by DoubleClick (which is owned by Google)...",
    },
    BaselineEntry {
        name: "NID",
        provider: "google.com",
        category: Category::Necessary,
        expiry: "183 days",
        description: "This cookies is used to collect website statistics...",
    },
    BaselineEntry {
        name: "VISITOR_INFO1_LIVE",
        provider: "youtube.com",
        category: Category::Advertisement,
        expiry: "179 days",
        description: "Tries to estimate the users' bandwidth on pages with integrated YouTube videos.",
    },
    BaselineEntry {
        name: "IDE",
        provider: "doubleclick.net",
        category: Category::Necessary,
        expiry: "399 days",
        description: "This cookie is used for targeting, analyzing and optimisation of ad campaigns...",
    },
    BaselineEntry {
        name: "__Secure-ROLLOUT_TOKEN",
        provider: "youtube.com",
        category: Category::Necessary,
        expiry: "session",
        description: "",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hsforms.net",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hubspot.net",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "__cf_bm",
        provider: "hubspotusercontent10.net",
        category: Category::Necessary,
        expiry: "session",
        description: "Cloud flare's bot products identify and mitigate automated traffic...",
    },
    BaselineEntry {
        name: "YSC",
        provider: "youtube.com",
        category: Category::Functionality,
        expiry: "session",
        description: "Registers a unique ID to keep statistics of what videos from YouTube the user has seen.",
    },
    BaselineEntry {
        name: "fr",
        provider: "facebook.com",
        category: Category::Advertisement,
        expiry: "89 days",
        description: "Contains a unique browser and user ID, used for targeted advertising.",
    },
    BaselineEntry {
        name: "VISITOR_PRIVACY_METADATA",
        provider: "youtube.com",
        category: Category::Advertisement,
        expiry: "session",
        description: "",
    },
];

pub fn scanner_baseline() -> Vec<CookieRecord> {
    SCANNER_BASELINE
        .iter()
        .map(|entry| CookieRecord {
            name: entry.name.to_string(),
            provider: entry.provider.to_string(),
            category: entry.category,
            domain: BASELINE_DOMAIN.to_string(),
            expiry: entry.expiry.to_string(),
            description: entry.description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_baseline_has_54_cookies() {
        assert_eq!(scanner_baseline().len(), 54);
    }

    #[test]
    fn test_baseline_keys_are_unique() {
        let records = scanner_baseline();
        let keys: HashSet<String> = records.iter().map(|r| r.key()).collect();
        assert_eq!(keys.len(), records.len());
    }

    #[test]
    fn test_baseline_contains_denylisted_cookies() {
        let records = scanner_baseline();
        assert!(records.iter().any(|r| r.name == "IDE"
            && r.provider == "doubleclick.net"
            && r.category == Category::Necessary));
        assert!(records.iter().any(|r| r.name == "MUID"
            && r.provider == "clarity.ms"
            && r.category == Category::Necessary));
    }
}
