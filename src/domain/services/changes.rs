use crate::domain::model::{ChangeSet, ModifiedCookie, ValidatedRecord};
use std::collections::HashMap;

/// Records keyed by `name_provider`, in first-insertion order.
///
/// A repeated key keeps its original position but takes the later record, so
/// duplicates collapse to the last one seen.
struct KeyedRecords<'a> {
    entries: Vec<(String, &'a ValidatedRecord)>,
    positions: HashMap<String, usize>,
}

impl<'a> KeyedRecords<'a> {
    fn build(records: &'a [ValidatedRecord], label: &str) -> Self {
        let mut entries: Vec<(String, &'a ValidatedRecord)> = Vec::with_capacity(records.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(records.len());

        for record in records {
            let key = record.key();
            match positions.get(&key) {
                Some(&pos) => {
                    tracing::warn!(
                        "⚠️ Duplicate cookie key '{}' in {} data, keeping the last record",
                        key,
                        label
                    );
                    entries[pos].1 = record;
                }
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, record));
                }
            }
        }

        Self { entries, positions }
    }

    fn get(&self, key: &str) -> Option<&'a ValidatedRecord> {
        self.positions.get(key).map(|&pos| self.entries[pos].1)
    }

    fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }
}

pub fn detect_changes(
    current: &[ValidatedRecord],
    previous: Option<&[ValidatedRecord]>,
) -> ChangeSet {
    let Some(previous) = previous else {
        tracing::info!("📝 No previous data available, treating all cookies as new");
        return ChangeSet {
            new_cookies: current.to_vec(),
            removed_cookies: Vec::new(),
            modified_cookies: Vec::new(),
            total_changes: current.len(),
        };
    };

    let current_index = KeyedRecords::build(current, "current");
    let previous_index = KeyedRecords::build(previous, "previous");

    let mut new_cookies = Vec::new();
    let mut modified_cookies = Vec::new();
    let mut removed_cookies = Vec::new();

    for (key, cookie) in &current_index.entries {
        match previous_index.get(key) {
            None => new_cookies.push((*cookie).clone()),
            Some(prev) => {
                let changes = identify_changes(cookie, prev);
                if !changes.is_empty() {
                    modified_cookies.push(ModifiedCookie {
                        current: (*cookie).clone(),
                        previous: prev.clone(),
                        changes,
                    });
                }
            }
        }
    }

    for (key, cookie) in &previous_index.entries {
        if !current_index.contains(key) {
            removed_cookies.push((*cookie).clone());
        }
    }

    let total_changes = new_cookies.len() + modified_cookies.len() + removed_cookies.len();
    tracing::info!(
        "📊 Changes detected: {} new, {} modified, {} removed",
        new_cookies.len(),
        modified_cookies.len(),
        removed_cookies.len()
    );

    ChangeSet {
        new_cookies,
        removed_cookies,
        modified_cookies,
        total_changes,
    }
}

/// Before/after lines for description, category and expiry, in that order.
pub fn identify_changes(current: &ValidatedRecord, previous: &ValidatedRecord) -> Vec<String> {
    let mut changes = Vec::new();
    if current.description != previous.description {
        changes.push(format!(
            "Description: \"{}\" → \"{}\"",
            previous.description, current.description
        ));
    }
    if current.category != previous.category {
        changes.push(format!(
            "Category: {} → {}",
            previous.category, current.category
        ));
    }
    if current.expiry != previous.expiry {
        changes.push(format!("Expiry: {} → {}", previous.expiry, current.expiry));
    }
    changes
}
