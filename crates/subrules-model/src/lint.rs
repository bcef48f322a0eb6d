//! Duplicate identity detection.
//!
//! Parsing accepts documents where apps share an `id`, groups share a `key`
//! within an app, or rules share a `key` within a group. This module only
//! reports them; it never rejects a document.

use std::collections::BTreeMap;
use std::fmt;

use crate::document::Subscription;

/// One identity that occurs more than once among its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Duplicate {
    App {
        id: String,
        count: usize,
    },
    Group {
        app_id: String,
        key: i32,
        count: usize,
    },
    Rule {
        app_id: String,
        group_key: i32,
        key: i32,
        count: usize,
    },
}

impl fmt::Display for Duplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duplicate::App { id, count } => write!(f, "app {id} appears {count} times"),
            Duplicate::Group { app_id, key, count } => {
                write!(f, "app {app_id}: group key {key} appears {count} times")
            }
            Duplicate::Rule {
                app_id,
                group_key,
                key,
                count,
            } => write!(
                f,
                "app {app_id}, group {group_key}: rule key {key} appears {count} times"
            ),
        }
    }
}

/// Report every duplicated identity in `doc`, in document order of the
/// parent and ascending order of the identity.
pub fn find_duplicates(doc: &Subscription) -> Vec<Duplicate> {
    let mut found = Vec::new();

    for (id, count) in repeated(doc.apps.iter().map(|app| app.id.clone())) {
        found.push(Duplicate::App { id, count });
    }

    for app in &doc.apps {
        for (key, count) in repeated(app.groups.iter().map(|group| group.key)) {
            found.push(Duplicate::Group {
                app_id: app.id.clone(),
                key,
                count,
            });
        }

        for group in &app.groups {
            for (key, count) in repeated(group.rules.iter().filter_map(|rule| rule.key)) {
                found.push(Duplicate::Rule {
                    app_id: app.id.clone(),
                    group_key: group.key,
                    key,
                    count,
                });
            }
        }
    }

    if !found.is_empty() {
        tracing::debug!(count = found.len(), "duplicate identities in subscription");
    }
    found
}

fn repeated<K: Ord>(keys: impl Iterator<Item = K>) -> impl Iterator<Item = (K, usize)> {
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    counts.into_iter().filter(|(_, count)| *count > 1)
}
