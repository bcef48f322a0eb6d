//! Human-readable overview of a parsed subscription.

use std::fmt;

use subrules_model::{find_duplicates, Duplicate, SelectorChecker, Subscription};

/// A group whose selectors the checker rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGroup {
    pub app_id: String,
    pub key: i32,
    pub name: Option<String>,
}

/// Counts and findings for one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub id: i64,
    pub name: String,
    pub version: i32,
    pub apps: usize,
    pub groups: usize,
    pub rules: usize,
    pub invalid_groups: Vec<InvalidGroup>,
    pub duplicates: Vec<Duplicate>,
}

impl Summary {
    /// Summarize `doc`, checking every group's selectors with `checker`.
    pub fn of(doc: &Subscription, checker: &dyn SelectorChecker) -> Self {
        let invalid_groups = doc
            .apps
            .iter()
            .flat_map(|app| app.groups.iter().map(move |group| (app, group)))
            .filter(|(_, group)| !group.check_selectors(checker))
            .map(|(app, group)| InvalidGroup {
                app_id: app.id.clone(),
                key: group.key,
                name: group.name.clone(),
            })
            .collect();

        Self {
            id: doc.id,
            name: doc.name.clone(),
            version: doc.version,
            apps: doc.apps.len(),
            groups: doc.group_count(),
            rules: doc.rule_count(),
            invalid_groups,
            duplicates: find_duplicates(doc),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Subscription: {} (id {}, version {})", self.name, self.id, self.version)?;
        writeln!(f, "  Apps: {}", self.apps)?;
        writeln!(f, "  Groups: {}", self.groups)?;
        write!(f, "  Rules: {}", self.rules)?;
        for group in &self.invalid_groups {
            write!(f, "\n  Invalid selectors: app {} group {}", group.app_id, group.key)?;
            if let Some(ref name) = group.name {
                write!(f, " ({name})")?;
            }
        }
        Ok(())
    }
}
