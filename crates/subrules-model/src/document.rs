//! The typed subscription document.
//!
//! Ownership is a strict tree: a [`Subscription`] owns its [`App`]s, which
//! own their [`Group`]s, which own their [`Rule`]s. Nothing is shared and
//! nothing is mutated after the builder returns.

use std::sync::OnceLock;

use serde::Serialize;

use crate::filter::{AppFilter, DeviceFilter};
use crate::selector::{BalancedSelectorChecker, SelectorChecker};

/// Optional targeting properties shared by apps, groups, and rules.
///
/// Each level carries its own copy; a value absent at one level is absent,
/// not inherited from the parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_activity_ids: Option<Vec<String>>,
    /// Cooldown between triggers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cd: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_filter: Option<AppFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_filter: Option<DeviceFilter>,
}

/// Read access to the [`CommonProps`] of any level of the document.
pub trait HasCommonProps {
    fn common(&self) -> &CommonProps;

    fn activity_ids(&self) -> Option<&[String]> {
        self.common().activity_ids.as_deref()
    }

    fn exclude_activity_ids(&self) -> Option<&[String]> {
        self.common().exclude_activity_ids.as_deref()
    }

    fn cd(&self) -> Option<i64> {
        self.common().cd
    }

    fn app_filter(&self) -> Option<&AppFilter> {
        self.common().app_filter.as_ref()
    }

    fn device_filter(&self) -> Option<&DeviceFilter> {
        self.common().device_filter.as_ref()
    }
}

/// Root rule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    /// Update marker; callers compare it across fetches.
    pub version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_uri: Option<String>,
    /// Apps in source order.
    pub apps: Vec<App>,
}

impl Subscription {
    /// Number of groups across all apps.
    pub fn group_count(&self) -> usize {
        self.apps.iter().map(|app| app.groups.len()).sum()
    }

    /// Number of rules across all groups.
    pub fn rule_count(&self) -> usize {
        self.apps
            .iter()
            .flat_map(|app| &app.groups)
            .map(|group| group.rules.len())
            .sum()
    }
}

/// Rules scoped to one application package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    /// Package identifier.
    pub id: String,
    #[serde(flatten)]
    pub common: CommonProps,
    pub groups: Vec<Group>,
}

impl HasCommonProps for App {
    fn common(&self) -> &CommonProps {
        &self.common
    }
}

/// A named set of rules within an app.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Identity within the app; defaults to the group's position.
    pub key: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(flatten)]
    pub common: CommonProps,
    pub rules: Vec<Rule>,
    #[serde(skip)]
    pub(crate) valid: OnceLock<bool>,
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.name == other.name
            && self.desc == other.desc
            && self.enable == other.enable
            && self.common == other.common
            && self.rules == other.rules
    }
}

impl Eq for Group {}

impl HasCommonProps for Group {
    fn common(&self) -> &CommonProps {
        &self.common
    }
}

impl Group {
    /// A group with the given key and rules and nothing else set.
    pub fn new(key: i32, rules: Vec<Rule>) -> Self {
        Self {
            key,
            name: None,
            desc: None,
            enable: None,
            common: CommonProps::default(),
            rules,
            valid: OnceLock::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_enable(mut self, enable: bool) -> Self {
        self.enable = Some(enable);
        self
    }

    pub fn with_common(mut self, common: CommonProps) -> Self {
        self.common = common;
        self
    }

    /// Whether every selector of every rule passes [`BalancedSelectorChecker`].
    /// A group without rules is valid. Computed on first call and cached.
    pub fn is_valid(&self) -> bool {
        *self
            .valid
            .get_or_init(|| self.check_selectors(&BalancedSelectorChecker))
    }

    /// Whether every `matches` and `excludeMatches` entry of every rule is
    /// accepted by `checker`. Not cached.
    pub fn check_selectors(&self, checker: &dyn SelectorChecker) -> bool {
        self.rules
            .iter()
            .flat_map(|rule| rule.selectors())
            .all(|selector| checker.check(selector))
    }
}

/// A single matching rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identity within the group. No positional default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<i32>,
    /// Keys of rules in the same group this one is sequenced after.
    pub pre_keys: Vec<i32>,
    #[serde(flatten)]
    pub common: CommonProps,
    pub matches: Vec<String>,
    pub exclude_matches: Vec<String>,
}

impl HasCommonProps for Rule {
    fn common(&self) -> &CommonProps {
        &self.common
    }
}

impl Rule {
    /// All selector sources of this rule, `matches` first.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.matches
            .iter()
            .chain(&self.exclude_matches)
            .map(String::as_str)
    }
}
