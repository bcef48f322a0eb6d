//! Constraint filters attached to apps, groups, and rules.
//!
//! Filters have no shorthand forms, so they are decoded directly by serde
//! field name. The only derived state is [`StringFilter::compiled_pattern`],
//! which is computed once and never fails: an unparsable pattern disables the
//! pattern constraint instead of rejecting the document.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Constraints on an integer property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFilter {
    /// Allowed values; any value is allowed when absent.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<i32>>,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i32>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i32>,
}

impl NumberFilter {
    /// Whether `value` satisfies every constraint present on this filter.
    pub fn accepts(&self, value: i64) -> bool {
        if let Some(ref allowed) = self.enum_values {
            if !allowed.iter().any(|v| i64::from(*v) == value) {
                return false;
            }
        }
        if self.minimum.is_some_and(|min| value < i64::from(min)) {
            return false;
        }
        if self.maximum.is_some_and(|max| value > i64::from(max)) {
            return false;
        }
        true
    }
}

/// Constraints on a string property.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    /// Allowed values; any value is allowed when absent.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Inclusive minimum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i32>,
    /// Inclusive maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i32>,
    /// Regular expression the whole value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip)]
    compiled: OnceLock<Option<Regex>>,
}

impl PartialEq for StringFilter {
    fn eq(&self, other: &Self) -> bool {
        self.enum_values == other.enum_values
            && self.min_length == other.min_length
            && self.max_length == other.max_length
            && self.pattern == other.pattern
    }
}

impl Eq for StringFilter {}

impl StringFilter {
    /// A filter that only constrains values by `pattern`.
    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }

    /// The compiled form of [`pattern`](Self::pattern), anchored to the whole
    /// value.
    ///
    /// `None` both when no pattern is set and when it does not compile.
    /// Computed on first access and cached for the lifetime of the filter.
    pub fn compiled_pattern(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| {
                let pattern = self.pattern.as_deref()?;
                match Regex::new(&format!("^(?:{pattern})$")) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::warn!(pattern, error = %e, "ignoring invalid filter pattern");
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Whether `value` satisfies every applicable constraint.
    ///
    /// A pattern that failed to compile is not applicable and never rejects.
    pub fn accepts(&self, value: &str) -> bool {
        if let Some(ref allowed) = self.enum_values {
            if !allowed.iter().any(|v| v == value) {
                return false;
            }
        }
        let len = i64::try_from(value.chars().count()).unwrap_or(i64::MAX);
        if self.min_length.is_some_and(|min| len < i64::from(min)) {
            return false;
        }
        if self.max_length.is_some_and(|max| len > i64::from(max)) {
            return false;
        }
        self.compiled_pattern().map_or(true, |re| re.is_match(value))
    }
}

/// Constraints on the target application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<StringFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<StringFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_code: Option<NumberFilter>,
}

/// Constraints on the device the rules run on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<StringFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<StringFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<StringFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<StringFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_int: Option<NumberFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<StringFilter>,
}
