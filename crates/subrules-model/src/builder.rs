//! Top-down construction of the typed document from a generic JSON tree.
//!
//! One function per level. Each reads the shape-normalized object field by
//! field through the strict accessors in [`subrules_core::value`], so the
//! first missing required field or mistyped value aborts the whole build.
//! Duplicate identities are accepted; see [`crate::lint`] for reporting them.

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::Value;
use subrules_core::shape::{collection_items, normalize_node};
use subrules_core::value::{
    as_object, field_path, get_array, get_boolean, get_int, get_int_array, get_long, get_string,
    get_string_array, index_path,
};
use subrules_core::{Error, Object, Result};

use crate::document::{App, CommonProps, Group, Rule, Subscription};

/// Path prefix for subscription-level fields in error messages.
const SUBSCRIPTION: &str = "subscription";

/// Build a [`Subscription`] from the root object of a document.
pub fn build_subscription(root: &Object) -> Result<Subscription> {
    let id = get_long(root, SUBSCRIPTION, "id")?
        .ok_or_else(|| Error::missing(field_path(SUBSCRIPTION, "id")))?;
    let name = get_string(root, SUBSCRIPTION, "name")?
        .ok_or_else(|| Error::missing(field_path(SUBSCRIPTION, "name")))?;
    let version = get_int(root, SUBSCRIPTION, "version")?
        .ok_or_else(|| Error::missing(field_path(SUBSCRIPTION, "version")))?;

    // Older documents spell the support link `supportUrl`.
    let support_uri = match get_string(root, SUBSCRIPTION, "supportUri")? {
        Some(uri) => Some(uri),
        None => get_string(root, SUBSCRIPTION, "supportUrl")?,
    };

    let apps = get_array(root, SUBSCRIPTION, "apps")?
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, raw)| build_app(index, raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(Subscription {
        id,
        name,
        version,
        author: get_string(root, SUBSCRIPTION, "author")?,
        update_url: get_string(root, SUBSCRIPTION, "updateUrl")?,
        support_uri,
        apps,
    })
}

/// Build the app at position `index` of the root `apps` array.
///
/// Apps have no shorthand form: the node must be an object with an `id`.
pub fn build_app(index: usize, raw: &Value) -> Result<App> {
    let at = index_path("apps", index);
    if raw.is_null() {
        return Err(Error::malformed(format!("{at} is null")));
    }
    let obj = as_object(raw, &at)?;

    let id = get_string(obj, &at, "id")?.ok_or_else(|| Error::missing(field_path(&at, "id")))?;
    let groups_at = field_path(&at, "groups");
    let groups = collection_items(obj, "groups")
        .iter()
        .enumerate()
        .map(|(i, raw)| build_group(i, raw, &index_path(&groups_at, i)))
        .collect::<Result<Vec<_>>>()?;

    tracing::trace!(app = %id, groups = groups.len(), "built app");

    Ok(App {
        id,
        common: common_props(obj, &at)?,
        groups,
    })
}

/// Build the group at position `index` of its app.
///
/// A bare string or array stands for the group's `rules`. Without an explicit
/// `key` the group is keyed by `index`.
pub fn build_group(index: usize, raw: &Value, at: &str) -> Result<Group> {
    let obj = normalize_node(raw, "rules", at)?;

    let key = match get_int(&obj, at, "key")? {
        Some(key) => key,
        None => i32::try_from(index)
            .map_err(|_| Error::malformed(format!("{at} index does not fit a group key")))?,
    };

    let rules_at = field_path(at, "rules");
    let rules = collection_items(&obj, "rules")
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let rule_at = index_path(&rules_at, i);
            let rule_obj = normalize_node(raw, "matches", &rule_at)?;
            build_rule(&rule_obj, &rule_at)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Group {
        key,
        name: get_string(&obj, at, "name")?,
        desc: get_string(&obj, at, "desc")?,
        enable: get_boolean(&obj, at, "enable")?,
        common: common_props(&obj, at)?,
        rules,
        valid: OnceLock::new(),
    })
}

/// Build a rule from its already-normalized object form.
pub fn build_rule(obj: &Object, at: &str) -> Result<Rule> {
    Ok(Rule {
        name: get_string(obj, at, "name")?,
        key: get_int(obj, at, "key")?,
        pre_keys: get_int_array(obj, at, "preKeys")?.unwrap_or_default(),
        common: common_props(obj, at)?,
        matches: get_string_array(obj, at, "matches")?.unwrap_or_default(),
        exclude_matches: get_string_array(obj, at, "excludeMatches")?.unwrap_or_default(),
    })
}

fn common_props(obj: &Object, at: &str) -> Result<CommonProps> {
    Ok(CommonProps {
        activity_ids: get_string_array(obj, at, "activityIds")?,
        exclude_activity_ids: get_string_array(obj, at, "excludeActivityIds")?,
        cd: get_long(obj, at, "cd")?,
        app_filter: decode_filter(obj, at, "appFilter", "app filter object")?,
        device_filter: decode_filter(obj, at, "deviceFilter", "device filter object")?,
    })
}

/// Decode a filter sub-object by field name with serde.
fn decode_filter<T: DeserializeOwned>(
    obj: &Object,
    at: &str,
    field: &str,
    expected: &'static str,
) -> Result<Option<T>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => T::deserialize(raw)
            .map(Some)
            .map_err(|e| Error::TypeMismatch {
                path: field_path(at, field),
                expected,
                found: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn rule_defaults_to_empty_sequences() {
        let rule = build_rule(&Object::new(), "r").unwrap();
        assert_eq!(rule, Rule::default());
    }

    #[test]
    fn rule_reads_every_field() {
        let rule = build_rule(
            &object(json!({
                "name": "close ad",
                "key": 3,
                "preKeys": [1, 2],
                "cd": 1000,
                "activityIds": "com.app.Main",
                "excludeActivityIds": ["com.app.Settings"],
                "matches": ["A", "B"],
                "excludeMatches": "C",
                "appFilter": { "versionCode": { "minimum": 10 } },
            })),
            "r",
        )
        .unwrap();

        assert_eq!(rule.name.as_deref(), Some("close ad"));
        assert_eq!(rule.key, Some(3));
        assert_eq!(rule.pre_keys, vec![1, 2]);
        assert_eq!(rule.common.cd, Some(1000));
        assert_eq!(rule.common.activity_ids, Some(vec!["com.app.Main".into()]));
        assert_eq!(
            rule.common.exclude_activity_ids,
            Some(vec!["com.app.Settings".into()])
        );
        assert_eq!(rule.matches, vec!["A", "B"]);
        assert_eq!(rule.exclude_matches, vec!["C"]);
        let version_code = rule.common.app_filter.unwrap().version_code.unwrap();
        assert_eq!(version_code.minimum, Some(10));
    }

    #[test]
    fn group_shorthand_string_is_one_rule() {
        let group = build_group(0, &json!("a.b.c"), "g").unwrap();
        assert_eq!(group.key, 0);
        assert_eq!(group.rules.len(), 1);
        assert_eq!(group.rules[0].matches, vec!["a.b.c"]);
    }

    #[test]
    fn group_shorthand_array_is_many_rules() {
        let group = build_group(2, &json!(["A", { "matches": "B", "key": 1 }]), "g").unwrap();
        assert_eq!(group.key, 2);
        assert_eq!(group.rules.len(), 2);
        assert_eq!(group.rules[0].matches, vec!["A"]);
        assert_eq!(group.rules[1].matches, vec!["B"]);
        assert_eq!(group.rules[1].key, Some(1));
    }

    #[test]
    fn rule_array_shorthand_is_matches() {
        let group = build_group(0, &json!({ "rules": [["A", "B"]] }), "g").unwrap();
        assert_eq!(group.rules[0].matches, vec!["A", "B"]);
    }

    #[test]
    fn explicit_null_key_falls_back_to_index() {
        let group = build_group(5, &json!({ "key": null, "rules": [] }), "g").unwrap();
        assert_eq!(group.key, 5);
    }

    #[test]
    fn group_metadata() {
        let group = build_group(
            0,
            &json!({ "key": 9, "name": "skip", "desc": "d", "enable": false }),
            "g",
        )
        .unwrap();
        assert_eq!(group.key, 9);
        assert_eq!(group.name.as_deref(), Some("skip"));
        assert_eq!(group.desc.as_deref(), Some("d"));
        assert_eq!(group.enable, Some(false));
        assert!(group.rules.is_empty());
    }

    #[test]
    fn null_rule_node_is_malformed() {
        let err = build_group(0, &json!({ "rules": [null] }), "apps[0].groups[0]").unwrap_err();
        assert_matches!(err, Error::Malformed(ref msg) if msg.contains("apps[0].groups[0].rules[0]"));
    }

    #[test]
    fn null_group_node_is_malformed() {
        let err = build_app(0, &json!({ "id": "a", "groups": [null] })).unwrap_err();
        assert_matches!(err, Error::Malformed(_));
    }

    #[test]
    fn null_app_node_is_malformed() {
        let err = build_app(0, &Value::Null).unwrap_err();
        assert_matches!(err, Error::Malformed(ref msg) if msg.contains("apps[0]"));
    }

    #[test]
    fn app_requires_object() {
        let err = build_app(1, &json!("com.app")).unwrap_err();
        assert_matches!(err, Error::TypeMismatch { ref path, expected: "object", .. } if path == "apps[1]");

        let err = build_app(1, &json!([{ "id": "a" }])).unwrap_err();
        assert_matches!(err, Error::TypeMismatch { ref path, expected: "object", .. } if path == "apps[1]");
    }

    #[test]
    fn app_requires_id() {
        let err = build_app(2, &json!({ "groups": [] })).unwrap_err();
        assert_eq!(err.to_string(), "missing apps[2].id");
    }

    #[test]
    fn nested_mismatch_reports_full_path() {
        let err = build_app(
            0,
            &json!({ "id": "a", "groups": [{}, { "rules": { "preKeys": ["x"] } }] }),
        )
        .unwrap_err();
        assert_eq!(err.path(), Some("apps[0].groups[1].rules[0].preKeys[0]"));
    }

    #[test]
    fn bad_filter_is_type_mismatch() {
        let err = build_rule(
            &object(json!({ "deviceFilter": { "sdkInt": { "minimum": "30" } } })),
            "r",
        )
        .unwrap_err();
        assert_matches!(err, Error::TypeMismatch { ref path, .. } if path == "r.deviceFilter");
    }

    #[test]
    fn null_filter_is_absent() {
        let rule = build_rule(&object(json!({ "appFilter": null })), "r").unwrap();
        assert!(rule.common.app_filter.is_none());
    }

    #[test]
    fn subscription_support_url_alias() {
        let doc = build_subscription(&object(json!({
            "id": 1, "name": "n", "version": 1, "supportUrl": "https://example.com/issues"
        })))
        .unwrap();
        assert_eq!(doc.support_uri.as_deref(), Some("https://example.com/issues"));

        let doc = build_subscription(&object(json!({
            "id": 1, "name": "n", "version": 1,
            "supportUri": "https://a", "supportUrl": "https://b"
        })))
        .unwrap();
        assert_eq!(doc.support_uri.as_deref(), Some("https://a"));
    }

    #[test]
    fn root_apps_has_no_shorthand() {
        let err = build_subscription(&object(json!({
            "id": 1, "name": "n", "version": 1, "apps": { "id": "a" }
        })))
        .unwrap_err();
        assert_matches!(err, Error::TypeMismatch { ref path, .. } if path == "subscription.apps");
    }
}
