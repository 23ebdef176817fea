//! Merged locale dictionary.

use std::collections::HashMap;

use serde_json::{
    Map,
    Value,
};

/// Nested translation mapping built from every loaded locale source.
///
/// The dictionary is built once and never mutated afterwards; renderers share
/// it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleDictionary {
    /// Merged top-level entries
    entries: Map<String, Value>,
}

impl LocaleDictionary {
    #[must_use]
    pub const fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Top-level entries of the dictionary.
    #[must_use]
    pub const fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Map<String, Value> {
        self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a key path such as `common.hello`.
    ///
    /// Intermediate mappings are returned as-is when the path stops at one.
    /// A `null` value counts as missing.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use component_renderer::locale::LocaleDictionary;
    ///
    /// let json = json!({ "common": { "hello": "Hello" } });
    /// let dictionary = LocaleDictionary::new(json.as_object().cloned().unwrap_or_default());
    ///
    /// assert_eq!(dictionary.get("common.hello", "."), Some(&json!("Hello")));
    /// assert_eq!(dictionary.get("common.missing", "."), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str, separator: &str) -> Option<&Value> {
        if key.is_empty() {
            return None;
        }

        let mut segments = key.split(separator);
        let mut current = self.entries.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }

        (!current.is_null()).then_some(current)
    }

    /// Returns a new dictionary with `other` merged over `self`.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        Self::new(deep_merge(&self.entries, &other.entries))
    }

    /// Flatten the dictionary into a dot-separated key map.
    ///
    /// Non-string leaves are rendered with their JSON text.
    #[must_use]
    pub fn flatten(&self, separator: &str) -> HashMap<String, String> {
        let mut result = HashMap::new();
        for (key, value) in &self.entries {
            flatten_value(value, separator, key, &mut result);
        }
        result
    }
}

impl From<Map<String, Value>> for LocaleDictionary {
    fn from(entries: Map<String, Value>) -> Self {
        Self::new(entries)
    }
}

fn flatten_value(
    value: &Value,
    separator: &str,
    prefix: &str,
    result: &mut HashMap<String, String>,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_value(child, separator, &format!("{prefix}{separator}{key}"), result);
            }
        }
        Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {}
        _ => {
            result.insert(prefix.to_string(), value.to_string());
        }
    }
}

/// Deep-merge `overlay` over `base` into a new mapping.
///
/// Mappings present on both sides are merged recursively. Anywhere else the
/// overlay value wins outright, including when a leaf meets a mapping.
/// Neither input is modified.
#[must_use]
pub fn deep_merge(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        let next = match (merged.get(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                Value::Object(deep_merge(existing, incoming))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[fixture]
    fn dictionary() -> LocaleDictionary {
        sample_dictionary()
    }

    fn sample_dictionary() -> LocaleDictionary {
        LocaleDictionary::new(map(json!({
            "test1": "Test 1",
            "common": {
                "hello": "Hello",
                "nested": { "deep": "Deep value" }
            },
            "count": 3,
            "empty": null
        })))
    }

    #[rstest]
    #[case::top_level("test1", Some(json!("Test 1")))]
    #[case::nested("common.hello", Some(json!("Hello")))]
    #[case::deep("common.nested.deep", Some(json!("Deep value")))]
    #[case::mapping("common.nested", Some(json!({ "deep": "Deep value" })))]
    #[case::number("count", Some(json!(3)))]
    #[case::null_is_missing("empty", None)]
    #[case::missing("test3", None)]
    #[case::through_leaf("test1.more", None)]
    #[case::empty_key("", None)]
    fn get_resolves_key_paths(
        dictionary: LocaleDictionary,
        #[case] key: &str,
        #[case] expected: Option<Value>,
    ) {
        assert_eq!(dictionary.get(key, "."), expected.as_ref());
    }

    #[rstest]
    fn get_with_custom_separator(dictionary: LocaleDictionary) {
        assert_that!(dictionary.get("common:hello", ":"), some(eq(&json!("Hello"))));
        assert_that!(dictionary.get("common.hello", ":"), none());
    }

    #[rstest]
    fn deep_merge_later_value_wins() {
        let base = map(json!({ "a": "first", "shared": { "x": "1", "y": "2" } }));
        let overlay = map(json!({ "a": "second", "shared": { "y": "3", "z": "4" } }));

        let merged = deep_merge(&base, &overlay);

        assert_eq!(
            Value::Object(merged),
            json!({ "a": "second", "shared": { "x": "1", "y": "3", "z": "4" } })
        );
    }

    #[rstest]
    fn deep_merge_does_not_modify_inputs() {
        let base = map(json!({ "shared": { "x": "1" } }));
        let overlay = map(json!({ "shared": { "x": "2" } }));

        let _merged = deep_merge(&base, &overlay);

        assert_eq!(base["shared"]["x"], json!("1"));
        assert_eq!(overlay["shared"]["x"], json!("2"));
    }

    #[rstest]
    #[case::leaf_replaces_mapping(json!({ "k": { "a": "1" } }), json!({ "k": "leaf" }), json!({ "k": "leaf" }))]
    #[case::mapping_replaces_leaf(json!({ "k": "leaf" }), json!({ "k": { "a": "1" } }), json!({ "k": { "a": "1" } }))]
    fn deep_merge_type_mismatch_takes_overlay(
        #[case] base: Value,
        #[case] overlay: Value,
        #[case] expected: Value,
    ) {
        let merged = deep_merge(&map(base), &map(overlay));
        assert_eq!(Value::Object(merged), expected);
    }

    #[rstest]
    fn deep_merge_is_not_commutative() {
        let first = map(json!({ "k": "first" }));
        let second = map(json!({ "k": "second" }));

        assert_eq!(deep_merge(&first, &second)["k"], json!("second"));
        assert_eq!(deep_merge(&second, &first)["k"], json!("first"));
    }

    #[rstest]
    fn deep_merge_is_associative_in_application_order() {
        let a = map(json!({ "x": { "a": "1" }, "k": "a" }));
        let b = map(json!({ "x": { "b": "2" }, "k": "b" }));
        let c = map(json!({ "x": { "a": "3" } }));

        let left = deep_merge(&deep_merge(&a, &b), &c);
        let right = deep_merge(&a, &deep_merge(&b, &c));

        assert_eq!(left, right);
    }

    #[googletest::test]
    fn flatten_lists_leaf_keys() {
        let flattened = sample_dictionary().flatten(".");

        expect_that!(flattened.get("test1"), some(eq(&"Test 1".to_string())));
        expect_that!(flattened.get("common.nested.deep"), some(eq(&"Deep value".to_string())));
        expect_that!(flattened.get("count"), some(eq(&"3".to_string())));
        expect_that!(flattened.contains_key("empty"), eq(false));
        expect_that!(flattened.len(), eq(4));
    }

    #[rstest]
    fn merged_with_returns_new_dictionary(dictionary: LocaleDictionary) {
        let overlay = LocaleDictionary::new(map(json!({ "test1": "Override" })));

        let merged = dictionary.merged_with(&overlay);

        assert_that!(merged.get("test1", "."), some(eq(&json!("Override"))));
        assert_that!(dictionary.get("test1", "."), some(eq(&json!("Test 1"))));
    }
}
