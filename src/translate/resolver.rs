//! Translation resolution policies.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{
    RenderScope,
    TranslateError,
    TranslateOptions,
    TranslationKeys,
};
use crate::locale::LocaleDictionary;

/// Resolves a translation call against a locale dictionary.
///
/// `Ok(None)` means "undefined": the call renders as an empty string.
pub trait TranslationResolver: Send + Sync + fmt::Debug {
    /// # Errors
    /// Returns [`TranslateError::NotFound`] when the policy treats a missing
    /// key as fatal.
    fn resolve(
        &self,
        keys: &TranslationKeys,
        options: &TranslateOptions,
        scope: &RenderScope,
    ) -> Result<Option<Value>, TranslateError>;
}

/// Only the first candidate key counts; a missing, non-exempt key is an error.
///
/// With the display toggle off, successful lookups render as `[key]` so tests
/// can assert on keys instead of copy.
#[derive(Debug, Clone)]
pub struct StrictResolver {
    /// Merged dictionary, `None` when no locale source was configured.
    locale: Option<Arc<LocaleDictionary>>,
    /// Key path separator.
    separator: String,
}

impl StrictResolver {
    #[must_use]
    pub fn new(locale: Option<Arc<LocaleDictionary>>, separator: impl Into<String>) -> Self {
        Self { locale, separator: separator.into() }
    }
}

impl TranslationResolver for StrictResolver {
    fn resolve(
        &self,
        keys: &TranslationKeys,
        options: &TranslateOptions,
        scope: &RenderScope,
    ) -> Result<Option<Value>, TranslateError> {
        let Some(key) = keys.first() else {
            return Ok(None);
        };
        let Some(locale) = &self.locale else {
            return Ok(Some(bracketed(key)));
        };

        let resolved = locale
            .get(key, &self.separator)
            .map(display_text)
            .or_else(|| options.default.clone());

        match resolved {
            Some(text) if scope.translate => Ok(Some(Value::String(text))),
            Some(_) => Ok(Some(bracketed(key))),
            None if options.self_key && !scope.ignore.covers(key) => {
                tracing::debug!(key, "Missing translation");
                Err(TranslateError::NotFound { key: key.to_string() })
            }
            None => Ok(None),
        }
    }
}

/// Candidate keys are tried in order and a miss never fails.
///
/// Models locale fallback chains such as a regional variant followed by the
/// language default.
#[derive(Debug, Clone)]
pub struct RealisticResolver {
    /// Merged dictionary, `None` when no locale source was configured.
    locale: Option<Arc<LocaleDictionary>>,
    /// Key path separator.
    separator: String,
}

impl RealisticResolver {
    #[must_use]
    pub fn new(locale: Option<Arc<LocaleDictionary>>, separator: impl Into<String>) -> Self {
        Self { locale, separator: separator.into() }
    }
}

impl TranslationResolver for RealisticResolver {
    fn resolve(
        &self,
        keys: &TranslationKeys,
        options: &TranslateOptions,
        _scope: &RenderScope,
    ) -> Result<Option<Value>, TranslateError> {
        let Some(locale) = &self.locale else {
            return Ok(None);
        };

        if let Some(value) = keys.iter().find_map(|key| locale.get(key, &self.separator)) {
            return Ok(Some(value.clone()));
        }
        if let Some(default) = &options.default {
            return Ok(Some(Value::String(default.clone())));
        }
        if options.self_key {
            return Ok(keys.first().map(|key| Value::String(key.to_string())));
        }
        Ok(None)
    }
}

/// `[key]` 形式の表示
fn bracketed(key: &str) -> Value {
    Value::String(format!("[{key}]"))
}

/// 文字列はそのまま、それ以外は JSON として表示
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::create_dictionary;
    use crate::translate::Ignore;

    #[fixture]
    fn locale() -> Option<Arc<LocaleDictionary>> {
        Some(create_dictionary(&json!({
            "test1": "Test 1",
            "test2": "Test 2",
            "nested": { "key": "Nested" }
        })))
    }

    fn shown() -> RenderScope {
        RenderScope { translate: true, ..RenderScope::default() }
    }

    // ===== StrictResolver テスト =====

    #[rstest]
    fn strict_hit_with_display_on_returns_value(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = StrictResolver::new(locale, ".");

        let result = resolver.resolve(&"test1".into(), &TranslateOptions::default(), &shown());

        assert_that!(result, ok(some(eq(&json!("Test 1")))));
    }

    #[rstest]
    fn strict_hit_with_display_off_returns_bracketed_key(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = StrictResolver::new(locale, ".");

        let result =
            resolver.resolve(&"test1".into(), &TranslateOptions::default(), &RenderScope::default());

        assert_that!(result, ok(some(eq(&json!("[test1]")))));
    }

    #[rstest]
    fn strict_considers_only_first_key(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = StrictResolver::new(locale, ".");

        let result = resolver.resolve(
            &["test3", "test1"].into(),
            &TranslateOptions::default(),
            &shown(),
        );

        assert_that!(result, err(eq(&TranslateError::NotFound { key: "test3".to_string() })));
    }

    #[rstest]
    fn strict_miss_fails_with_key(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = StrictResolver::new(locale, ".");

        let result =
            resolver.resolve(&"test3".into(), &TranslateOptions::default(), &RenderScope::default());

        let error = result.unwrap_err();
        assert_that!(error.to_string(), contains_substring("test3"));
    }

    #[rstest]
    #[case::listed(Ignore::keys(["test3"]))]
    #[case::all(Ignore::All)]
    fn strict_miss_ignored_resolves_empty(
        locale: Option<Arc<LocaleDictionary>>,
        #[case] ignore: Ignore,
    ) {
        let resolver = StrictResolver::new(locale, ".");
        let scope = RenderScope { translate: true, ignore };

        let result = resolver.resolve(&"test3".into(), &TranslateOptions::default(), &scope);

        assert_that!(result, ok(none()));
    }

    #[rstest]
    fn strict_miss_ignore_other_key_still_fails(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = StrictResolver::new(locale, ".");
        let scope = RenderScope { translate: true, ignore: Ignore::keys(["test4"]) };

        let result = resolver.resolve(&"test3".into(), &TranslateOptions::default(), &scope);

        assert!(result.is_err());
    }

    #[rstest]
    fn strict_miss_without_self_resolves_empty(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = StrictResolver::new(locale, ".");

        let result = resolver.resolve(
            &"test3".into(),
            &TranslateOptions::default().without_self(),
            &shown(),
        );

        assert_that!(result, ok(none()));
    }

    #[rstest]
    #[case::display_on(true, "Fallback")]
    #[case::display_off(false, "[test3]")]
    fn strict_miss_with_default(
        locale: Option<Arc<LocaleDictionary>>,
        #[case] translate: bool,
        #[case] expected: &str,
    ) {
        let resolver = StrictResolver::new(locale, ".");
        let scope = RenderScope { translate, ..RenderScope::default() };

        let result = resolver.resolve(
            &"test3".into(),
            &TranslateOptions::default().with_default("Fallback"),
            &scope,
        );

        assert_that!(result, ok(some(eq(&json!(expected)))));
    }

    #[rstest]
    #[case::display_on(true)]
    #[case::display_off(false)]
    fn strict_without_locale_returns_bracketed_key(#[case] translate: bool) {
        let resolver = StrictResolver::new(None, ".");
        let scope = RenderScope { translate, ..RenderScope::default() };

        let result = resolver.resolve(&"test3".into(), &TranslateOptions::default(), &scope);

        assert_that!(result, ok(some(eq(&json!("[test3]")))));
    }

    #[rstest]
    fn strict_mapping_hit_is_displayed_as_text(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = StrictResolver::new(locale, ".");

        let result = resolver.resolve(&"nested".into(), &TranslateOptions::default(), &shown());

        assert_that!(result, ok(some(eq(&json!(r#"{"key":"Nested"}"#)))));
    }

    #[rstest]
    fn strict_empty_keys_resolve_empty(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = StrictResolver::new(locale, ".");

        let result =
            resolver.resolve(&TranslationKeys::default(), &TranslateOptions::default(), &shown());

        assert_that!(result, ok(none()));
    }

    // ===== RealisticResolver テスト =====

    #[rstest]
    fn realistic_first_hit_wins(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = RealisticResolver::new(locale, ".");

        let result = resolver.resolve(
            &["test3", "test2", "test1"].into(),
            &TranslateOptions::default(),
            &RenderScope::default(),
        );

        assert_that!(result, ok(some(eq(&json!("Test 2")))));
    }

    #[rstest]
    fn realistic_miss_uses_default(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = RealisticResolver::new(locale, ".");

        let result = resolver.resolve(
            &["test3", "test4"].into(),
            &TranslateOptions::default().with_default("Fallback"),
            &RenderScope::default(),
        );

        assert_that!(result, ok(some(eq(&json!("Fallback")))));
    }

    #[rstest]
    fn realistic_miss_falls_back_to_first_key(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = RealisticResolver::new(locale, ".");

        let result = resolver.resolve(
            &["test3", "test4"].into(),
            &TranslateOptions::default(),
            &RenderScope::default(),
        );

        assert_that!(result, ok(some(eq(&json!("test3")))));
    }

    #[rstest]
    fn realistic_miss_without_self_is_undefined(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = RealisticResolver::new(locale, ".");

        let result = resolver.resolve(
            &["test3", "test4"].into(),
            &TranslateOptions::default().without_self(),
            &RenderScope::default(),
        );

        assert_that!(result, ok(none()));
    }

    #[rstest]
    fn realistic_without_locale_is_undefined() {
        let resolver = RealisticResolver::new(None, ".");

        let result = resolver.resolve(
            &"test1".into(),
            &TranslateOptions::default().with_default("Fallback"),
            &RenderScope::default(),
        );

        assert_that!(result, ok(none()));
    }

    #[rstest]
    fn realistic_returns_mapping_as_is(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = RealisticResolver::new(locale, ".");

        let result =
            resolver.resolve(&"nested".into(), &TranslateOptions::default(), &RenderScope::default());

        assert_that!(result, ok(some(eq(&json!({ "key": "Nested" })))));
    }

    #[rstest]
    fn realistic_empty_keys_resolve_empty(locale: Option<Arc<LocaleDictionary>>) {
        let resolver = RealisticResolver::new(locale, ".");

        let result = resolver.resolve(
            &TranslationKeys::default(),
            &TranslateOptions::default(),
            &RenderScope::default(),
        );

        assert_that!(result, ok(none()));
    }
}
