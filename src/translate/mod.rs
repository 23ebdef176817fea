//! 翻訳キーの解決
//!
//! 2 つの解決ポリシーを提供します。
//!
//! - strict: 最初のキーのみを参照し、見つからない場合はエラー
//! - realistic: キーを順に試し、見つからなくてもエラーにしない

/// Resolution policies
mod resolver;
/// Translation call types
mod types;

use std::sync::Arc;

pub use resolver::{
    RealisticResolver,
    StrictResolver,
    TranslationResolver,
};
use serde_json::Value;
pub use types::{
    Ignore,
    RenderScope,
    TranslateError,
    TranslateOptions,
    TranslationKeys,
};

use crate::locale::LocaleDictionary;

/// 解決ポリシーの種類
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResolutionMode {
    /// 最初のキーのみ、見つからなければエラー
    #[default]
    Strict,
    /// キーを順に試し、エラーにしない
    Realistic,
}

impl ResolutionMode {
    /// `realistic` フラグから解決ポリシーを選択
    #[must_use]
    pub const fn from_realistic(realistic: bool) -> Self {
        if realistic { Self::Realistic } else { Self::Strict }
    }
}

/// レンダラーごとに 1 つ作られる翻訳器
///
/// 解決ポリシーは作成時に固定され、辞書は読み取り専用で共有されます。
#[derive(Debug, Clone)]
pub struct Translator {
    /// 選択された解決ポリシー
    resolver: Arc<dyn TranslationResolver>,
}

impl Translator {
    /// 辞書と解決ポリシーから翻訳器を作成
    ///
    /// # Arguments
    /// * `locale` - 読み込まれた辞書（読み込んでいない場合は `None`）
    /// * `mode` - 解決ポリシー
    /// * `separator` - キーパスの区切り文字
    #[must_use]
    pub fn new(
        locale: Option<Arc<LocaleDictionary>>,
        mode: ResolutionMode,
        separator: impl Into<String>,
    ) -> Self {
        match mode {
            ResolutionMode::Strict => Self::from_resolver(StrictResolver::new(locale, separator)),
            ResolutionMode::Realistic => {
                Self::from_resolver(RealisticResolver::new(locale, separator))
            }
        }
    }

    /// 任意の解決ポリシーから翻訳器を作成
    #[must_use]
    pub fn from_resolver(resolver: impl TranslationResolver + 'static) -> Self {
        Self { resolver: Arc::new(resolver) }
    }

    /// 翻訳を解決する
    ///
    /// # Returns
    /// - `Ok(Some(value))`: 表示する値
    /// - `Ok(None)`: 未定義（空文字として描画される）
    ///
    /// # Errors
    /// strict モードでキーが見つからず、抑制もされていない場合
    pub fn translate(
        &self,
        keys: &TranslationKeys,
        options: &TranslateOptions,
        scope: &RenderScope,
    ) -> Result<Option<Value>, TranslateError> {
        self.resolver.resolve(keys, options, scope)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::create_dictionary;

    #[rstest]
    #[case::strict(false, ResolutionMode::Strict)]
    #[case::realistic(true, ResolutionMode::Realistic)]
    fn mode_from_realistic(#[case] realistic: bool, #[case] expected: ResolutionMode) {
        assert_that!(ResolutionMode::from_realistic(realistic), eq(expected));
    }

    #[rstest]
    #[case::strict(ResolutionMode::Strict, true)]
    #[case::realistic(ResolutionMode::Realistic, false)]
    fn translator_uses_selected_policy(#[case] mode: ResolutionMode, #[case] fails: bool) {
        let locale = create_dictionary(&json!({ "test1": "Test 1" }));
        let translator = Translator::new(Some(locale), mode, ".");

        let result = translator.translate(
            &"test3".into(),
            &TranslateOptions::default(),
            &RenderScope::default(),
        );

        assert_that!(result.is_err(), eq(fails));
    }
}
