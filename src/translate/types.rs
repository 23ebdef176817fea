//! 翻訳呼び出しの型定義

use std::collections::HashSet;

use thiserror::Error;

/// 翻訳キーの候補リスト
///
/// 単一のキーは 1 要素のリストとして扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationKeys(Vec<String>);

impl TranslationKeys {
    #[must_use]
    pub const fn new(keys: Vec<String>) -> Self {
        Self(keys)
    }

    /// 最初の候補キー
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TranslationKeys {
    fn from(key: &str) -> Self {
        Self(vec![key.to_string()])
    }
}

impl From<String> for TranslationKeys {
    fn from(key: String) -> Self {
        Self(vec![key])
    }
}

impl From<Vec<String>> for TranslationKeys {
    fn from(keys: Vec<String>) -> Self {
        Self(keys)
    }
}

impl<const N: usize> From<[&str; N]> for TranslationKeys {
    fn from(keys: [&str; N]) -> Self {
        Self(keys.iter().map(ToString::to_string).collect())
    }
}

/// `translate()` 呼び出しごとのオプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// キーが見つからない場合に使う値
    pub default: Option<String>,
    /// 見つからない場合にキー自身へフォールバックするか（デフォルト: true）
    ///
    /// strict モードでは、false の場合に例外を出さず空になる。
    pub self_key: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self { default: None, self_key: true }
    }
}

impl TranslateOptions {
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub const fn without_self(mut self) -> Self {
        self.self_key = false;
        self
    }
}

/// 翻訳が見つからない場合の例外を抑制するキー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Ignore {
    /// 抑制しない
    #[default]
    None,
    /// すべてのキーを抑制する
    All,
    /// 指定したキーのみ抑制する
    Keys(HashSet<String>),
}

impl Ignore {
    /// 指定したキーのみを対象にする `Ignore` を作成
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Keys(keys.into_iter().map(Into::into).collect())
    }

    /// `key` が抑制対象かどうか
    #[must_use]
    pub fn covers(&self, key: &str) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Keys(keys) => keys.contains(key),
        }
    }
}

impl From<bool> for Ignore {
    fn from(ignore_all: bool) -> Self {
        if ignore_all { Self::All } else { Self::None }
    }
}

/// レンダリング 1 回分の翻訳設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderScope {
    /// 翻訳値を表示するか（false の場合 strict モードでは `[key]` を表示）
    pub translate: bool,
    pub ignore: Ignore,
}

/// 翻訳解決時のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// strict モードでキーが見つからない
    #[error("Translation not found for key '{key}'")]
    NotFound {
        /// 見つからなかったキー
        key: String,
    },
}
