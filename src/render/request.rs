//! レンダリング要求の型定義

use serde_json::{
    Map,
    Value,
};

use crate::translate::{
    Ignore,
    RenderScope,
};

/// レンダリング対象
#[derive(Debug, Clone, PartialEq)]
pub enum RenderTarget {
    /// 検索ディレクトリ内のテンプレートファイル
    Template(String),
    /// テンプレート文字列
    String(String),
    /// テンプレートから読み込むマクロ
    Macro(MacroCall),
}

/// マクロ呼び出し
#[derive(Debug, Clone, PartialEq)]
pub struct MacroCall {
    /// マクロを定義しているテンプレート
    pub template: String,
    /// マクロ名
    pub name: String,
    /// 第 1 引数として渡すパラメータ
    pub params: Value,
    /// `{% call %}` ブロックの本文（HTML としてそのまま出力される）
    pub caller: Option<String>,
    /// 第 2 引数としてレンダーコンテキストを渡すか
    pub with_context: bool,
}

impl MacroCall {
    #[must_use]
    pub fn new(template: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            name: name.into(),
            params: Value::Object(Map::new()),
            caller: None,
            with_context: false,
        }
    }

    #[must_use]
    pub fn params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    #[must_use]
    pub const fn with_context(mut self) -> Self {
        self.with_context = true;
        self
    }
}

/// `Renderer::render` への入力
///
/// 対象が設定されていない場合、レンダリングは `InvalidRequest` で失敗します。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderRequest {
    /// レンダリング対象
    pub target: Option<RenderTarget>,
    /// テンプレート変数
    pub context: Map<String, Value>,
    /// 翻訳値を表示するか
    pub translate: bool,
    /// 翻訳が見つからない場合の例外を抑制するキー
    pub ignore: Ignore,
}

impl RenderRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn template(name: impl Into<String>) -> Self {
        Self { target: Some(RenderTarget::Template(name.into())), ..Self::default() }
    }

    #[must_use]
    pub fn string(source: impl Into<String>) -> Self {
        Self { target: Some(RenderTarget::String(source.into())), ..Self::default() }
    }

    #[must_use]
    pub fn macro_call(call: MacroCall) -> Self {
        Self { target: Some(RenderTarget::Macro(call)), ..Self::default() }
    }

    /// テンプレート変数を設定する
    ///
    /// オブジェクト以外の値は無視される。
    #[must_use]
    pub fn context(mut self, context: Value) -> Self {
        if let Value::Object(map) = context {
            self.context = map;
        } else {
            tracing::warn!(kind = ?context, "Ignoring non-object render context");
        }
        self
    }

    #[must_use]
    pub const fn translate(mut self, translate: bool) -> Self {
        self.translate = translate;
        self
    }

    #[must_use]
    pub fn ignore(mut self, ignore: impl Into<Ignore>) -> Self {
        self.ignore = ignore.into();
        self
    }

    /// 翻訳設定を取り出す
    #[must_use]
    pub fn scope(&self) -> RenderScope {
        RenderScope { translate: self.translate, ignore: self.ignore.clone() }
    }
}
