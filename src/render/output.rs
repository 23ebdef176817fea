//! レンダリング結果

use scraper::{
    Html,
    Selector,
};

use super::RenderError;
use super::cleanup;

/// レンダリングされた HTML と比較用の表現
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Raw rendered HTML
    html: String,
}

impl RenderOutput {
    #[must_use]
    pub const fn new(html: String) -> Self {
        Self { html }
    }

    /// 整形前の HTML
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }

    /// タグ間の空白を取り除いた 1 行の HTML
    #[must_use]
    pub fn compact(&self) -> String {
        cleanup::compact(&self.html)
    }

    /// タグごとに改行した HTML
    #[must_use]
    pub fn pretty(&self) -> String {
        cleanup::pretty(&self.html)
    }

    /// HTML フラグメントとして解析したドキュメント
    #[must_use]
    pub fn document(&self) -> Html {
        Html::parse_fragment(&self.html)
    }

    /// CSS セレクタに一致する要素の HTML
    ///
    /// # Errors
    /// セレクタが不正な場合
    pub fn select(&self, selector: &str) -> Result<Vec<String>, RenderError> {
        let selector = parse_selector(selector)?;
        Ok(self.document().select(&selector).map(|element| element.html()).collect())
    }

    /// CSS セレクタに一致する要素のテキスト
    ///
    /// # Errors
    /// セレクタが不正な場合
    pub fn text(&self, selector: &str) -> Result<Vec<String>, RenderError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .document()
            .select(&selector)
            .map(|element| element.text().collect::<String>())
            .collect())
    }
}

impl From<RenderOutput> for String {
    fn from(output: RenderOutput) -> Self {
        output.html
    }
}

/// セレクタ文字列を解析する
fn parse_selector(selector: &str) -> Result<Selector, RenderError> {
    Selector::parse(selector).map_err(|err| RenderError::Selector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}
