//! 比較用の HTML 整形
//!
//! どちらの変換も純粋関数で、2 回適用しても結果は変わりません。

use std::sync::LazyLock;

use regex::Regex;

/// 定数パターンをコンパイルする
#[allow(clippy::expect_used)]
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("cleanup pattern is valid")
}

/// 改行とその前後の空白
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| regex(r"\s*\n\s*"));
/// タグ直後の空白
static AFTER_TAG: LazyLock<Regex> = LazyLock::new(|| regex(r">\s+"));
/// タグ直前の空白
static BEFORE_TAG: LazyLock<Regex> = LazyLock::new(|| regex(r"\s+<"));
/// 開始タグの先頭
static TAG_OPEN: LazyLock<Regex> = LazyLock::new(|| regex(r"<[A-Za-z]"));
/// 終了タグ
static TAG_CLOSE: LazyLock<Regex> = LazyLock::new(|| regex(r"</[^>]*>"));
/// 空行
static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"\n\s*\n"));

/// `&rsquo;` を文字に戻す
fn unescape_apostrophe(html: &str) -> String {
    html.replace("&rsquo;", "\u{2019}")
}

/// タグ間の空白を取り除き 1 行にまとめる
#[must_use]
pub fn compact(html: &str) -> String {
    let html = unescape_apostrophe(html);
    let html = LINE_BREAK.replace_all(&html, " ");
    let html = AFTER_TAG.replace_all(&html, ">");
    let html = BEFORE_TAG.replace_all(&html, "<");
    html.trim().to_string()
}

/// 開始タグの前と終了タグの後で改行する
#[must_use]
pub fn pretty(html: &str) -> String {
    let html = unescape_apostrophe(html);
    let html = TAG_OPEN.replace_all(&html, "\n$0");
    let html = TAG_CLOSE.replace_all(&html, "$0\n");
    let html = BLANK_LINE.replace_all(&html, "\n");
    html.trim().to_string()
}
