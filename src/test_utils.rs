//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use serde_json::Value;

use crate::locale::LocaleDictionary;

/// テスト用のファイルを作成する
///
/// 親ディレクトリが存在しない場合は作成します。
///
/// # Arguments
/// * `root` - 基準ディレクトリ
/// * `relative_path` - `root` からの相対パス
/// * `content` - ファイル内容
///
/// # Returns
/// 作成したファイルのパス
pub(crate) fn write_file(root: &Path, relative_path: &str, content: &str) -> PathBuf {
    let path = root.join(relative_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// JSON から共有用の `LocaleDictionary` を作成する
pub(crate) fn create_dictionary(json: &Value) -> Arc<LocaleDictionary> {
    Arc::new(LocaleDictionary::new(json.as_object().cloned().unwrap()))
}
