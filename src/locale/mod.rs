//! ロケール辞書の読み込みとマージ
//!
//! JSON / YAML の断片ファイル（またはそれらを含むディレクトリ）を読み込み、
//! ファイル名から導出したマウントパスに配置したうえで 1 つの辞書へ深くマージします。

/// Merged dictionary and deep merge
mod dictionary;
/// Locale loading errors
mod error;
/// Filesystem traversal and parsing
mod loader;
/// File name to dictionary path mapping
mod mount;

pub use dictionary::{
    LocaleDictionary,
    deep_merge,
};
pub use error::LocaleError;
pub use loader::{
    LocaleFormat,
    load,
    load_source,
};
pub use mount::{
    mount,
    mount_path,
};
