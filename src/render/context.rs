//! テンプレートに公開する関数とテンプレートローダー

use std::fs;
use std::io;
use std::path::{
    Path,
    PathBuf,
};

use minijinja::value::{
    Kwargs,
    ValueKind,
};
use minijinja::{
    Error,
    ErrorKind,
    Value,
};
use serde_json::Map;

use crate::translate::{
    RenderScope,
    TranslateOptions,
    TranslationKeys,
    Translator,
};

/// `translate(key_or_keys, default=?, self=?)` の本体
///
/// 解決結果が未定義の場合は `undefined` を返し、空文字として描画される。
pub(super) fn call_translate(
    translator: &Translator,
    scope: &RenderScope,
    key: &Value,
    options: &Kwargs,
) -> Result<Value, Error> {
    let keys = translation_keys(key)?;
    let options = translate_options(options)?;

    match translator.translate(&keys, &options, scope) {
        Ok(Some(value)) => Ok(Value::from_serialize(&value)),
        Ok(None) => Ok(Value::UNDEFINED),
        Err(err) => Err(Error::new(ErrorKind::InvalidOperation, err.to_string()).with_source(err)),
    }
}

/// 文字列または文字列のリストを候補キーに変換
fn translation_keys(key: &Value) -> Result<TranslationKeys, Error> {
    if let Some(key) = key.as_str() {
        return Ok(key.into());
    }
    if key.kind() != ValueKind::Seq {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("translate() expects a key or a list of keys, got {}", key.kind()),
        ));
    }

    key.try_iter()?
        .map(|item| {
            item.as_str().map(ToString::to_string).ok_or_else(|| {
                Error::new(ErrorKind::InvalidOperation, "translation keys must be strings")
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(TranslationKeys::new)
}

/// キーワード引数 `default` と `self` を読み取る
fn translate_options(kwargs: &Kwargs) -> Result<TranslateOptions, Error> {
    let default: Option<String> = kwargs.get("default")?;
    let self_key: Option<bool> = kwargs.get("self")?;
    kwargs.assert_all_used()?;

    Ok(TranslateOptions {
        default,
        self_key: self_key.unwrap_or(true),
    })
}

/// `ctx(path=?)` の本体
///
/// 引数なしの場合はレンダーコンテキスト全体を返す。パスは `.` 区切りで、
/// 配列は数値のセグメントで参照できる。
pub(super) fn call_ctx(context: &Map<String, serde_json::Value>, path: Option<&str>) -> Value {
    let Some(path) = path.filter(|path| !path.is_empty()) else {
        return Value::from_serialize(context);
    };

    let mut segments = path.split('.');
    let found = segments.next().and_then(|first| context.get(first)).and_then(|root| {
        segments.try_fold(root, |current, segment| match current {
            serde_json::Value::Object(map) => map.get(segment),
            serde_json::Value::Array(items) => {
                segment.parse::<usize>().ok().and_then(|index| items.get(index))
            }
            _ => None,
        })
    });

    found.map_or(Value::UNDEFINED, Value::from_serialize)
}

/// 検索ディレクトリを順に探してテンプレートを読み込む
///
/// 親ディレクトリを参照する名前は見つからないものとして扱う。
pub(super) fn load_template(views: &[PathBuf], name: &str) -> Result<Option<String>, Error> {
    if name.split(['/', '\\']).any(|segment| segment == "..") {
        tracing::warn!(name, "Refusing template name outside the search directories");
        return Ok(None);
    }

    for view in views {
        let path = view.join(name);
        match read_template(&path) {
            Ok(Some(source)) => {
                tracing::debug!(path = %path.display(), "Loaded template");
                return Ok(Some(source));
            }
            Ok(None) => {}
            Err(err) => {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read template {}", path.display()),
                )
                .with_source(err));
            }
        }
    }

    Ok(None)
}

/// 存在しないファイルは `None`
fn read_template(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(Some(source)),
        Err(err) if matches!(err.kind(), io::ErrorKind::NotFound | io::ErrorKind::IsADirectory) => {
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
