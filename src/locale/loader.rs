//! Locale source loading.

use std::fs;
use std::path::Path;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;
use serde_json::{
    Map,
    Value,
};

use super::{
    LocaleDictionary,
    LocaleError,
    deep_merge,
    mount,
    mount_path,
};

/// File name patterns picked up when a directory is expanded.
const LOCALE_FILE_PATTERNS: [&str; 3] = ["*.json", "*.yml", "*.yaml"];

/// Supported locale file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleFormat {
    /// `.json`
    Json,
    /// `.yml` / `.yaml`
    Yaml,
}

impl LocaleFormat {
    /// Infers the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yml" | "yaml") => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Parses `content` into a JSON value.
    fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Load and merge locale sources in order.
///
/// Later sources override earlier ones. Returns `Ok(None)` when `sources` is
/// empty, which callers treat as "no locale loaded".
///
/// # Errors
/// - A source path does not exist or cannot be read
/// - A file has an unsupported extension or cannot be parsed
pub fn load<P: AsRef<Path>>(sources: &[P]) -> Result<Option<LocaleDictionary>, LocaleError> {
    if sources.is_empty() {
        tracing::debug!("No locale sources configured");
        return Ok(None);
    }

    let mut merged = Map::new();
    for source in sources {
        let loaded = load_source(source.as_ref())?;
        merged = deep_merge(&merged, &loaded);
    }

    let dictionary = LocaleDictionary::new(merged);
    tracing::debug!(
        sources = sources.len(),
        top_level_keys = dictionary.entries().len(),
        "Locale dictionary loaded"
    );

    Ok(Some(dictionary))
}

/// Load a single locale source.
///
/// A file is parsed and mounted at the path derived from its file name. A
/// directory merges its immediate locale files in file name order; nested
/// directories and other files are skipped.
///
/// # Errors
/// See [`load`].
pub fn load_source(path: &Path) -> Result<Map<String, Value>, LocaleError> {
    let metadata = fs::metadata(path)
        .map_err(|source| LocaleError::Io { path: path.to_path_buf(), source })?;

    if metadata.is_dir() { load_directory(path) } else { load_mounted_file(path) }
}

/// Merge the locale files directly under `dir`.
fn load_directory(dir: &Path) -> Result<Map<String, Value>, LocaleError> {
    tracing::debug!(dir = %dir.display(), "Loading locale directory");
    let matcher = locale_file_matcher()?;

    let mut merged = Map::new();
    for result in WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(true)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
    {
        let entry = result.map_err(|err| LocaleError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::other(err),
        })?;

        // depth 0 はディレクトリ自身
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            tracing::debug!(path = %path.display(), "Skipping non-file entry");
            continue;
        }
        // `.json` のようなドットファイルは拡張子を持たない
        if !matcher.is_match(entry.file_name()) || LocaleFormat::from_path(path).is_none() {
            tracing::debug!(path = %path.display(), "Skipping non-locale file");
            continue;
        }

        let loaded = load_mounted_file(path)?;
        merged = deep_merge(&merged, &loaded);
    }

    Ok(merged)
}

/// Parse a file and mount it at its file name path.
fn load_mounted_file(path: &Path) -> Result<Map<String, Value>, LocaleError> {
    let content = parse_file(path)?;
    let segments = path
        .file_name()
        .map(|name| mount_path(&name.to_string_lossy()))
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), mount = %segments.join("."), "Loaded locale file");
    Ok(mount(&segments, content))
}

/// Parse a locale file whose root must be a mapping.
///
/// An empty document yields an empty mapping.
fn parse_file(path: &Path) -> Result<Map<String, Value>, LocaleError> {
    let format = LocaleFormat::from_path(path)
        .ok_or_else(|| LocaleError::UnsupportedFormat { path: path.to_path_buf() })?;

    let content = fs::read_to_string(path)
        .map_err(|source| LocaleError::Io { path: path.to_path_buf(), source })?;

    let parse_error = |message: String| LocaleError::Parse { path: path.to_path_buf(), message };
    match format.parse(&content).map_err(parse_error)? {
        Value::Object(map) => Ok(map),
        // 空のドキュメント（コメントのみを含む）
        Value::Null => Ok(Map::new()),
        other => Err(parse_error(format!(
            "expected a mapping at the document root, found {}",
            value_kind(&other)
        ))),
    }
}

/// Human readable kind of a JSON value.
const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

/// Matcher for [`LOCALE_FILE_PATTERNS`].
fn locale_file_matcher() -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in LOCALE_FILE_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }
    builder.build()
}
