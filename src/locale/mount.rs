//! Mount path derivation for locale files.

use std::path::Path;

use serde_json::{
    Map,
    Value,
};

/// File stem that mounts its content at the root of the enclosing scope.
const DEFAULT_SEGMENT: &str = "default";

/// Derive the dictionary path a locale file is mounted at from its file name.
///
/// The extension is stripped and the remaining dot-separated segments become
/// nesting levels. A leading `default` segment is dropped, so `default.json`
/// mounts at the root of its scope.
///
/// # Examples
/// - `a.b.json` → `["a", "b"]`
/// - `en.yml` → `["en"]`
/// - `default.json` → `[]`
/// - `default.en.yaml` → `["en"]`
#[must_use]
pub fn mount_path(file_name: &str) -> Vec<String> {
    let stem = Path::new(file_name)
        .file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().to_string());

    let mut segments = stem.split('.').filter(|segment| !segment.is_empty()).peekable();
    if segments.peek() == Some(&DEFAULT_SEGMENT) {
        segments.next();
    }

    segments.map(str::to_string).collect()
}

/// Wrap `content` so that it sits at `segments` inside a new mapping.
///
/// An empty path returns `content` unchanged.
#[must_use]
pub fn mount(segments: &[String], content: Map<String, Value>) -> Map<String, Value> {
    segments.iter().rev().fold(content, |inner, segment| {
        let mut outer = Map::new();
        outer.insert(segment.clone(), Value::Object(inner));
        outer
    })
}
