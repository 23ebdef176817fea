use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading locale sources.
///
/// Loading is all-or-nothing, so every variant aborts the whole load.
#[derive(Error, Debug)]
pub enum LocaleError {
    /// The source path does not exist or could not be read.
    #[error("Failed to read locale source '{}': {source}", .path.display())]
    Io {
        /// Failing source path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The file extension is not one of `.json`, `.yml` or `.yaml`.
    #[error("Unsupported locale file '{}': expected a .json, .yml or .yaml file", .path.display())]
    UnsupportedFormat {
        /// Offending file
        path: PathBuf,
    },
    /// The file content could not be parsed into a mapping.
    #[error("Failed to parse locale file '{}': {message}", .path.display())]
    Parse {
        /// Offending file
        path: PathBuf,
        /// Parser message
        message: String,
    },
    /// The locale file filter could not be built.
    #[error("Invalid locale file pattern: {0}")]
    Pattern(#[from] globset::Error),
}

impl LocaleError {
    /// Path of the source that caused the error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } | Self::UnsupportedFormat { path } | Self::Parse { path, .. } => {
                Some(path)
            }
            Self::Pattern(_) => None,
        }
    }
}
