use std::error::Error as _;

use thiserror::Error;

use crate::config::ConfigError;
use crate::locale::LocaleError;
use crate::translate::TranslateError;

/// Errors raised while building a renderer.
#[derive(Error, Debug)]
pub enum RendererError {
    /// Invalid or unreadable settings
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Locale sources could not be loaded
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// Errors raised by a single render call.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The request selects neither a template, a template string nor a macro.
    #[error("Invalid render request: set a template, a template string or a macro call")]
    InvalidRequest,
    /// A `translate()` call failed in strict mode.
    #[error(transparent)]
    Translation(#[from] TranslateError),
    /// The template engine rejected or failed the template.
    #[error("Template rendering failed: {0:#}")]
    Template(#[source] minijinja::Error),
    /// `select` / `text` received an unparsable selector.
    #[error("Invalid CSS selector '{selector}': {message}")]
    Selector {
        /// Selector as given
        selector: String,
        /// Parser message
        message: String,
    },
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        match find_translate_error(&err) {
            Some(translate_error) => Self::Translation(translate_error),
            None => Self::Template(err),
        }
    }
}

/// Walk the source chain for a translation failure raised inside a template.
fn find_translate_error(err: &minijinja::Error) -> Option<TranslateError> {
    let mut source = err.source();
    while let Some(current) = source {
        if let Some(translate_error) = current.downcast_ref::<TranslateError>() {
            return Some(translate_error.clone());
        }
        source = current.source();
    }
    None
}
