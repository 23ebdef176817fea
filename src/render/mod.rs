//! テンプレートのレンダリング
//!
//! テンプレートファイル・テンプレート文字列・マクロを HTML にレンダリングし、
//! 比較しやすい形（compact / pretty）と CSS セレクタで問い合わせ可能な
//! ドキュメントを提供します。

/// Comparison-friendly HTML transforms
pub mod cleanup;
/// Template functions and loader
mod context;
/// Render errors
mod error;
/// Render result
mod output;
/// Engine setup and render entry point
mod renderer;
/// Render request types
mod request;

pub use error::{
    RenderError,
    RendererError,
};
pub use output::RenderOutput;
pub use renderer::{
    Renderer,
    RendererBuilder,
};
pub use request::{
    MacroCall,
    RenderRequest,
    RenderTarget,
};
