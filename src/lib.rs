//! component-renderer
//!
//! コンポーネントライブラリのテンプレートを、マージ済みのロケール辞書とともに
//! レンダリングし、HTML スナップショットテストで比較しやすい形に整形する
//! テスト支援ライブラリ

pub mod config;
pub mod locale;
pub mod logging;
pub mod render;
pub mod translate;

mod test_utils;

pub use config::RendererSettings;
pub use locale::LocaleDictionary;
pub use render::{
    MacroCall,
    RenderError,
    RenderOutput,
    RenderRequest,
    Renderer,
    RendererBuilder,
    RendererError,
};
pub use translate::{
    Ignore,
    ResolutionMode,
    Translator,
};
