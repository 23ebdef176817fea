//! テンプレートエンジンの設定とレンダリング

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use minijinja::value::Kwargs;
use minijinja::{
    AutoEscape,
    Environment,
    Value,
};
use serde_json::Map;

use super::context::{
    call_ctx,
    call_translate,
    load_template,
};
use super::{
    MacroCall,
    RenderError,
    RenderOutput,
    RenderRequest,
    RenderTarget,
    RendererError,
};
use crate::config::{
    self,
    ConfigError,
    RendererSettings,
};
use crate::locale::{
    self,
    LocaleDictionary,
};
use crate::translate::{
    ResolutionMode,
    Translator,
};

/// 環境の構築時に呼ばれるフック
type EnvironmentHook = Box<dyn Fn(&mut Environment<'static>) + Send + Sync>;

/// テンプレートエンジン・ロケール辞書・翻訳器をまとめたレンダラー
///
/// 辞書は構築時に 1 度だけ読み込まれ、以降は読み取り専用で共有されます。
/// レンダリングごとに環境を複製し、`translate` と `ctx` を登録します。
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Template environment without the per-render functions
    env: Environment<'static>,
    /// Resolution policy selected at construction
    translator: Translator,
    /// Merged dictionary shared with the translator
    locale: Option<Arc<LocaleDictionary>>,
    /// Settings the renderer was built from
    settings: RendererSettings,
}

impl Renderer {
    #[must_use]
    pub fn builder() -> RendererBuilder {
        RendererBuilder::default()
    }

    /// 設定からレンダラーを作成
    ///
    /// # Errors
    /// - 設定のバリデーションエラー
    /// - ロケールの読み込みエラー
    pub fn from_settings(settings: RendererSettings) -> Result<Self, RendererError> {
        RendererBuilder::default().settings(settings).build()
    }

    /// ワークスペースの `.component-renderer.json` からレンダラーを作成
    ///
    /// # Errors
    /// - 設定ファイルの読み込み・バリデーションエラー
    /// - ロケールの読み込みエラー
    pub fn from_workspace(workspace_root: &Path) -> Result<Self, RendererError> {
        let settings = config::load_settings(workspace_root)?;
        Self::from_settings(settings)
    }

    /// 読み込まれたロケール辞書（ロケール未設定の場合は `None`）
    #[must_use]
    pub fn locale(&self) -> Option<&LocaleDictionary> {
        self.locale.as_deref()
    }

    #[must_use]
    pub const fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// テンプレート・テンプレート文字列・マクロのいずれかをレンダリングする
    ///
    /// # Errors
    /// - 対象が設定されていない場合 (`InvalidRequest`)
    /// - strict モードで翻訳が見つからない場合 (`Translation`)
    /// - テンプレートエラー (`Template`)
    pub fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError> {
        let Some(target) = &request.target else {
            return Err(RenderError::InvalidRequest);
        };

        let env = self.render_environment(request);
        let html = match target {
            RenderTarget::Template(name) => {
                tracing::debug!(template = %name, "Rendering template");
                env.get_template(name)?.render(&request.context)?
            }
            RenderTarget::String(source) => {
                tracing::debug!("Rendering template string");
                env.render_str(source, &request.context)?
            }
            RenderTarget::Macro(call) => {
                tracing::debug!(template = %call.template, name = %call.name, "Rendering macro");
                let source = macro_source(call)?;
                env.render_str(&source, macro_context(call, &request.context))?
            }
        };

        Ok(RenderOutput::new(html))
    }

    /// 1 回のレンダリング用に関数を登録した環境
    fn render_environment(&self, request: &RenderRequest) -> Environment<'static> {
        let mut env = self.env.clone();

        let translator = self.translator.clone();
        let scope = request.scope();
        env.add_function("translate", move |key: Value, options: Kwargs| {
            call_translate(&translator, &scope, &key, &options)
        });

        let context = Arc::new(request.context.clone());
        env.add_function("ctx", move |path: Option<String>| call_ctx(&context, path.as_deref()));

        env
    }
}

/// マクロ呼び出し用のテンプレート文字列
fn macro_source(call: &MacroCall) -> Result<String, RenderError> {
    if !is_identifier(&call.name) {
        return Err(RenderError::InvalidRequest);
    }

    let import = format!("{{% from \"{}\" import {} %}}", escape_string(&call.template), call.name);
    let args = if call.with_context { "_params, ctx()" } else { "_params" };

    Ok(if call.caller.is_some() {
        format!("{import}{{% call {}({args}) %}}{{{{ _caller|safe }}}}{{% endcall %}}", call.name)
    } else {
        format!("{import}{{{{ {}({args}) }}}}", call.name)
    })
}

/// マクロ呼び出し用のコンテキスト
fn macro_context(
    call: &MacroCall,
    context: &Map<String, serde_json::Value>,
) -> Map<String, serde_json::Value> {
    let mut context = context.clone();
    context.insert("_params".to_string(), call.params.clone());
    if let Some(caller) = &call.caller {
        context.insert("_caller".to_string(), serde_json::Value::String(caller.clone()));
    }
    context
}

/// マクロ名として使える識別子か
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// 文字列リテラル用のエスケープ
fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// [`Renderer`] のビルダー
#[derive(Default)]
pub struct RendererBuilder {
    /// Settings collected so far
    settings: RendererSettings,
    /// Global registration hooks, run first
    globals: Vec<EnvironmentHook>,
    /// Filter registration hooks
    filters: Vec<EnvironmentHook>,
}

impl fmt::Debug for RendererBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererBuilder")
            .field("settings", &self.settings)
            .field("globals", &self.globals.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl RendererBuilder {
    /// 設定をまとめて置き換える
    #[must_use]
    pub fn settings(mut self, settings: RendererSettings) -> Self {
        self.settings = settings;
        self
    }

    /// テンプレート検索ディレクトリ（先に指定したものが優先）
    #[must_use]
    pub fn views<I, P>(mut self, views: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.settings.views = views.into_iter().map(Into::into).collect();
        self
    }

    /// ロケールのファイルまたはディレクトリ（後に指定したものが優先）
    #[must_use]
    pub fn locales<I, P>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.settings.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn realistic(mut self, realistic: bool) -> Self {
        self.settings.realistic = realistic;
        self
    }

    #[must_use]
    pub fn key_separator(mut self, separator: impl Into<String>) -> Self {
        self.settings.key_separator = separator.into();
        self
    }

    /// グローバル変数・関数を登録するフック
    #[must_use]
    pub fn globals(mut self, hook: impl Fn(&mut Environment<'static>) + Send + Sync + 'static) -> Self {
        self.globals.push(Box::new(hook));
        self
    }

    /// フィルタを登録するフック
    #[must_use]
    pub fn filters(mut self, hook: impl Fn(&mut Environment<'static>) + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(hook));
        self
    }

    /// # Errors
    /// - 設定のバリデーションエラー
    /// - ロケールの読み込みエラー
    pub fn build(self) -> Result<Renderer, RendererError> {
        let Self { settings, globals, filters } = self;
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let locale = locale::load(&settings.locales)?.map(Arc::new);
        let translator = Translator::new(
            locale.clone(),
            ResolutionMode::from_realistic(settings.realistic),
            settings.key_separator.clone(),
        );

        let mut env = create_environment(settings.views.clone());
        for hook in globals.iter().chain(&filters) {
            hook(&mut env);
        }

        tracing::debug!(
            views = ?settings.views,
            locales = settings.locales.len(),
            realistic = settings.realistic,
            "Renderer created"
        );

        Ok(Renderer { env, translator, locale, settings })
    }
}

/// 共通設定を適用した環境
fn create_environment(views: Vec<PathBuf>) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.set_loader(move |name| load_template(&views, name));
    env
}
