//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    RendererSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".component-renderer.json";

/// ワークスペースから設定を読み込む
///
/// `.component-renderer.json` ファイルを探して読み込む
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<RendererSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: RendererSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

/// ワークスペースの設定を読み込み、パスを解決してバリデーションする
///
/// 設定ファイルがない場合はデフォルト値を使う。相対パスはワークスペースの
/// ルートからの相対パスとして解決される。
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_settings(workspace_root: &Path) -> Result<RendererSettings, ConfigError> {
    let settings = load_from_workspace(workspace_root)?.unwrap_or_default();
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    let settings = resolve_paths(settings, workspace_root);
    tracing::debug!("Settings loaded successfully: {:?}", settings);

    Ok(settings)
}

/// 相対パスを `root` 基準の絶対パスに変換
fn resolve_paths(settings: RendererSettings, root: &Path) -> RendererSettings {
    RendererSettings {
        views: settings.views.iter().map(|view| root.join(view)).collect(),
        locales: settings.locales.iter().map(|locale| root.join(locale)).collect(),
        ..settings
    }
}
