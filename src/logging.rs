//! ログ出力の初期化

use tracing_subscriber::EnvFilter;

/// テスト実行用のログ出力を初期化する
///
/// `RUST_LOG` でフィルタを指定できます。出力はテストハーネスに渡されるため、
/// 失敗したテストのログのみ表示されます。2 回目以降の呼び出しは何もしません。
pub fn init_test_logging() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    if let Err(err) = result {
        tracing::trace!(error = %err, "Logging already initialized");
    }
}
