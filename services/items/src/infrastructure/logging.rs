/// ログ基盤モジュール
///
/// Lambda/CloudWatch向けにJSON形式の構造化ログを出力する。
use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// ログレベル未指定時のデフォルト
const DEFAULT_LOG_LEVEL: &str = "info";

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// `RUST_LOG`が設定されていればそのフィルタを、なければ`info`を使用する。
/// 複数回呼び出しても最初の1回のみ初期化する。
///
/// # 使用例
/// ```ignore
/// use items::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!("Lambda function started");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

        // CloudWatch Logs Insightsでフィールド検索できるようイベントをフラット化
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(true);

        // 既存のグローバルサブスクライバーがあればそちらに出力を任せる
        if let Err(err) = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
        {
            tracing::warn!(error = %err, "ログサブスクライバーは初期化済み");
        }
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
