/// DynamoDB接続設定
///
/// 環境変数:
/// - TABLE_NAME: アイテム保存用テーブル名（必須）
/// - DYNAMODB_ENDPOINT: エンドポイントの上書き（任意、DynamoDB Local向け）
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;
use tracing::info;

/// アイテムテーブル名の環境変数
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// DynamoDBエンドポイント上書きの環境変数
pub const DYNAMODB_ENDPOINT_VAR: &str = "DYNAMODB_ENDPOINT";

/// DynamoDB設定のエラー型
#[derive(Debug, Error)]
pub enum DynamoDbConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// テーブル名とクライアントを持つDynamoDB設定
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// アイテムテーブル名
    table_name: String,
}

impl DynamoDbConfig {
    /// 環境変数から設定を読み込み、DynamoDBクライアントを作成
    ///
    /// AWS認証情報とリージョンはaws-configの既定チェーンで解決する。
    /// テーブル名が未設定の場合はAWS設定を読み込む前に失敗する。
    pub async fn from_env() -> Result<Self, DynamoDbConfigError> {
        let table_name = Self::table_name_from_env()?;
        let endpoint = Self::endpoint_from_env();

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint) = &endpoint {
            info!(endpoint = %endpoint, "DynamoDBエンドポイントを上書き");
            loader = loader.endpoint_url(endpoint);
        }
        let aws_config = loader.load().await;

        Ok(Self {
            client: DynamoDbClient::new(&aws_config),
            table_name,
        })
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// アイテムテーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn table_name_from_env() -> Result<String, DynamoDbConfigError> {
        std::env::var(TABLE_NAME_VAR)
            .ok()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DynamoDbConfigError::MissingEnvVar(TABLE_NAME_VAR.to_string()))
    }

    fn endpoint_from_env() -> Option<String> {
        std::env::var(DYNAMODB_ENDPOINT_VAR)
            .ok()
            .filter(|endpoint| !endpoint.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Region};
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    /// ネットワークや認証情報に依存しないテスト用クライアント
    fn test_client() -> DynamoDbClient {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("ap-northeast-1"))
            .build();
        DynamoDbClient::from_conf(config)
    }

    #[test]
    fn test_missing_env_var_error_display() {
        let error = DynamoDbConfigError::MissingEnvVar("TABLE_NAME".to_string());
        assert_eq!(error.to_string(), "Missing environment variable: TABLE_NAME");
    }

    #[test]
    fn test_dynamodb_config_new() {
        let config = DynamoDbConfig::new(test_client(), "test-items".to_string());

        assert_eq!(config.table_name(), "test-items");
        let _client_ref = config.client();
    }

    #[tokio::test]
    #[serial(items_env)]
    async fn test_from_env_missing_table_name() {
        unsafe { remove_env(TABLE_NAME_VAR) };

        let result = DynamoDbConfig::from_env().await;

        match result {
            Err(DynamoDbConfigError::MissingEnvVar(var)) => assert_eq!(var, "TABLE_NAME"),
            Ok(_) => panic!("TABLE_NAME未設定ならエラーになるべき"),
        }
    }

    /// 空文字列のテーブル名は未設定として扱う
    #[test]
    #[serial(items_env)]
    fn test_table_name_empty_is_missing() {
        unsafe { set_env(TABLE_NAME_VAR, "") };

        assert!(DynamoDbConfig::table_name_from_env().is_err());

        unsafe { remove_env(TABLE_NAME_VAR) };
    }

    #[test]
    #[serial(items_env)]
    fn test_table_name_from_env() {
        unsafe { set_env(TABLE_NAME_VAR, "my-items-table") };

        assert_eq!(
            DynamoDbConfig::table_name_from_env().unwrap(),
            "my-items-table"
        );

        unsafe { remove_env(TABLE_NAME_VAR) };
    }

    #[test]
    #[serial(items_env)]
    fn test_endpoint_from_env() {
        unsafe { remove_env(DYNAMODB_ENDPOINT_VAR) };
        assert_eq!(DynamoDbConfig::endpoint_from_env(), None);

        unsafe { set_env(DYNAMODB_ENDPOINT_VAR, "") };
        assert_eq!(DynamoDbConfig::endpoint_from_env(), None);

        unsafe { set_env(DYNAMODB_ENDPOINT_VAR, "http://localhost:8000") };
        assert_eq!(
            DynamoDbConfig::endpoint_from_env(),
            Some("http://localhost:8000".to_string())
        );

        unsafe { remove_env(DYNAMODB_ENDPOINT_VAR) };
    }
}
