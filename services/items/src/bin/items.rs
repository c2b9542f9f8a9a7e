/// アイテムCRUD HTTP Lambdaエントリポイント
///
/// API Gateway（RESTプロキシ統合）経由の`/items`および`/items/{id}`への
/// リクエストを処理する。DynamoDBクライアントとハンドラーは
/// コールドスタート時に一度だけ構築し、以降の呼び出しで再利用する。
use items::application::{ItemHandler, handle_http_request};
use items::domain::UuidV7IdGenerator;
use items::infrastructure::{DynamoDbConfig, DynamoItemRepository, init_logging};
use lambda_http::{Error, Request, run, service_fn};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDB設定を環境から読み込み
    let config = DynamoDbConfig::from_env().await.inspect_err(|err| {
        error!(error = %err, "DynamoDB設定の読み込みに失敗");
    })?;

    info!(table_name = config.table_name(), "アイテムLambda関数を初期化");

    let repo = DynamoItemRepository::new(config.client().clone(), config.table_name().to_string());
    let handler = ItemHandler::new(repo, UuidV7IdGenerator);
    let handler = &handler;

    // Lambda関数を実行
    run(service_fn(move |request: Request| async move {
        handle_http_request(handler, request).await
    }))
    .await
}
