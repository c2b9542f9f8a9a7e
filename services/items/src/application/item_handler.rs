/// アイテムリクエストハンドラー
///
/// HTTPメソッドとパスパラメータの有無から実行するストア操作を1つ決定し、
/// ペイロードの検証、ステータスコードとボディの組み立てまでを行う。
///
/// | メソッド | ID | 操作 |
/// |---|---|---|
/// | GET | なし | 全件取得 |
/// | GET | あり | 1件取得 |
/// | POST | - | 作成（IDはハンドラーが採番） |
/// | PUT | 必須 | 部分更新 |
/// | DELETE | 必須 | 削除 |
/// | その他 | - | 405 |
use lambda_http::http::StatusCode;
use thiserror::Error;
use tracing::{Instrument, debug, error, info, info_span, warn};

use super::item_request::{ItemMethod, ItemRequest};
use super::item_response::ItemResponse;
use crate::domain::{IdGenerator, ItemValidator, ValidationError};
use crate::infrastructure::{ItemRepository, RepositoryError};

/// 500レスポンスのメッセージ（内部エラーの詳細はクライアントに返さない）
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// アイテムハンドラーのエラー型
///
/// クライアント起因のエラーは表示メッセージをそのままレスポンスに使用する。
#[derive(Debug, Error)]
pub enum ItemHandlerError {
    /// 対象外のHTTPメソッド
    #[error("Method not allowed")]
    MethodNotAllowed(String),
    /// PUT/DELETEでパスパラメータのIDが欠落
    #[error("Missing item id")]
    MissingItemId,
    /// 対象のアイテムが存在しない
    #[error("Item not found")]
    NotFound,
    /// リクエストボディの検証エラー
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// リポジトリ操作エラー
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    /// レスポンスのシリアライズに失敗
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ItemHandlerError {
    /// エラーに対応するHTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            ItemHandlerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ItemHandlerError::MissingItemId | ItemHandlerError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ItemHandlerError::NotFound => StatusCode::NOT_FOUND,
            ItemHandlerError::Repository(_) | ItemHandlerError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// アイテムのCRUDリクエストを処理するハンドラー
///
/// リクエスト間で状態を持たない。リポジトリとID生成器は
/// 呼び出し元（Lambdaのエントリポイント）が一度だけ構築して注入する。
pub struct ItemHandler<R, G>
where
    R: ItemRepository,
    G: IdGenerator,
{
    /// アイテムリポジトリ
    repo: R,
    /// ID生成器
    id_generator: G,
}

impl<R, G> ItemHandler<R, G>
where
    R: ItemRepository,
    G: IdGenerator,
{
    /// 新しいItemHandlerを作成
    pub fn new(repo: R, id_generator: G) -> Self {
        Self { repo, id_generator }
    }

    /// リクエストを処理してレスポンスを返す
    ///
    /// 失敗もすべてレスポンスに変換するため、この関数自体は失敗しない。
    /// 想定外のエラーはログに記録し、500 `Internal server error`を返す。
    pub async fn handle(&self, request: &ItemRequest) -> ItemResponse {
        let span = info_span!(
            "item_request",
            method = %request.method,
            item_id = request.item_id().unwrap_or_default()
        );

        async {
            info!("アイテムリクエスト受信");

            let response = match self.dispatch(request).await {
                Ok(response) => response,
                Err(err) => Self::error_response(err),
            };

            info!(status = response.status_code(), "アイテムレスポンス送信");
            response
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, request: &ItemRequest) -> Result<ItemResponse, ItemHandlerError> {
        let method = ItemMethod::parse(&request.method)
            .ok_or_else(|| ItemHandlerError::MethodNotAllowed(request.method.clone()))?;

        match (method, request.item_id()) {
            (ItemMethod::Get, None) => self.list_items().await,
            (ItemMethod::Get, Some(id)) => self.get_item(id).await,
            (ItemMethod::Post, _) => self.create_item(request).await,
            (ItemMethod::Put, id) => self.update_item(id, request).await,
            (ItemMethod::Delete, id) => self.delete_item(id).await,
        }
    }

    async fn list_items(&self) -> Result<ItemResponse, ItemHandlerError> {
        let items = self.repo.scan_all().await?;
        debug!(count = items.len(), "全アイテム取得");

        Ok(ItemResponse::json(StatusCode::OK, &items)?)
    }

    async fn get_item(&self, id: &str) -> Result<ItemResponse, ItemHandlerError> {
        let item = self
            .repo
            .get(id)
            .await?
            .ok_or(ItemHandlerError::NotFound)?;

        Ok(ItemResponse::json(StatusCode::OK, &item)?)
    }

    async fn create_item(&self, request: &ItemRequest) -> Result<ItemResponse, ItemHandlerError> {
        let payload = request.payload()?;
        let new_item = ItemValidator::validate_new(payload)?;

        let item = new_item.into_item(self.id_generator.generate());
        self.repo.put(&item).await?;
        info!(item_id = %item.id, "アイテム作成");

        Ok(ItemResponse::json(StatusCode::CREATED, &item)?)
    }

    async fn update_item(
        &self,
        id: Option<&str>,
        request: &ItemRequest,
    ) -> Result<ItemResponse, ItemHandlerError> {
        // ボディの欠落はIDの欠落より先に判定する
        let payload = request.payload()?;
        let id = id.ok_or(ItemHandlerError::MissingItemId)?;
        let update = ItemValidator::validate_update(payload)?;

        let item = self
            .repo
            .update_partial(id, &update)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => ItemHandlerError::NotFound,
                other => ItemHandlerError::Repository(other),
            })?;

        Ok(ItemResponse::json(StatusCode::OK, &item)?)
    }

    async fn delete_item(&self, id: Option<&str>) -> Result<ItemResponse, ItemHandlerError> {
        let id = id.ok_or(ItemHandlerError::MissingItemId)?;

        // 存在確認はしない（存在しないIDの削除も204）
        self.repo.delete(id).await?;

        Ok(ItemResponse::no_content())
    }

    fn error_response(err: ItemHandlerError) -> ItemResponse {
        let status = err.status_code();

        if status.is_server_error() {
            error!(error = %err, "アイテムリクエストの処理に失敗");
            return ItemResponse::message(status, INTERNAL_SERVER_ERROR_MESSAGE);
        }

        match &err {
            ItemHandlerError::MethodNotAllowed(method) => {
                warn!(method = %method, "対象外のHTTPメソッド");
            }
            _ => warn!(status = status.as_u16(), reason = %err, "リクエストを拒否"),
        }
        ItemResponse::message(status, err.to_string())
    }
}
