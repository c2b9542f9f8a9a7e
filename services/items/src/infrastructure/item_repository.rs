/// DynamoDBでアイテムを永続化するためのアイテムリポジトリ
///
/// パーティションキー`id`（文字列）の単一テーブルに、1アイテム1レコードで保存する。
/// レコードとドメイン型の変換にはserde_dynamoを使用する。
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Item, ItemUpdate};
use crate::infrastructure::update_expression::UpdateExpression;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// 更新対象のアイテムが存在しない
    #[error("Item not found: {0}")]
    NotFound(String),

    /// 更新フィールドが空で、UpdateExpressionを構築できない
    #[error("Empty update for item: {0}")]
    EmptyUpdate(String),

    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// データのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for RepositoryError {
    fn from(err: serde_dynamo::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// アイテム永続化用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替え可能にする。
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// 全アイテムを取得（順序はストア依存）
    async fn scan_all(&self) -> Result<Vec<Item>, RepositoryError>;

    /// IDでアイテムを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Item))`
    /// * 見つからなかった場合は`Ok(None)`
    async fn get(&self, id: &str) -> Result<Option<Item>, RepositoryError>;

    /// アイテムを保存（同じIDのレコードは上書き）
    async fn put(&self, item: &Item) -> Result<(), RepositoryError>;

    /// 既存アイテムの指定フィールドのみを更新し、更新後のアイテムを返す
    ///
    /// # 戻り値
    /// * 成功時は`Ok(Item)`（更新後のレコード全体）
    /// * アイテムが存在しない場合は`Err(RepositoryError::NotFound)`
    async fn update_partial(&self, id: &str, update: &ItemUpdate) -> Result<Item, RepositoryError>;

    /// IDでアイテムを削除
    ///
    /// 存在しないIDの削除も成功とする。
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// DynamoDBのレコード（属性名 -> 属性値）
type Record = HashMap<String, AttributeValue>;

/// Scan 1回分の結果
#[derive(Debug, Default)]
struct ScanPage {
    items: Vec<Record>,
    last_evaluated_key: Option<Record>,
}

/// LastEvaluatedKeyから次のScanの開始キーを決める（空キーは終端扱い）
fn next_start_key(last_evaluated_key: Option<Record>) -> Option<Record> {
    last_evaluated_key.filter(|key| !key.is_empty())
}

/// Scanをテーブルの終端まで繰り返し、全ページのアイテムを集める
///
/// 1回のScanは最大1MBまでのため、LastEvaluatedKeyがなくなるまで
/// `fetch`に開始キーを渡して次のページを取得する。
async fn scan_pages<F, Fut>(mut fetch: F) -> Result<Vec<Item>, RepositoryError>
where
    F: FnMut(Option<Record>) -> Fut,
    Fut: Future<Output = Result<ScanPage, RepositoryError>>,
{
    let mut items = Vec::new();
    let mut start_key = None;

    loop {
        let page = fetch(start_key.take()).await?;
        debug!(page_size = page.items.len(), "Scanページ取得");

        let page_items: Vec<Item> = serde_dynamo::from_items(page.items)?;
        items.extend(page_items);

        start_key = next_start_key(page.last_evaluated_key);
        if start_key.is_none() {
            break;
        }
    }

    Ok(items)
}

/// UpdateItemのエラーをリポジトリエラーに変換
///
/// `attribute_exists(#id)`の条件違反は対象が存在しないことを意味する。
fn update_error(id: &str, err: UpdateItemError) -> RepositoryError {
    match err {
        UpdateItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::NotFound(id.to_string())
        }
        other => RepositoryError::WriteError(other.to_string()),
    }
}

/// UpdateItem（ALL_NEW）の応答属性から更新後のアイテムを復元
fn updated_item(attributes: Option<Record>) -> Result<Item, RepositoryError> {
    let attributes = attributes.ok_or_else(|| {
        RepositoryError::SerializationError("Missing attributes in update response".to_string())
    })?;

    Ok(serde_dynamo::from_item(attributes)?)
}

/// ItemRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoItemRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// アイテムテーブル名
    table_name: String,
}

impl DynamoItemRepository {
    /// 新しいDynamoItemRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - アイテムテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

#[async_trait]
impl ItemRepository for DynamoItemRepository {
    async fn scan_all(&self) -> Result<Vec<Item>, RepositoryError> {
        let client = &self.client;
        let table_name = self.table_name.as_str();

        scan_pages(|start_key| async move {
            let response = client
                .scan()
                .table_name(table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

            Ok::<_, RepositoryError>(ScanPage {
                items: response.items.unwrap_or_default(),
                last_evaluated_key: response.last_evaluated_key,
            })
        })
        .await
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, RepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", Self::key(id))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

        match result.item {
            Some(item) => Ok(Some(serde_dynamo::from_item(item)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, item: &Item) -> Result<(), RepositoryError> {
        let record: HashMap<String, AttributeValue> = serde_dynamo::to_item(item)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn update_partial(&self, id: &str, update: &ItemUpdate) -> Result<Item, RepositoryError> {
        let UpdateExpression {
            expression,
            mut names,
            values,
        } = UpdateExpression::from_update(update)
            .ok_or_else(|| RepositoryError::EmptyUpdate(id.to_string()))?;

        // 存在しないIDへの更新でレコードが新規作成されないよう条件を付与
        names.insert("#id".to_string(), "id".to_string());

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", Self::key(id))
            .update_expression(expression)
            .condition_expression("attribute_exists(#id)")
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| update_error(id, e.into_service_error()))?;

        updated_item(result.attributes)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", Self::key(id))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }
}
