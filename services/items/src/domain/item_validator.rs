/// アイテムリクエストボディのバリデーション
///
/// 生のリクエストボディをJSONオブジェクトとして解釈し、
/// 作成入力（NewItem）または部分更新入力（ItemUpdate）に変換する。
///
/// `name`と`price`は「値が存在し、かつ偽値（null, false, 0, ""）でない」
/// 場合にのみ指定ありとみなす。価格0は未指定と区別できない。
use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::item::{ItemUpdate, NewItem};

/// リクエストボディのバリデーションエラー
///
/// 表示メッセージはそのままクライアントへのレスポンスに使用する。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// ボディが存在しない、または空文字列
    #[error("Missing request body")]
    MissingBody,
    /// ボディがJSONオブジェクトとして解釈できない
    #[error("Invalid request body")]
    InvalidBody,
    /// 作成時にnameまたはpriceが指定されていない
    #[error("Missing required fields: name and price")]
    MissingRequiredFields,
    /// 更新時にnameとpriceのどちらも指定されていない
    #[error("Missing fields to update: name or price")]
    MissingUpdateFields,
    /// フィールドの型が不正（nameは文字列、priceは数値）
    #[error("Invalid field type: {0}")]
    InvalidFieldType(&'static str),
}

/// アイテムペイロードのバリデータ
pub struct ItemValidator;

impl ItemValidator {
    /// リクエストボディをJSONオブジェクトとしてパース
    pub fn parse_body(body: Option<&str>) -> Result<Map<String, Value>, ValidationError> {
        let body = match body {
            Some(body) if !body.is_empty() => body,
            _ => return Err(ValidationError::MissingBody),
        };

        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(payload)) => Ok(payload),
            _ => Err(ValidationError::InvalidBody),
        }
    }

    /// 作成ペイロードを検証してNewItemに変換
    ///
    /// ペイロード中の`id`は無視する（IDはハンドラーが採番する）。
    pub fn validate_new(mut payload: Map<String, Value>) -> Result<NewItem, ValidationError> {
        let name = payload.remove("name");
        let price = payload.remove("price");
        payload.remove("id");

        if !is_truthy(name.as_ref()) || !is_truthy(price.as_ref()) {
            return Err(ValidationError::MissingRequiredFields);
        }

        let (Some(name), Some(price)) = (typed_name(name)?, typed_price(price)?) else {
            return Err(ValidationError::MissingRequiredFields);
        };

        Ok(NewItem {
            name,
            price,
            attributes: payload,
        })
    }

    /// 更新ペイロードを検証してItemUpdateに変換
    ///
    /// name/price以外のフィールドは更新対象にならない。
    pub fn validate_update(mut payload: Map<String, Value>) -> Result<ItemUpdate, ValidationError> {
        let name = payload.remove("name");
        let price = payload.remove("price");

        if !is_truthy(name.as_ref()) && !is_truthy(price.as_ref()) {
            return Err(ValidationError::MissingUpdateFields);
        }

        Ok(ItemUpdate {
            name: typed_name(name)?,
            price: typed_price(price)?,
        })
    }
}

/// 値が指定ありとみなせるか（存在し、偽値でない）
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

fn typed_name(value: Option<Value>) -> Result<Option<String>, ValidationError> {
    if !is_truthy(value.as_ref()) {
        return Ok(None);
    }
    match value {
        Some(Value::String(name)) => Ok(Some(name)),
        _ => Err(ValidationError::InvalidFieldType("name")),
    }
}

fn typed_price(value: Option<Value>) -> Result<Option<Number>, ValidationError> {
    if !is_truthy(value.as_ref()) {
        return Ok(None);
    }
    match value {
        Some(Value::Number(price)) => Ok(Some(price)),
        _ => Err(ValidationError::InvalidFieldType("price")),
    }
}
