use serde_json::{Map, Value};

use crate::domain::{ItemValidator, ValidationError};

/// 正規化されたアイテムリクエスト
///
/// ゲートウェイから受け取ったHTTPメソッド、パスパラメータのID、
/// 生のボディのみを保持する。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemRequest {
    /// HTTPメソッド（API Gatewayが渡す大文字表記）
    pub method: String,
    /// パスパラメータ`{id}`
    pub id: Option<String>,
    /// 生のリクエストボディ
    pub body: Option<String>,
    /// バイナリボディがUTF-8として不正だった
    pub invalid_encoding: bool,
}

impl ItemRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// UTF-8として解釈できなかったバイナリボディを示す
    pub fn with_invalid_encoding(mut self) -> Self {
        self.body = None;
        self.invalid_encoding = true;
        self
    }

    /// ボディをJSONオブジェクトとして取り出す
    pub fn payload(&self) -> Result<Map<String, Value>, ValidationError> {
        if self.invalid_encoding {
            return Err(ValidationError::InvalidBody);
        }
        ItemValidator::parse_body(self.body.as_deref())
    }

    /// 空でないアイテムIDを取得（空文字列は未指定扱い）
    pub fn item_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// ハンドラーが受け付けるHTTPメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ItemMethod {
    /// メソッド文字列を解釈（対象外のメソッドは`None`）
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_methods() {
        assert_eq!(ItemMethod::parse("GET"), Some(ItemMethod::Get));
        assert_eq!(ItemMethod::parse("POST"), Some(ItemMethod::Post));
        assert_eq!(ItemMethod::parse("PUT"), Some(ItemMethod::Put));
        assert_eq!(ItemMethod::parse("DELETE"), Some(ItemMethod::Delete));
    }

    #[test]
    fn test_parse_unsupported_methods() {
        assert_eq!(ItemMethod::parse("PATCH"), None);
        assert_eq!(ItemMethod::parse("OPTIONS"), None);
        assert_eq!(ItemMethod::parse("INVALID"), None);
        assert_eq!(ItemMethod::parse("get"), None);
    }

    #[test]
    fn test_item_id_empty_is_absent() {
        assert_eq!(ItemRequest::new("GET").item_id(), None);
        assert_eq!(ItemRequest::new("GET").with_id("").item_id(), None);
        assert_eq!(ItemRequest::new("GET").with_id("item-1").item_id(), Some("item-1"));
    }

    #[test]
    fn test_payload_from_text_body() {
        let request = ItemRequest::new("POST").with_body(r#"{"name":"Item","price":1}"#);

        let payload = request.payload().unwrap();

        assert_eq!(payload.get("name"), Some(&Value::from("Item")));
    }

    #[test]
    fn test_payload_missing_body() {
        assert_eq!(
            ItemRequest::new("POST").payload(),
            Err(ValidationError::MissingBody)
        );
    }

    #[test]
    fn test_payload_invalid_encoding() {
        let request = ItemRequest::new("POST").with_invalid_encoding();

        assert_eq!(request.body, None);
        assert_eq!(request.payload(), Err(ValidationError::InvalidBody));
    }

    #[test]
    fn test_builder() {
        let request = ItemRequest::new("PUT")
            .with_id("item-1")
            .with_body(r#"{"name":"Updated"}"#);

        assert_eq!(request.method, "PUT");
        assert_eq!(request.id.as_deref(), Some("item-1"));
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Updated"}"#));
    }
}
