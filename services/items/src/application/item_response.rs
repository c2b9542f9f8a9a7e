/// 正規化されたアイテムレスポンス
///
/// ステータスコードとボディ文字列の組。ボディは空か、
/// アイテム（の配列）またはエラー時の`{"message": ...}`のJSON。
use lambda_http::http::StatusCode;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ItemResponse {
    /// 値をJSONにシリアライズしたレスポンスを作成
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status,
            body: serde_json::to_string(value)?,
        })
    }

    /// `{"message": ...}`形式のレスポンスを作成
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            status,
            body: json!({ "message": message }).to_string(),
        }
    }

    /// 204 No Content（空ボディ）
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: String::new(),
        }
    }

    /// 数値のステータスコード
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }
}
