/// アイテムのドメインモデル
///
/// 永続化されるアイテムレコードと、作成・部分更新の入力を表す型を定義する。
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// 永続化されたアイテム
///
/// `id`・`name`・`price`以外の任意フィールドは`attributes`にそのまま保持し、
/// シリアライズ時はトップレベルに展開する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// ハンドラーが作成時に割り当てたID（作成後は不変）
    pub id: String,
    /// アイテム名
    pub name: String,
    /// 価格
    pub price: Number,
    /// 作成時に付与された追加フィールド（検証しない）
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// 検証済みのアイテム作成入力
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub price: Number,
    /// name/price/id以外の追加フィールド
    pub attributes: Map<String, Value>,
}

impl NewItem {
    /// 採番したIDを付与して永続化用のアイテムに変換
    pub fn into_item(self, id: String) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
            attributes: self.attributes,
        }
    }
}

/// 検証済みの部分更新入力
///
/// 指定されたフィールドのみ`Some`になる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub price: Option<Number>,
}

impl ItemUpdate {
    /// 更新対象のフィールドが1つもないか
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    /// 既存アイテムに更新を適用する（未指定のフィールドは元の値を保持）
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(price) = &self.price {
            item.price = price.clone();
        }
    }
}
