/// 部分更新用のDynamoDB UpdateExpression構築
///
/// ItemUpdateで指定されたフィールドのみを`SET`句に含め、
/// 属性名・属性値はすべてプレースホルダー経由で渡す。
/// `name`はDynamoDBの予約語のため、属性名プレースホルダーが必須となる。
use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::domain::ItemUpdate;

/// 構築済みのUpdateExpression
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// `SET #name = :name, #price = :price` 形式の式
    pub expression: String,
    /// ExpressionAttributeNames（`#name` -> `name`）
    pub names: HashMap<String, String>,
    /// ExpressionAttributeValues（`:name` -> 値）
    pub values: HashMap<String, AttributeValue>,
}

impl UpdateExpression {
    /// ItemUpdateからUpdateExpressionを構築
    ///
    /// 更新フィールドが1つもない場合は`None`を返す。
    /// 句の順序はname、priceの順で固定。
    pub fn from_update(update: &ItemUpdate) -> Option<Self> {
        let mut assignments = Vec::new();
        let mut names = HashMap::new();
        let mut values = HashMap::new();

        if let Some(name) = &update.name {
            assignments.push("#name = :name");
            names.insert("#name".to_string(), "name".to_string());
            values.insert(":name".to_string(), AttributeValue::S(name.clone()));
        }

        if let Some(price) = &update.price {
            assignments.push("#price = :price");
            names.insert("#price".to_string(), "price".to_string());
            values.insert(":price".to_string(), AttributeValue::N(price.to_string()));
        }

        if assignments.is_empty() {
            return None;
        }

        Some(Self {
            expression: format!("SET {}", assignments.join(", ")),
            names,
            values,
        })
    }
}
