/// アイテムIDの採番
///
/// 同時実行されるLambda呼び出し間でも衝突しないIDを生成する。
use uuid::Uuid;

/// アイテムID生成器
///
/// 本番ではUUID v7、テストでは決定的な連番などに差し替える。
pub trait IdGenerator: Send + Sync {
    /// 新しい一意なIDを生成
    fn generate(&self) -> String;
}

/// UUID v7によるID生成器
///
/// 上位48ビットがミリ秒タイムスタンプのため生成順に並び、
/// 残りのランダムビットにより同一ミリ秒内の衝突を避ける。
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7IdGenerator;

impl IdGenerator for UuidV7IdGenerator {
    fn generate(&self) -> String {
        Uuid::now_v7().to_string()
    }
}
