// アプリケーション層モジュール
pub mod http_adapter;
pub mod item_handler;
pub mod item_request;
pub mod item_response;

// 再エクスポート
pub use http_adapter::{handle_http_request, to_http_response, to_item_request};
pub use item_handler::{ItemHandler, ItemHandlerError};
pub use item_request::{ItemMethod, ItemRequest};
pub use item_response::ItemResponse;
