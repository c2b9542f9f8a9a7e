/// API Gatewayプロキシ統合とItemHandlerの橋渡し
///
/// lambda_httpのRequestからメソッド・パスパラメータ`id`・ボディを取り出して
/// ItemRequestに正規化し、ItemResponseをHTTPレスポンスに戻す。
use lambda_http::http::header::{CONTENT_TYPE, HeaderValue};
use lambda_http::{Body, Error, Request, RequestExt, Response};
use tracing::warn;

use super::item_handler::ItemHandler;
use super::item_request::ItemRequest;
use super::item_response::ItemResponse;
use crate::domain::IdGenerator;
use crate::infrastructure::ItemRepository;

/// パスパラメータ名（リソース`/items/{id}`）
pub const ITEM_ID_PATH_PARAMETER: &str = "id";

/// HTTPリクエストをItemRequestに正規化
///
/// バイナリボディはUTF-8として解釈する。不正なバイト列を含む場合は
/// ボディを破棄し、後段で`Invalid request body`として拒否させる。
pub fn to_item_request(request: &Request) -> ItemRequest {
    let mut item_request = ItemRequest::new(request.method().as_str());
    item_request.id = request
        .path_parameters()
        .first(ITEM_ID_PATH_PARAMETER)
        .map(str::to_string);

    match request.body() {
        Body::Empty => {}
        Body::Text(text) => item_request.body = Some(text.clone()),
        Body::Binary(bytes) => match String::from_utf8(bytes.clone()) {
            Ok(text) => item_request.body = Some(text),
            Err(err) => {
                warn!(error = %err, "UTF-8として不正なリクエストボディ");
                item_request = item_request.with_invalid_encoding();
            }
        },
        #[allow(unreachable_patterns)]
        _ => {}
    }

    item_request
}

/// ItemResponseをHTTPレスポンスに変換
///
/// ボディが空の場合（204）はContent-Typeを付けない。
pub fn to_http_response(response: ItemResponse) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder().status(response.status);

    let body = if response.body.is_empty() {
        Body::Empty
    } else {
        builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Body::Text(response.body)
    };

    Ok(builder.body(body)?)
}

/// HTTPリクエストを1件処理する
pub async fn handle_http_request<R, G>(
    handler: &ItemHandler<R, G>,
    request: Request,
) -> Result<Response<Body>, Error>
where
    R: ItemRepository,
    G: IdGenerator,
{
    let item_request = to_item_request(&request);
    let response = handler.handle(&item_request).await;
    to_http_response(response)
}
