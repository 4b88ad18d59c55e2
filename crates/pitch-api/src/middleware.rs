use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use pitch_types::models::RequestContext;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 128;

/// Attach a `RequestContext` to every request. A caller-supplied
/// `x-request-id` is reused when it is sane; otherwise a fresh one is
/// generated. The id is echoed back on the response.
pub async fn request_context(mut req: Request, next: Next) -> Response {
    let ctx = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(RequestContext::new)
        .unwrap_or_else(RequestContext::generate);

    let header = HeaderValue::from_str(&ctx.request_id).ok();
    req.extensions_mut().insert(ctx);

    let mut res = next.run(req).await;
    if let Some(value) = header {
        res.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }
    res
}
