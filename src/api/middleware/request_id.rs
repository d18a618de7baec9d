//! Request ID middleware
//!
//! 沿用调用方传入的 `X-Request-ID`（格式合理时），否则生成 UUID；
//! 该 ID 写入 tracing span、request extensions 和响应头。

use std::fmt;
use std::future::{Ready, ready};

use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::classify_endpoint;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 传入 ID 的最大长度，超出则重新生成
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Per-request identifier, readable in handlers as an extractor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuse the caller's `X-Request-ID` when it is 1..=128 visible ASCII
    /// characters, otherwise mint a fresh one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|id| is_acceptable(id))
            .map(|id| Self(id.to_owned()))
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN && id.bytes().all(|b| b.is_ascii_graphic())
}

impl FromRequest for RequestId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // 未挂中间件时（例如单独测试 handler）退回到新生成的 ID
        let id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::generate);
        ready(Ok(id))
    }
}

/// 请求 ID 中间件，用 `from_fn(request_id_middleware)` 挂载
pub async fn request_id_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let request_id = RequestId::from_headers(req.headers());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        endpoint = classify_endpoint(req.path()),
    );

    req.extensions_mut().insert(request_id.clone());

    let mut response = next.call(req).instrument(span).await?;

    // 已校验为可见 ASCII，转换不会失败
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    Ok(response)
}
