//! HTTP layer: route handlers and middleware

pub mod middleware;
pub mod services;

use actix_web::error::JsonPayloadError;
use actix_web::web;
use tracing::debug;

use crate::errors::LinkmeterError;
use crate::services::MISSING_URL_MESSAGE;

/// 请求体大小上限（字节）
pub const JSON_PAYLOAD_LIMIT: usize = 64 * 1024;

/// 请求体超过上限时返回的消息
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Corpo da requisição excede o limite de 64 KiB";

/// JSON 提取器配置
///
/// 超出大小上限返回 413；其余解析失败（缺少 body、Content-Type 不对、
/// JSON 非法、字段类型不对）统一转换为 400。两者的 body 都是 `{"erro": ...}`。
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(|err, _req| {
            debug!("Rejected JSON payload: {}", err);
            json_error(&err).into()
        })
}

fn json_error(err: &JsonPayloadError) -> LinkmeterError {
    match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            LinkmeterError::payload_too_large(PAYLOAD_TOO_LARGE_MESSAGE)
        }
        _ => LinkmeterError::invalid_request(MISSING_URL_MESSAGE),
    }
}
