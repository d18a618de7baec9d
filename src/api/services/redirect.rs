use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::trace;

use crate::errors::LinkmeterError;
use crate::services::{LinkService, NOT_FOUND_MESSAGE};
use crate::utils::is_valid_short_code;

/// 存储的 URL 无法作为 Location 头时返回的消息
pub const INVALID_TARGET_MESSAGE: &str = "URL longa armazenada não pode ser usada para redirecionar";

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> Result<HttpResponse, LinkmeterError> {
        let code = path.into_inner();

        // 非法短码直接 404，不查存储
        if !is_valid_short_code(&code) {
            trace!("Invalid short code rejected: {}", code);
            return Err(LinkmeterError::not_found(NOT_FOUND_MESSAGE));
        }

        // 先构造 Location，构造成功才计入重定向
        let location = link_service
            .resolve_with(&code, |url| {
                HeaderValue::from_str(url)
                    .map_err(|_| LinkmeterError::invalid_target(INVALID_TARGET_MESSAGE))
            })
            .await?;

        Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, location))
            .finish())
    }
}

/// Redirect 路由配置，必须最后注册
pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{code}", web::get().to(RedirectService::handle_redirect));
}
