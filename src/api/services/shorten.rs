use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::api::middleware::RequestId;
use crate::errors::LinkmeterError;
use crate::services::{LinkService, MISSING_URL_MESSAGE};

/// 请求体：`{"url_longa": "..."}`
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub url_longa: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub url_longa: String,
    pub url_curta: String,
}

/// Base used to build `url_curta`; `None` means "use the request's own
/// scheme and host".
#[derive(Clone, Debug, Default)]
pub struct ShortUrlBase(pub Option<String>);

impl ShortUrlBase {
    pub fn resolve(&self, req: &HttpRequest) -> String {
        match self.0 {
            Some(ref base) => base.clone(),
            None => {
                let info = req.connection_info();
                format!("{}://{}", info.scheme(), info.host())
            }
        }
    }
}

pub struct ShortenService;

impl ShortenService {
    pub async fn shorten(
        req: HttpRequest,
        request_id: RequestId,
        body: web::Json<ShortenRequest>,
        link_service: web::Data<Arc<LinkService>>,
        base: Option<web::Data<ShortUrlBase>>,
    ) -> Result<HttpResponse, LinkmeterError> {
        let long_url = body
            .into_inner()
            .url_longa
            .ok_or_else(|| LinkmeterError::invalid_request(MISSING_URL_MESSAGE))?;

        let link = link_service.shorten(&long_url).await.inspect_err(|e| {
            debug!("Shorten failed (request {}): {}", request_id, e);
        })?;

        let base_url = base
            .map(|b| b.resolve(&req))
            .unwrap_or_else(|| ShortUrlBase::default().resolve(&req));

        Ok(HttpResponse::Created().json(ShortenResponse {
            url_curta: link.short_url(&base_url),
            url_longa: link.long_url,
        }))
    }
}

pub fn shorten_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/encurtar", web::post().to(ShortenService::shorten))
        .route("/shorten", web::post().to(ShortenService::shorten));
}
