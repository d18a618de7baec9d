use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::api::middleware::RequestId;
use crate::errors::LinkmeterError;
use crate::services::LinkService;

/// Diagnostic listing and deletion of stored links
pub struct LinksService;

impl LinksService {
    pub async fn list_links(link_service: web::Data<Arc<LinkService>>) -> impl Responder {
        let links = link_service.list_all().await;
        trace!("Links API: returning {} links", links.len());
        HttpResponse::Ok().json(links)
    }

    pub async fn delete_link(
        path: web::Path<String>,
        request_id: RequestId,
        link_service: web::Data<Arc<LinkService>>,
    ) -> Result<HttpResponse, LinkmeterError> {
        let code = path.into_inner();
        link_service.delete(&code).await?;
        info!("Links API: '{}' deleted (request {})", code, request_id);
        Ok(HttpResponse::NoContent().finish())
    }
}

pub fn links_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/links", web::get().to(LinksService::list_links))
        .route("/api/links/{code}", web::delete().to(LinksService::delete_link));
}
