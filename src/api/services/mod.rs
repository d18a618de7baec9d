pub mod health;
pub mod links;
pub mod metrics;
pub mod redirect;
pub mod shorten;

use actix_web::web;

pub use health::{AppStartTime, HealthService, health_routes};
pub use links::{LinksService, links_routes};
pub use metrics::{MetricsService, metrics_routes};
pub use redirect::{RedirectService, redirect_routes};
pub use shorten::{ShortUrlBase, ShortenService, shorten_routes};

/// 注册全部路由
///
/// 固定路径必须先于 `/{code}` 注册，actix 按注册顺序匹配。
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health_routes)
        .configure(metrics_routes)
        .configure(shorten_routes)
        .configure(links_routes)
        .configure(redirect_routes);
}
