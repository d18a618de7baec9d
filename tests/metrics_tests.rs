//! Prometheus endpoint tests

#![cfg(feature = "metrics")]

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::middleware::from_fn;
use actix_web::{App, web};
use serde_json::json;

use linkmeter::api::json_config;
use linkmeter::api::middleware::{TimingMiddleware, request_id_middleware};
use linkmeter::api::services::{AppStartTime, configure_routes};
use linkmeter::config::StaticConfig;
use linkmeter::runtime::lifetime::startup::{StartupContext, prepare_server_startup};

macro_rules! test_app {
    ($ctx:expr) => {{
        let ctx: &StartupContext = &$ctx;
        test::init_service(
            App::new()
                .wrap(TimingMiddleware::new(ctx.recorder.clone()))
                .wrap(from_fn(request_id_middleware))
                .app_data(json_config())
                .app_data(web::Data::new(ctx.link_service.clone()))
                .app_data(web::Data::new(AppStartTime::now()))
                .app_data(web::Data::new(ctx.short_url_base.clone()))
                .app_data(web::Data::new(ctx.metrics.clone()))
                .configure(configure_routes),
        )
        .await
    }};
}

macro_rules! scrape {
    ($app:expr) => {{
        let resp =
            test::call_service($app, TestRequest::get().uri("/metrics").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        String::from_utf8(body.to_vec()).unwrap()
    }};
}

fn context() -> StartupContext {
    prepare_server_startup(&StaticConfig::default()).unwrap()
}

#[actix_rt::test]
async fn test_metrics_content_type() {
    let ctx = context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/plain; version=0.0.4"));
}

#[actix_rt::test]
async fn test_fresh_process_reports_zero() {
    let ctx = context();
    let app = test_app!(ctx);

    let output = scrape!(&app);
    assert!(output.contains("links_criados_total 0"));
    assert!(output.contains("redirecionamentos_total 0"));
    assert!(output.contains("links_stored 0"));
}

#[actix_rt::test]
async fn test_counters_follow_traffic() {
    let ctx = context();
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/encurtar")
            .set_json(json!({"url_longa": "https://example.com"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let link = ctx.link_service.list_all().await;
    let code = link.keys().next().unwrap().clone();

    for _ in 0..3 {
        let req = TestRequest::get().uri(&format!("/{}", code)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);
    }
    let miss = TestRequest::get().uri("/doesnotexist").to_request();
    assert_eq!(test::call_service(&app, miss).await.status(), StatusCode::NOT_FOUND);

    let output = scrape!(&app);
    assert!(output.contains("links_criados_total 1"));
    assert!(output.contains("redirecionamentos_total 3"));
    assert!(output.contains("links_stored 1"));
    assert!(output.contains(
        r#"http_requests_total{endpoint="shorten",method="POST",status="201"} 1"#
    ));
    assert!(output.contains(
        r#"http_requests_total{endpoint="redirect",method="GET",status="302"} 3"#
    ));
    assert!(output.contains(
        r#"http_requests_total{endpoint="redirect",method="GET",status="404"} 1"#
    ));
    assert!(output.contains("# TYPE app_request_latency_seconds histogram"));
    assert!(output.contains(
        r#"app_request_latency_seconds_count{endpoint="redirect",method="GET"} 4"#
    ));
    assert!(output.contains(
        r#"app_request_latency_seconds_count{endpoint="shorten",method="POST"} 1"#
    ));
    // 短码不会出现在标签里
    assert!(!output.contains(&code));
}

#[actix_rt::test]
async fn test_unusable_redirect_target_is_not_counted() {
    let ctx = context();
    let app = test_app!(ctx);

    let link = ctx
        .link_service
        .shorten("https://example.com/\r\nx")
        .await
        .unwrap();
    let req = TestRequest::get().uri(&format!("/{}", link.code)).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );

    let output = scrape!(&app);
    assert!(output.contains("redirecionamentos_total 0"));
    assert!(output.contains(
        r#"http_requests_total{endpoint="redirect",method="GET",status="500"} 1"#
    ));
}

#[actix_rt::test]
async fn test_bad_request_does_not_count_as_created() {
    let ctx = context();
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/encurtar")
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let output = scrape!(&app);
    assert!(output.contains("links_criados_total 0"));
    assert!(output.contains(
        r#"http_requests_total{endpoint="shorten",method="POST",status="400"} 1"#
    ));
}

#[actix_rt::test]
async fn test_active_connections_settle_to_zero() {
    let ctx = context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(ctx.metrics.http_active_connections.get(), 0.0);
}
