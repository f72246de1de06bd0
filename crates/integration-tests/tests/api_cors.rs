//! Cross-origin policy: a configured frontend origin is the only one
//! admitted; without one, any origin passes.

mod common;

use actix_web::http::{header, Method};
use actix_web::{test, web, App};

use mb_api::{configure_routes, middleware};

const FRONTEND: &str = "http://frontend.example";

fn preflight(origin: &str) -> actix_http::Request {
    test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/boards")
        .insert_header((header::ORIGIN, origin))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
        .to_request()
}

#[actix_web::test]
async fn configured_origin_is_the_only_one_admitted() {
    let state = common::test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(state)
            .wrap(middleware::cors_policy(Some(FRONTEND)))
            .service(web::scope("/api").configure(configure_routes)),
    )
    .await;

    let resp = test::call_service(&app, preflight(FRONTEND)).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .expect("allow-origin header"),
        FRONTEND
    );

    let resp = test::call_service(&app, preflight("http://elsewhere.example")).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn without_configuration_any_origin_passes() {
    let state = common::test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(state)
            .wrap(middleware::cors_policy(None))
            .service(web::scope("/api").configure(configure_routes)),
    )
    .await;

    let resp = test::call_service(&app, preflight("http://elsewhere.example")).await;
    assert!(resp.status().is_success());
}
