//! Label catalogue management and board↔label linking.

mod common;

use actix_web::test;

use common::authed;

async fn create_board_with_labels<S>(
    app: &S,
    token: &str,
    title: &str,
    labels: &[&str],
) -> serde_json::Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let resp = test::call_service(
        app,
        authed(test::TestRequest::post().uri("/api/boards"), token)
            .set_json(serde_json::json!({
                "title": title,
                "imageUrl": "https://img.example.com/cover.png",
                "labels": labels,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201, "creating board '{title}' failed");
    test::read_body_json(resp).await
}

async fn fetch_board_labels<S>(app: &S, token: &str, id: &str) -> Vec<String>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let resp = test::call_service(
        app,
        authed(test::TestRequest::get().uri(&format!("/api/boards/{id}")), token).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["labels"]
        .as_array()
        .expect("labels array")
        .iter()
        .map(|l| l.as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn catalogue_writes_are_admin_only() {
    let state = common::test_state().await;
    let app = common::spawn_app(state.clone()).await;
    let user = common::register_and_login(&app, "alice").await;
    common::seed_admin(&state, "root").await;
    let admin = common::login(&app, "root").await;

    let resp = test::call_service(
        &app,
        authed(test::TestRequest::post().uri("/api/labels"), &user)
            .set_json(serde_json::json!({ "name": "pastel" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);

    let resp = test::call_service(
        &app,
        authed(test::TestRequest::post().uri("/api/labels"), &admin)
            .set_json(serde_json::json!({ "name": "pastel" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let label: serde_json::Value = test::read_body_json(resp).await;

    // same name twice is a conflict
    let resp = test::call_service(
        &app,
        authed(test::TestRequest::post().uri("/api/labels"), &admin)
            .set_json(serde_json::json!({ "name": "pastel" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 409);

    let resp = test::call_service(
        &app,
        authed(
            test::TestRequest::delete()
                .uri(&format!("/api/labels/{}", label["id"].as_str().unwrap())),
            &user,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn board_creation_resolves_names_and_tolerates_duplicates() {
    let state = common::test_state().await;
    let app = common::spawn_app(state).await;
    let token = common::register_and_login(&app, "alice").await;

    let board =
        create_board_with_labels(&app, &token, "moody", &["pastel", "retro", "pastel"]).await;
    let id = board["id"].as_str().expect("board id");

    let mut labels = fetch_board_labels(&app, &token, id).await;
    labels.sort();
    assert_eq!(labels, ["pastel", "retro"]);

    // a second board reuses the existing catalogue entries
    let other = create_board_with_labels(&app, &token, "calm", &["pastel"]).await;
    let labels = fetch_board_labels(&app, &token, other["id"].as_str().unwrap()).await;
    assert_eq!(labels, ["pastel"]);

    let resp = test::call_service(
        &app,
        authed(test::TestRequest::get().uri("/api/labels"), &token).to_request(),
    )
    .await;
    let catalogue: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(catalogue.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn deleting_a_label_detaches_it_from_every_board() {
    let state = common::test_state().await;
    let app = common::spawn_app(state.clone()).await;
    let user = common::register_and_login(&app, "alice").await;
    common::seed_admin(&state, "root").await;
    let admin = common::login(&app, "root").await;

    let a = create_board_with_labels(&app, &user, "one", &["vintage", "warm"]).await;
    let b = create_board_with_labels(&app, &user, "two", &["vintage"]).await;

    let resp = test::call_service(
        &app,
        authed(test::TestRequest::get().uri("/api/labels"), &admin).to_request(),
    )
    .await;
    let catalogue: serde_json::Value = test::read_body_json(resp).await;
    let vintage_id = catalogue
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["name"] == "vintage")
        .and_then(|l| l["id"].as_str())
        .expect("vintage label")
        .to_string();

    let resp = test::call_service(
        &app,
        authed(
            test::TestRequest::delete().uri(&format!("/api/labels/{vintage_id}")),
            &admin,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let labels = fetch_board_labels(&app, &user, a["id"].as_str().unwrap()).await;
    assert_eq!(labels, ["warm"]);
    let labels = fetch_board_labels(&app, &user, b["id"].as_str().unwrap()).await;
    assert!(labels.is_empty());

    // already gone
    let resp = test::call_service(
        &app,
        authed(
            test::TestRequest::delete().uri(&format!("/api/labels/{vintage_id}")),
            &admin,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}
