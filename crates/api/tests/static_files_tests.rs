mod test_utils;

use axum::http::{header, StatusCode};
use std::fs;
use tempfile::TempDir;
use test_utils::{body_text, TestApp};
use zendo_core::FrontendConfig;

const INDEX_HTML: &str = "<!doctype html><title>Zendo</title>";

fn static_bundle() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    fs::write(dir.path().join("app.js"), "console.log('zendo');").unwrap();
    fs::create_dir_all(dir.path().join("_app").join("immutable")).unwrap();
    fs::write(
        dir.path().join("_app").join("immutable").join("start.js"),
        "export {};",
    )
    .unwrap();
    dir
}

async fn spawn_with_bundle(dir: &TempDir) -> TestApp {
    TestApp::spawn_with_frontend(FrontendConfig {
        enabled: true,
        static_dir: dir.path().to_path_buf(),
        index_file: "index.html".to_string(),
    })
    .await
}

#[tokio::test]
async fn test_serves_existing_files() {
    let bundle = static_bundle();
    let app = spawn_with_bundle(&bundle).await;

    let response = app.get("/app.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "console.log('zendo');");

    let response = app.get("/_app/immutable/start.js").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_root_serves_index() {
    let bundle = static_bundle();
    let app = spawn_with_bundle(&bundle).await;

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, INDEX_HTML);
}

#[tokio::test]
async fn test_unknown_page_falls_back_to_index() {
    let bundle = static_bundle();
    let app = spawn_with_bundle(&bundle).await;

    let response = app.get("/week/2024-01-07").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(body_text(response).await, INDEX_HTML);
}

#[tokio::test]
async fn test_missing_asset_is_404() {
    let bundle = static_bundle();
    let app = spawn_with_bundle(&bundle).await;

    assert_eq!(app.get("/missing.js").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/logo.png").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.get("/_app/immutable/nope").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_api_routes_take_precedence() {
    let bundle = static_bundle();
    let app = spawn_with_bundle(&bundle).await;

    let response = app.get("/api/tasks").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");
}

#[tokio::test]
async fn test_disabled_frontend_returns_404() {
    let app = TestApp::spawn().await;
    assert_eq!(app.get("/settings").await.status(), StatusCode::NOT_FOUND);
}
