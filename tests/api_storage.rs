//! Web API storage browsing tests
//!
//! Integration tests for the folder listing route: path resolution,
//! breadcrumbs, metadata joins, and soft-delete filtering.

use axum_test::TestServer;
use serde_json::{json, Value};
use voblako::api::AppState;
use voblako::config::{ApiTarget, Config};
use voblako::store::seed;

fn test_config() -> Config {
    Config {
        server_name: "VOblako".to_string(),
        rest_port: 0,
        api_target: ApiTarget::Mock,
        remote_base_url: "http://localhost:8080/api".to_string(),
    }
}

fn test_server() -> TestServer {
    let state = AppState::new(test_config());
    let router = voblako::api::rest::router(state);
    TestServer::new(router).expect("Failed to create test server")
}

fn breadcrumb_ids(body: &Value) -> Vec<String> {
    body["breadcrumbs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|crumb| crumb["id"].as_str().unwrap().to_string())
        .collect()
}

fn file_labels(body: &Value) -> Vec<String> {
    body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|file| file["label"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn root_listing_on_a_fresh_store() {
    let server = test_server();

    let response = server.get("/api/storage").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], "root");
    assert_eq!(body["label"], "Главная");
    assert_eq!(breadcrumb_ids(&body), ["root"]);
    assert!(!body["folders"].as_array().unwrap().is_empty());
    assert!(!body["files"].as_array().unwrap().is_empty());

    let folder_ids: Vec<_> = body["folders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|folder| folder["id"].as_str().unwrap())
        .collect();
    assert_eq!(folder_ids, ["projects", "documents", "archive", "media", "personal"]);
    assert_eq!(file_labels(&body), ["Добро пожаловать.txt", "Инструкция.pdf"]);
}

#[tokio::test]
async fn nested_path_resolves_with_full_breadcrumbs() {
    let server = test_server();

    let response = server
        .get("/api/storage")
        .add_query_param("path", "projects/design")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], "design");
    assert_eq!(breadcrumb_ids(&body), ["root", "projects", "design"]);
    assert!(body["folders"].as_array().unwrap().is_empty());
    assert_eq!(file_labels(&body), ["Moodboard.png", "UI-kit.fig"]);
}

#[tokio::test]
async fn listing_joins_live_metadata() {
    let server = test_server();
    let moodboard = seed::id_for_alias("moodboard").unwrap();

    let body: Value = server
        .get("/api/storage")
        .add_query_param("path", "projects/design")
        .await
        .json();
    let files = body["files"].as_array().unwrap();

    let item = files.iter().find(|f| f["label"] == "Moodboard.png").unwrap();
    assert_eq!(item["id"], moodboard.to_string());
    assert!(item["meta"].as_str().unwrap().starts_with("PNG • "));
    // Images link straight to the download route.
    assert_eq!(item["preview"], format!("/api/files/{moodboard}"));

    // Non-image without a static hint carries no preview at all.
    let ui_kit = files.iter().find(|f| f["label"] == "UI-kit.fig").unwrap();
    assert!(ui_kit.get("preview").is_none());
}

#[tokio::test]
async fn non_image_files_fall_back_to_static_hints() {
    let server = test_server();

    let body: Value = server
        .get("/api/storage")
        .add_query_param("path", "projects/marketing")
        .await
        .json();
    let files = body["files"].as_array().unwrap();
    let deck = files.iter().find(|f| f["label"] == "Презентация.pptx").unwrap();
    assert_eq!(deck["preview"], "/globe.svg");
}

#[tokio::test]
async fn unresolved_paths_are_not_found() {
    let server = test_server();

    let response = server
        .get("/api/storage")
        .add_query_param("path", "does/not/exist")
        .await;
    response.assert_status_not_found();

    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Папка не найдена" }));
}

#[tokio::test]
async fn empty_segments_in_the_path_are_ignored() {
    let server = test_server();

    let response = server
        .get("/api/storage")
        .add_query_param("path", "/projects//design/")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], "design");
}

#[tokio::test]
async fn soft_deleted_files_vanish_without_disturbing_siblings() {
    let server = test_server();
    let moodboard = seed::id_for_alias("moodboard").unwrap();

    server
        .delete(&format!("/api/files/{moodboard}"))
        .await
        .assert_status_ok();

    let body: Value = server
        .get("/api/storage")
        .add_query_param("path", "projects/design")
        .await
        .json();
    assert_eq!(file_labels(&body), ["UI-kit.fig"]);

    // Parent and sibling folders are untouched.
    let parent: Value = server
        .get("/api/storage")
        .add_query_param("path", "projects")
        .await
        .json();
    assert_eq!(file_labels(&parent), ["Roadmap.pdf"]);

    let marketing: Value = server
        .get("/api/storage")
        .add_query_param("path", "projects/marketing")
        .await
        .json();
    assert_eq!(file_labels(&marketing), ["Презентация.pptx"]);
}

#[tokio::test]
async fn replacing_a_file_updates_its_listing_entry() {
    let server = test_server();
    let estimate = seed::id_for_alias("estimate").unwrap();

    server
        .post(&format!("/api/files/{estimate}/name"))
        .json(&json!({ "filename": "Смета итоговая.xlsx" }))
        .await
        .assert_status_ok();

    let body: Value = server
        .get("/api/storage")
        .add_query_param("path", "documents")
        .await
        .json();
    assert!(file_labels(&body).contains(&"Смета итоговая.xlsx".to_string()));
}
