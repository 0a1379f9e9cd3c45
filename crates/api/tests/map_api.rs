//! HTTP-level integration tests for the `/api/maps` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_annotation, create_map, delete, get, post_json, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Map CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_map_returns_201() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = post_json(
        app,
        "/api/maps",
        json!({"name": "Europe", "image_path": "/img/e.png"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Europe");
    assert_eq!(json["image_path"], "/img/e.png");
    assert_eq!(json["annotations"], json!([]));
    assert_eq!(json["id"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_client_supplied_id_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = post_json(
        app,
        "/api/maps",
        json!({"id": "mine", "name": "Europe", "image_path": "/img/e.png"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_ne!(json["id"], "mine");
}

#[tokio::test]
async fn test_get_map_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;
    let created = create_map(&app, "Get Me", "/img/g.png").await;
    let id = created["id"].as_str().unwrap();

    let response = get(app, &format!("/api/maps/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, created);
}

#[tokio::test]
async fn test_get_nonexistent_map_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = get(app, "/api/maps/6f1c2a44-6b1e-4c1e-9d4f-2f6f1b1d3a10").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_non_uuid_ids_are_not_found_on_every_route() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;
    create_map(&app, "Europe", "/img/e.png").await;

    for id in ["not-a-uuid", "..%2F..%2Fetc%2Fpasswd", "%2E%2E"] {
        let uri = format!("/api/maps/{id}");
        assert_eq!(get(app.clone(), &uri).await.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            put_json(app.clone(), &uri, json!({"name": "x"})).await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(delete(app.clone(), &uri).await.status(), StatusCode::NOT_FOUND);
    }

    // Only the one real document is on disk.
    let maps = std::fs::read_dir(dir.path().join("maps")).unwrap().count();
    assert_eq!(maps, 1);
}

#[tokio::test]
async fn test_update_map_changes_only_given_fields() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;
    let created = create_map(&app, "Original", "/img/o.png").await;
    let id = created["id"].as_str().unwrap();
    create_annotation(
        &app,
        id,
        json!({"type": "note", "x": 1.0, "y": 2.0, "title": "Keep me"}),
    )
    .await;

    let response = put_json(
        app.clone(),
        &format!("/api/maps/{id}"),
        json!({"name": "Updated"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Updated");
    assert_eq!(json["image_path"], "/img/o.png");
    assert_eq!(json["annotations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_cannot_replace_annotations() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;
    let created = create_map(&app, "Europe", "/img/e.png").await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/api/maps/{id}"),
        json!({"annotations": [{"id": "x"}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, created);
}

#[tokio::test]
async fn test_update_nonexistent_map_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = put_json(
        app,
        "/api/maps/6f1c2a44-6b1e-4c1e-9d4f-2f6f1b1d3a10",
        json!({"name": "Nobody"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_map_returns_204_then_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;
    let created = create_map(&app, "Doomed", "/img/d.png").await;
    let uri = format!("/api/maps/{}", created["id"].as_str().unwrap());

    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = get(app, "/api/maps").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_list_returns_sorted_summaries() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;
    let asia = create_map(&app, "Asia", "/img/a.png").await;
    create_map(&app, "Europe", "/img/e.png").await;
    create_annotation(
        &app,
        asia["id"].as_str().unwrap(),
        json!({"type": "city", "x": 1.0, "y": 1.0, "title": "Tokyo"}),
    )
    .await;

    let response = get(app, "/api/maps").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let maps = json.as_array().unwrap();
    assert_eq!(maps.len(), 2);
    assert_eq!(maps[0]["name"], "Asia");
    assert_eq!(maps[0]["annotation_count"], 1);
    assert_eq!(maps[1]["name"], "Europe");
    assert_eq!(maps[1]["annotation_count"], 0);
    assert!(maps[0].get("annotations").is_none());
}

#[tokio::test]
async fn test_list_skips_unreadable_documents() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;
    create_map(&app, "Europe", "/img/e.png").await;
    std::fs::write(
        dir.path()
            .join("maps")
            .join("0b9a4f8e-2c5d-4e8f-9a7b-1c2d3e4f5a6b.json"),
        "{ not json",
    )
    .unwrap();

    let response = get(app, "/api/maps").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let maps = json.as_array().unwrap();
    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0]["name"], "Europe");
}

#[tokio::test]
async fn test_corrupt_document_by_id_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;
    let id = "0b9a4f8e-2c5d-4e8f-9a7b-1c2d3e4f5a6b";
    std::fs::write(dir.path().join("maps").join(format!("{id}.json")), "[").unwrap();

    let response = get(app, &format!("/api/maps/{id}")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains(id));
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_map_with_annotation_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir).await;

    let response = post_json(
        app.clone(),
        "/api/maps",
        json!({"name": "Europe", "image_path": "/img/e.png"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let map = body_json(response).await;
    assert_eq!(map["annotations"], json!([]));
    let map_id = map["id"].as_str().unwrap();
    let map_uri = format!("/api/maps/{map_id}");

    let response = post_json(
        app.clone(),
        &format!("{map_uri}/annotations"),
        json!({"type": "city", "x": 10.5, "y": 20.0, "title": "Paris", "description": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let annotation = body_json(response).await;
    assert!(annotation["id"].is_string());

    let response = get(app.clone(), &map_uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["annotations"], json!([annotation]));

    let response = delete(app.clone(), &map_uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &map_uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
