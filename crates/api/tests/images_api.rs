//! Integration tests for `GET /images`: pagination, jumps, and the
//! favorites filter.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_empty, seed_images, set_image_root};

// ---------------------------------------------------------------------------
// Test: without a configured root, the listing is empty, not an error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_root_yields_empty_exhausted_result() {
    let data = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(data.path());

    let response = get(app, "/images?cursor=0&limit=20").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["items"].as_array().expect("items").len(), 0);
    assert!(json["nextCursor"].is_null());
    assert_eq!(json["total"], 0);
    assert_eq!(json["currentPage"], 1);
    assert_eq!(json["totalPages"], 0);
}

// ---------------------------------------------------------------------------
// Test: 45 files at pageSize 20 page as 20/20/5 with cursors 20/40/null
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pages_45_files_at_20() {
    let data = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    seed_images(root.path(), 45).await;

    let app = common::build_test_app(data.path());
    set_image_root(&app, root.path(), "p").await;

    let p1 = body_json(get(app.clone(), "/images?cursor=0&limit=20").await).await;
    assert_eq!(p1["items"].as_array().expect("items").len(), 20);
    assert_eq!(p1["nextCursor"], "20");
    assert_eq!(p1["total"], 45);
    assert_eq!(p1["currentPage"], 1);
    assert_eq!(p1["totalPages"], 3);

    let p2 = body_json(get(app.clone(), "/images?cursor=20&limit=20").await).await;
    assert_eq!(p2["items"].as_array().expect("items").len(), 20);
    assert_eq!(p2["nextCursor"], "40");
    assert_eq!(p2["currentPage"], 2);

    let p3 = body_json(get(app, "/images?cursor=40&limit=20").await).await;
    assert_eq!(p3["items"].as_array().expect("items").len(), 5);
    assert!(p3["nextCursor"].is_null());
    assert_eq!(p3["currentPage"], 3);
}

// ---------------------------------------------------------------------------
// Test: jump straight to offset 44 returns the final item
// ---------------------------------------------------------------------------

#[tokio::test]
async fn jump_to_offset_44_returns_one_item() {
    let data = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    seed_images(root.path(), 45).await;

    let app = common::build_test_app(data.path());
    set_image_root(&app, root.path(), "p").await;

    let json = body_json(get(app, "/images?cursor=44&limit=20").await).await;
    assert_eq!(json["items"].as_array().expect("items").len(), 1);
    assert!(json["nextCursor"].is_null());
}

// ---------------------------------------------------------------------------
// Test: items are wire-shaped with url/placeholder dimensions/kind flag
// ---------------------------------------------------------------------------

#[tokio::test]
async fn items_carry_url_dimensions_and_kind() {
    let data = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    tokio::fs::write(root.path().join("clip 1.mp4"), b"x")
        .await
        .expect("write");
    tokio::fs::write(root.path().join("photo.png"), b"x")
        .await
        .expect("write");

    let app = common::build_test_app(data.path());
    set_image_root(&app, root.path(), "p").await;

    let json = body_json(get(app, "/images").await).await;
    let items = json["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);

    // Natural order: "clip 1.mp4" before "photo.png".
    assert_eq!(items[0]["id"], "clip 1.mp4");
    assert_eq!(items[0]["isVideo"], true);
    assert_eq!(items[0]["url"], "/media/clip%201.mp4");
    assert_eq!(items[1]["name"], "photo.png");
    assert_eq!(items[1]["isVideo"], false);
    assert_eq!(items[1]["width"], 300);
    assert_eq!(items[1]["height"], 200);
    assert_eq!(items[1]["isFavorited"], false);
    assert!(items[1]["modifiedTime"].is_string());
    assert!(items[1]["size"].as_u64().expect("size") > 0);
}

// ---------------------------------------------------------------------------
// Test: favUser mode returns all favorites unpaged and skips stale ids
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fav_user_mode_is_exhaustive_and_enriched() {
    let data = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    seed_images(root.path(), 30).await;

    let app = common::build_test_app(data.path());
    set_image_root(&app, root.path(), "p").await;

    for id in ["img5.png", "img25.png", "vanished.png"] {
        let response = post_empty(app.clone(), &format!("/favorites/alice/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let json = body_json(get(app, "/images?favUser=alice&limit=2").await).await;
    let items = json["items"].as_array().expect("items");

    // All favorites in one response despite limit=2; the stale id is gone.
    let ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().expect("id")).collect();
    assert_eq!(ids, vec!["img5.png", "img25.png"]);
    assert!(items.iter().all(|i| i["isFavorited"] == true));
    assert!(json["nextCursor"].is_null());
    assert_eq!(json["total"], 2);
    assert_eq!(json["totalPages"], 1);
}

// ---------------------------------------------------------------------------
// Test: malformed cursor / limit are 400s
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_cursor_is_bad_request() {
    let data = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(data.path());
    set_image_root(&app, root.path(), "p").await;

    let response = get(app, "/images?cursor=banana").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_limit_is_bad_request() {
    let data = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(data.path());
    set_image_root(&app, root.path(), "p").await;

    let response = get(app, "/images?limit=lots").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: a root that disappears degrades to the empty result
// ---------------------------------------------------------------------------

#[tokio::test]
async fn vanished_root_degrades_to_empty() {
    let data = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    seed_images(root.path(), 3).await;

    let app = common::build_test_app(data.path());
    set_image_root(&app, root.path(), "p").await;
    drop(root); // removes the directory

    let response = get(app, "/images").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["items"].as_array().expect("items").len(), 0);
    assert_eq!(json["total"], 0);
}

// ---------------------------------------------------------------------------
// Test: set-image-root validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn set_image_root_rejects_missing_fields_and_bad_paths() {
    let data = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(data.path());

    let response = common::post_json(
        app.clone(),
        "/set-image-root",
        serde_json::json!({ "path": "/somewhere" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = common::post_json(
        app.clone(),
        "/set-image-root",
        serde_json::json!({ "path": "/no/such/dir", "projectName": "p" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Health must still report unset after failed attempts.
    let health = body_json(get(app, "/health").await).await;
    assert_eq!(health["imageRootSet"], false);
}
