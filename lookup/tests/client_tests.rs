//! Lookup client against an in-process image service.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use facegate_lookup::{LookupError, StoredImageClient, FETCH_FAILED_MESSAGE};
use serde_json::{json, Value};

async fn spawn_service(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn images(Path(username): Path<String>) -> Result<Json<Value>, StatusCode> {
    match username.as_str() {
        // "/9j/" is the base64 prefix of a JPEG SOI marker.
        "alice" => Ok(Json(json!({ "stored_image": "/9j/4AAQ" }))),
        "empty" => Ok(Json(json!({ "stored_image": "" }))),
        "bare" => Ok(Json(json!({}))),
        "garbled" => Ok(Json(json!({ "stored_image": "***" }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

fn service() -> Router {
    Router::new().route("/users/:username/images", get(images))
}

#[tokio::test]
async fn fetches_and_decodes_stored_image() {
    let base = spawn_service(service()).await;
    let client = StoredImageClient::new(&base, None).unwrap();

    let stored = client.fetch("alice").await.unwrap().expect("image");
    assert_eq!(stored.username, "alice");
    assert_eq!(stored.image.as_slice(), &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
}

#[tokio::test]
async fn empty_or_missing_image_is_none() {
    let base = spawn_service(service()).await;
    let client = StoredImageClient::new(&base, None).unwrap();

    assert!(client.fetch("empty").await.unwrap().is_none());
    assert!(client.fetch("bare").await.unwrap().is_none());
}

#[tokio::test]
async fn status_failure_is_an_error() {
    let base = spawn_service(service()).await;
    let client = StoredImageClient::new(&base, None).unwrap();

    let err = client.fetch("nobody").await.unwrap_err();
    assert!(matches!(err, LookupError::RequestFailed(_)), "{err}");
    assert_eq!(err.user_message(), FETCH_FAILED_MESSAGE);
}

#[tokio::test]
async fn invalid_base64_is_an_error() {
    let base = spawn_service(service()).await;
    let client = StoredImageClient::new(&base, None).unwrap();

    let err = client.fetch("garbled").await.unwrap_err();
    assert!(matches!(err, LookupError::InvalidResponse(_)), "{err}");
}

#[tokio::test]
async fn unreachable_service_is_an_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = StoredImageClient::new(&format!("http://{addr}"), None).unwrap();
    let err = client.fetch("alice").await.unwrap_err();
    assert!(matches!(err, LookupError::Unreachable(_)), "{err}");
}
