//! End-to-end tests of the verification client against an in-process
//! recognition service.

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use facegate_types::{Identifier, ImageBytes, TransportFailure, VerificationResult};
use facegate_verification::{encode, VerificationClient, Verifier};
use serde_json::{json, Value};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

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

fn client(base: &str) -> VerificationClient {
    VerificationClient::new(base, "/login", None).expect("client")
}

fn payload(identifier: &str) -> facegate_verification::EvidencePayload {
    encode(
        &Identifier::from(identifier),
        Some(ImageBytes::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])),
    )
    .expect("encode")
}

/// Echoes the multipart fields it received, using the roll number as `name`.
async fn echo_login(mut multipart: Multipart) -> Json<Value> {
    let mut rollnumber = None;
    let mut image = json!(null);
    while let Some(field) = multipart.next_field().await.expect("field") {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.expect("bytes");
                image = json!({
                    "file_name": file_name,
                    "content_type": content_type,
                    "len": bytes.len(),
                });
            }
            "rollnumber" => rollnumber = Some(field.text().await.expect("text")),
            _ => {}
        }
    }
    Json(json!({ "name": rollnumber, "image": image }))
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sends_image_and_rollnumber_parts() {
    let base = spawn_service(Router::new().route("/login", post(echo_login))).await;

    let result = client(&base).verify(payload("45CSE001")).await;

    match result {
        VerificationResult::Recognized {
            subject_name,
            payload,
        } => {
            assert_eq!(subject_name, "45CSE001");
            assert_eq!(payload["image"]["file_name"], "captured_image.jpg");
            assert_eq!(payload["image"]["content_type"], "image/jpeg");
            assert_eq!(payload["image"]["len"], 6);
        }
        other => panic!("expected recognized, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Classification over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_name_is_unrecognized() {
    let app = Router::new().route(
        "/login",
        post(|| async { Json(json!({ "name": "Unknown" })) }),
    );
    let base = spawn_service(app).await;

    let result = client(&base).verify(payload("123")).await;
    assert!(matches!(result, VerificationResult::Unrecognized { .. }));
}

#[tokio::test]
async fn structured_rejection_carries_server_text() {
    let app = Router::new().route(
        "/login",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad image" }))) }),
    );
    let base = spawn_service(app).await;

    let result = client(&base).verify(payload("123")).await;
    assert_eq!(
        result,
        VerificationResult::TransportFailure(TransportFailure::Server {
            status: 400,
            detail: "bad image".into(),
        })
    );
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
    let app = Router::new().route("/login", post(|| async { "ok" }));
    let base = spawn_service(app).await;

    let result = client(&base).verify(payload("123")).await;
    assert!(matches!(
        result,
        VerificationResult::TransportFailure(TransportFailure::MalformedResponse { .. })
    ));
}

#[tokio::test]
async fn unreachable_service_is_network_failure() {
    // Reserve a port, then free it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(&format!("http://{addr}")).verify(payload("123")).await;
    assert!(matches!(
        result,
        VerificationResult::TransportFailure(TransportFailure::Network { .. })
    ));
}

#[tokio::test]
async fn configured_timeout_is_network_failure() {
    let app = Router::new().route(
        "/login",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "name": "late" }))
        }),
    );
    let base = spawn_service(app).await;

    let client = VerificationClient::new(&base, "/login", Some(Duration::from_millis(200))).unwrap();
    match client.verify(payload("123")).await {
        VerificationResult::TransportFailure(TransportFailure::Network { detail }) => {
            assert!(detail.contains("timed out"), "{detail}");
        }
        other => panic!("expected network failure, got {other:?}"),
    }
}
