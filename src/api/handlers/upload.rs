//! File upload handler
//!
//! Accepts one file per multipart request plus an optional sender name, stores
//! the bytes, announces the file to every open connection, and returns the
//! announced event to the uploader.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use tracing::info;

use crate::api::server::AppState;
use crate::error::ChatError;
use crate::models::{Event, DEFAULT_SENDER};

/// Handle `POST /upload`.
///
/// Multipart fields: `file` (required, carries the original filename) and
/// `sender` (optional). A request without a `file` field gets a 400 with
/// `{"error":"No file uploaded"}` and triggers no broadcast.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ChatError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut sender: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ChatError::InvalidMultipart(e.to_string()))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("file") => {
                let original_name = field.file_name().unwrap_or("file").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ChatError::InvalidMultipart(e.to_string()))?;
                file = Some((original_name, data));
            }
            Some("sender") => {
                sender = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ChatError::InvalidMultipart(e.to_string()))?,
                );
            }
            _ => {} // ignore unknown fields
        }
    }

    let (original_name, data) = file.ok_or(ChatError::MissingFile)?;

    let stored = state.store.store(&data, &original_name).await?;

    let sender = sender
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SENDER.to_string());
    let event = Event::file(stored.original_name, stored.size, stored.url, sender);

    let delivered = state.broadcaster.broadcast(&event);
    info!(
        stored_name = %stored.stored_name,
        size = stored.size,
        delivered,
        "File uploaded and announced"
    );

    Ok(Json(event))
}

#[cfg(test)]
mod tests {
    use crate::api::routes;
    use crate::api::server::AppState;
    use crate::chat::{Broadcaster, ConnectionRegistry, MessageRouter};
    use crate::storage::UploadStore;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "lan-chat-test-boundary";

    fn test_router() -> (Router, AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let registry = Arc::new(ConnectionRegistry::new());
        let broadcaster = Broadcaster::new(registry.clone());
        let state = AppState {
            registry,
            router: MessageRouter::new(broadcaster.clone()),
            broadcaster,
            store: Arc::new(UploadStore::new(dir.path()).unwrap()),
        };
        (routes::create_router(state.clone()), state, dir)
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_file_event_with_exact_size() {
        let (router, _state, _dir) = test_router();
        let content = b"the quick brown fox";

        let request =
            multipart_request(&[("file", Some("fox.txt"), content), ("sender", None, b"alice")]);
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["type"], "file");
        assert_eq!(body["name"], "fox.txt");
        assert_eq!(body["size"], content.len() as u64);
        assert_eq!(body["sender"], "alice");
        assert!(body["url"].as_str().unwrap().starts_with("/downloads/"));
        assert!(body["id"].is_string());
        assert!(body["timestamp"].is_i64());
    }

    #[tokio::test]
    async fn test_upload_broadcasts_to_open_connections() {
        let (router, state, _dir) = test_router();

        let (tx, mut rx) = mpsc::channel(8);
        state.registry.register(tx);
        rx.recv().await.unwrap(); // welcome

        let response = router
            .oneshot(multipart_request(&[("file", Some("shared.bin"), b"abc")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let returned = json_body(response).await;

        let frame = rx.recv().await.unwrap();
        let broadcast: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(broadcast, returned);
    }

    #[tokio::test]
    async fn test_upload_without_file_is_rejected_without_broadcast() {
        let (router, state, _dir) = test_router();

        let (tx, mut rx) = mpsc::channel(8);
        state.registry.register(tx);
        rx.recv().await.unwrap(); // welcome

        let response = router
            .oneshot(multipart_request(&[("sender", None, b"alice")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!({"error": "No file uploaded"}));

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_upload_defaults_sender_to_anonymous() {
        let (router, _state, _dir) = test_router();

        // No sender field at all
        let response = router
            .clone()
            .oneshot(multipart_request(&[("file", Some("a.txt"), b"x")]))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["sender"], "Anonymous");

        // Blank sender field
        let response = router
            .oneshot(multipart_request(&[
                ("file", Some("a.txt"), b"x"),
                ("sender", None, b"   "),
            ]))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["sender"], "Anonymous");
    }

    #[tokio::test]
    async fn test_uploaded_bytes_round_trip_through_download_url() {
        let (router, _state, _dir) = test_router();
        let content: &[u8] = &[0u8, 1, 2, 254, 255, 42];

        let response = router
            .clone()
            .oneshot(multipart_request(&[("file", Some("blob.bin"), content)]))
            .await
            .unwrap();
        let url = json_body(response).await["url"].as_str().unwrap().to_string();

        let download = router
            .oneshot(Request::builder().uri(&url).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(download.status(), StatusCode::OK);
        let bytes = download.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], content);
    }

    #[tokio::test]
    async fn test_duplicate_filenames_stay_independent() {
        let (router, _state, _dir) = test_router();

        let first = router
            .clone()
            .oneshot(multipart_request(&[("file", Some("same.txt"), b"first")]))
            .await
            .unwrap();
        let second = router
            .clone()
            .oneshot(multipart_request(&[("file", Some("same.txt"), b"second")]))
            .await
            .unwrap();

        let first_url = json_body(first).await["url"].as_str().unwrap().to_string();
        let second_url = json_body(second).await["url"].as_str().unwrap().to_string();
        assert_ne!(first_url, second_url);

        for (url, expected) in [(first_url, &b"first"[..]), (second_url, &b"second"[..])] {
            let download = router
                .clone()
                .oneshot(Request::builder().uri(&url).body(Body::empty()).unwrap())
                .await
                .unwrap();
            let bytes = download.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&bytes[..], expected);
        }
    }
}
