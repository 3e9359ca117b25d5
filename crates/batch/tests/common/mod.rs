//! Mock ComfyUI servers for batch-driver tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

/// A running mock server. The listener task is aborted on drop.
pub struct MockServer {
    pub url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl MockServer {
    /// Bind an ephemeral port and serve `router` in the background.
    pub async fn spawn(router: Router) -> MockServer {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock listener addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve mock");
        });
        MockServer {
            url: format!("http://{addr}"),
            handle,
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// History payload for a finished prompt with one image output.
fn finished_history(prompt_id: &str) -> serde_json::Value {
    let entry = serde_json::json!({
        "outputs": {
            "11": {
                "images": [
                    {"filename": "focal_00001_.png", "subfolder": "", "type": "output"}
                ]
            }
        }
    });
    let mut map = serde_json::Map::new();
    map.insert(prompt_id.to_string(), entry);
    serde_json::Value::Object(map)
}

/// Healthy server: every submission gets `prompt_id`, history contains
/// it immediately, `/view` serves `image_bytes`.
pub fn completing_router(prompt_id: &'static str, image_bytes: &'static [u8]) -> Router {
    Router::new()
        .route(
            "/prompt",
            post(move || async move {
                Json(serde_json::json!({"prompt_id": prompt_id, "number": 1}))
            }),
        )
        .route(
            "/history/{id}",
            get(move |Path(id): Path<String>| async move {
                if id == prompt_id {
                    Json(finished_history(&id))
                } else {
                    Json(serde_json::json!({}))
                }
            }),
        )
        .route("/view", get(move || async move { image_bytes.to_vec() }))
}

/// Server that rejects every submission with a 500, counting attempts
/// into `submissions`.
pub fn rejecting_router(submissions: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/prompt",
        post(move || async move {
            submissions.fetch_add(1, Ordering::SeqCst);
            (StatusCode::INTERNAL_SERVER_ERROR, "out of VRAM")
        }),
    )
}

/// Server that numbers submissions `job-1`, `job-2`, ... and reports
/// every job finished except those listed in `stuck`.
pub fn partially_stuck_router(stuck: &'static [&'static str]) -> Router {
    let counter = Arc::new(AtomicUsize::new(0));
    Router::new()
        .route(
            "/prompt",
            post(move || {
                let counter = Arc::clone(&counter);
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    Json(serde_json::json!({"prompt_id": format!("job-{n}"), "number": n}))
                }
            }),
        )
        .route(
            "/history/{id}",
            get(move |Path(id): Path<String>| async move {
                if stuck.contains(&id.as_str()) {
                    Json(serde_json::json!({}))
                } else {
                    Json(finished_history(&id))
                }
            }),
        )
        .route("/view", get(|| async { b"JPEGDATA".to_vec() }))
}

/// Server whose jobs complete but produce no image outputs.
pub fn imageless_router(prompt_id: &'static str) -> Router {
    Router::new()
        .route(
            "/prompt",
            post(move || async move {
                Json(serde_json::json!({"prompt_id": prompt_id, "number": 1}))
            }),
        )
        .route(
            "/history/{id}",
            get(|Path(id): Path<String>| async move {
                let entry = serde_json::json!({"outputs": {}});
                let mut map = serde_json::Map::new();
                map.insert(id, entry);
                Json(serde_json::Value::Object(map))
            }),
        )
}
