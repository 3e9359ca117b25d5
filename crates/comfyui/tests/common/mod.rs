//! Shared mock ComfyUI server for HTTP-level tests.
//!
//! Spawns a real `axum` listener on an ephemeral loopback port so the
//! `reqwest`-based client is exercised over actual HTTP.

use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};

/// A running mock server. The listener task is aborted on drop.
pub struct MockServer {
    /// Base URL, e.g. `http://127.0.0.1:49152`.
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

/// History payload for a finished prompt with a single image output.
pub fn finished_history(prompt_id: &str) -> serde_json::Value {
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

/// Router mimicking a healthy server whose jobs finish instantly.
///
/// Every submission is assigned `prompt_id`; history contains it from
/// the first check; `/view` serves fixed JPEG bytes.
pub fn completing_router(prompt_id: &'static str) -> Router {
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
        .route("/view", get(|| async { b"JPEGDATA".to_vec() }))
        .route(
            "/system_stats",
            get(|| async {
                Json(serde_json::json!({
                    "system": {
                        "comfyui_version": "0.3.26",
                        "pytorch_version": "2.4.1+cu124"
                    }
                }))
            }),
        )
}
