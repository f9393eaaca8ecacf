//! Fake taxa API and publisher served by axum on an ephemeral port.

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use nearme_core::NearMeConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct Recorded {
    pub queries: Mutex<Vec<String>>,
    pub publish_bodies: Mutex<Vec<Value>>,
    pub cookies: Mutex<Vec<Option<String>>>,
}

pub struct FakeRemote {
    pub base: String,
    pub recorded: Arc<Recorded>,
}

impl FakeRemote {
    pub async fn start() -> Self {
        let recorded = Arc::new(Recorded::default());
        let app = Router::new()
            .route("/v1/taxa/autocomplete", get(autocomplete))
            .route("/v1/taxa/{id}", get(taxon))
            .route("/broken/taxa/autocomplete", get(|| async { "<html>maintenance</html>" }))
            .route("/publish", post(publish))
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self { base: format!("http://{addr}"), recorded }
    }

    pub fn config(&self) -> NearMeConfig {
        NearMeConfig {
            api_base: format!("{}/v1", self.base),
            publish_base: self.base.clone(),
            ..NearMeConfig::default()
        }
    }
}

async fn autocomplete(
    State(rec): State<Arc<Recorded>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    rec.queries.lock().unwrap().push(q.clone());
    if q.is_empty() {
        return Json(json!({ "total_results": 0, "results": [] }));
    }
    Json(json!({
        "total_results": 2,
        "results": [
            { "id": 19350, "name": "Strigidae", "preferred_common_name": "Typical Owls", "rank": "family" },
            { "id": 20413, "name": "Tyto alba", "rank": "species" }
        ]
    }))
}

async fn taxon(Path(id): Path<u64>) -> impl IntoResponse {
    match id {
        404 => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found", "status": 404 }))),
        0 => (StatusCode::OK, Json(json!({ "total_results": 0, "results": [] }))),
        _ => (
            StatusCode::OK,
            Json(json!({
                "total_results": 1,
                "results": [{
                    "id": id,
                    "name": "Megascops asio",
                    "preferred_common_name": "Eastern Screech Owl",
                    "ancestors": [
                        { "id": 48460, "name": "Life" },
                        { "id": 1, "name": "Animalia", "preferred_common_name": "Animals" }
                    ]
                }]
            })),
        ),
    }
}

async fn publish(
    State(rec): State<Arc<Recorded>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let cookie = headers.get("cookie").and_then(|v| v.to_str().ok()).map(str::to_string);
    rec.cookies.lock().unwrap().push(cookie);
    rec.publish_bodies.lock().unwrap().push(body.clone());

    let hostname = body["hostname"].as_str().unwrap_or_default();
    if hostname == "taken-near-me" {
        return Json(json!({ "ok": false, "msg": "name taken" }));
    }
    Json(json!({
        "ok": true,
        "deploy_url": format!("{hostname}.now.sh"),
        "deploy_id": "dpl_123",
        "deploy_message": "",
        "url": "owls-abc.now.sh"
    }))
}
