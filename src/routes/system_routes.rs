use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::config::AppConfig;
use crate::services::item_service;
use crate::state::item::ItemStore;

#[derive(Clone)]
struct SystemState {
    server_version: String,
    store: ItemStore,
}

#[derive(Debug, Serialize)]
struct ServiceStatus {
    service: &'static str,
    version: String,
    items: usize,
}

/// Probes under /system. They read the store but never change it.
pub fn routes(config: &AppConfig, store: ItemStore) -> Router {
    let state = SystemState {
        server_version: config.server_version.clone(),
        store,
    };

    Router::new()
        .route("/alive", get(|| async { "OK" }))
        .route("/version", get(status))
        .with_state(state)
}

/// GET /system/version
async fn status(State(state): State<SystemState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        service: env!("CARGO_PKG_NAME"),
        version: state.server_version,
        items: item_service::count(&state.store),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::item::new_store;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_of(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn alive_answers_ok() {
        let (status, body) = body_of(routes(&AppConfig::default(), new_store()), "/alive").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn version_reports_service_version_and_item_count() {
        let cfg = AppConfig {
            server_version: "9.9.9-test".to_string(),
            ..AppConfig::default()
        };
        let store = new_store();
        item_service::create(&store, "widget".into(), 9.5).unwrap();
        item_service::create(&store, "gadget".into(), 3.0).unwrap();

        let (status, body) = body_of(routes(&cfg, store), "/version").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            json!({ "service": "pricedb", "version": "9.9.9-test", "items": 2 })
        );
    }
}
