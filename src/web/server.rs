use axum::{http::HeaderValue, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ServerConfig;

use super::api::vessels as vessel_handlers;
use super::api_doc::ApiDoc;
use super::dataset::Dataset;

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(dataset: Arc<Dataset>, config: &ServerConfig) -> Router {
    let state = AppState { dataset };

    Router::new()
        .route("/vesselList", get(vessel_handlers::vessel_list))
        .route(
            "/vesselPoints/{vessel_id}",
            get(vessel_handlers::vessel_points),
        )
        .route("/api-doc/openapi.json", get(openapi_json))
        .layer(cors_layer(&config.cors_allow_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: &ServerConfig, dataset: Dataset) -> std::io::Result<()> {
    let app = build_router(Arc::new(dataset), config);

    log::info!("Starting data source on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::fixtures::point;
    use crate::web::dataset::VesselRecord;

    async fn spawn(config: ServerConfig) -> String {
        let dataset = Dataset::from_records(vec![
            VesselRecord {
                mmsi: "111".into(),
                point: point(10.0, 50.0, 0, 0),
            },
            VesselRecord {
                mmsi: "111".into(),
                point: point(10.1, 50.0, 1, 0),
            },
        ]);
        let app = build_router(Arc::new(dataset), &config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn bad_time_is_rejected() {
        let base = spawn(ServerConfig::default()).await;
        let response = reqwest::get(format!(
            "{}/vesselPoints/111?start_time=soon&end_time=2020-01-01T00:00:00Z",
            base
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "invalid_time");
    }

    #[tokio::test]
    async fn points_are_served_with_wire_names() {
        let base = spawn(ServerConfig::default()).await;
        let body: serde_json::Value = reqwest::get(format!("{}/vesselPoints/111", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let points = body.as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0]["lon"], 10.0);
        assert_eq!(points[0]["timestamp"], "2020-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn serves_openapi_document() {
        let base = spawn(ServerConfig::default()).await;
        let doc: serde_json::Value = reqwest::get(format!("{}/api-doc/openapi.json", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(doc["paths"]["/vesselList"].is_object());
        assert!(doc["paths"]["/vesselPoints/{vessel_id}"].is_object());
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let base = spawn(ServerConfig {
            cors_allow_origin: vec!["http://localhost:3000".into()],
            ..ServerConfig::default()
        })
        .await;
        let response = reqwest::Client::new()
            .get(format!("{}/vesselList", base))
            .header("Origin", "http://localhost:3000")
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }
}
