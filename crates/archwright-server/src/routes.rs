//! Route definitions.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router.
///
/// The JSON endpoints are mounted at the root and again under `/api`.
/// When `static_dir` is given, unmatched paths are served from it.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/generate-diagram", post(handlers::generate_diagram))
        .route("/generate-terraform", post(handlers::generate_terraform))
        .route("/get-pricing", post(handlers::get_pricing))
        .route("/question", post(handlers::question))
        .with_state(state);

    let mut app = Router::new()
        .route("/healthz", get(handlers::healthz))
        .merge(api.clone())
        .nest("/api", api);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use archwright_core::Architecture;
    use archwright_pipeline::testing::{
        FakeCatalog, ScriptedGenerator, sample_architecture, sample_json,
    };
    use archwright_pipeline::{CatalogItem, RecommendationPipeline};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app_with(generator: ScriptedGenerator, catalog: FakeCatalog) -> Router {
        let pipeline = RecommendationPipeline::new(Arc::new(generator), Arc::new(catalog));
        create_router(AppState::new(Arc::new(pipeline)), None)
    }

    fn app(reply: impl Into<String>) -> Router {
        app_with(ScriptedGenerator::replying(reply), FakeCatalog::new())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app("")
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "ok": true, "service": "archwright" }));
    }

    #[tokio::test]
    async fn analyze_returns_architecture() {
        let raw = format!("```json\n{}\n```", sample_json());
        let (status, body) = post_json(
            app(raw),
            "/analyze",
            json!({ "requirements": "simple blog, low traffic", "includeTerraform": false }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let arch: Architecture = serde_json::from_value(body["architecture"].clone()).unwrap();
        assert_eq!(arch, sample_architecture());
    }

    #[tokio::test]
    async fn api_prefix_serves_same_routes() {
        let (status, body) = post_json(
            app(sample_json()),
            "/api/analyze",
            json!({ "requirements": "blog" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn empty_requirements_is_bad_request() {
        let (status, body) =
            post_json(app(sample_json()), "/analyze", json!({ "requirements": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("requirements"));
    }

    #[tokio::test]
    async fn malformed_generation_output_is_bad_gateway() {
        let (status, body) = post_json(
            app("I cannot help with that."),
            "/analyze",
            json!({ "requirements": "blog" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
        assert_eq!(body["rawSnippet"], "I cannot help with that.");
    }

    #[tokio::test]
    async fn generation_failure_is_bad_gateway() {
        let (status, body) = post_json(
            app_with(ScriptedGenerator::failing(), FakeCatalog::new()),
            "/question",
            json!({ "question": "Why SQL?", "context": sample_architecture() }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unreadable_body_is_bad_request() {
        let (status, body) =
            post_json(app(""), "/generate-diagram", json!({ "architecture": 42 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn diagram_and_terraform_codes() {
        let (status, body) = post_json(
            app("```mermaid\ngraph TB\n    U[Users] --> A[App]\n```"),
            "/generate-diagram",
            json!({ "architecture": sample_architecture() }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["diagramCode"], "graph TB\n    U[Users] --> A[App]");

        let (status, body) = post_json(
            app("```hcl\nresource \"azurerm_resource_group\" \"main\" {}\n```"),
            "/generate-terraform",
            json!({ "architecture": sample_architecture() }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["terraformCode"],
            "resource \"azurerm_resource_group\" \"main\" {}"
        );
    }

    #[tokio::test]
    async fn pricing_has_one_entry_per_service() {
        let catalog = FakeCatalog::new().with_item(
            "Virtual Machines",
            CatalogItem {
                retail_price: Some(0.013),
                unit_of_measure: Some("1 Hour".to_string()),
                arm_region_name: Some("eastus".to_string()),
                sku_name: Some("B1".to_string()),
            },
        );
        let (status, body) = post_json(
            app_with(ScriptedGenerator::replying(""), catalog),
            "/api/get-pricing",
            json!({ "services": ["Azure App Service", "Unknown Widget Service"] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["pricing"],
            json!({
                "Azure App Service": { "price": 0.013, "unit": "1 Hour", "region": "eastus", "skuName": "B1" },
                "Unknown Widget Service": { "price": 0.0, "unit": "N/A", "region": "eastus", "skuName": "Contact Azure" },
            })
        );
    }

    #[tokio::test]
    async fn question_returns_raw_answer() {
        let (status, body) = post_json(
            app("Use a Premium tier for zone redundancy."),
            "/question",
            json!({ "question": "How do I make it HA?", "context": sample_architecture() }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "Use a Premium tier for zone redundancy.");
    }

    #[tokio::test]
    async fn static_dir_is_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>archwright</h1>").unwrap();
        let pipeline = RecommendationPipeline::new(
            Arc::new(ScriptedGenerator::replying("")),
            Arc::new(FakeCatalog::new()),
        );
        let app = create_router(AppState::new(Arc::new(pipeline)), Some(dir.path()));

        let response = app
            .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>archwright</h1>");
    }
}
