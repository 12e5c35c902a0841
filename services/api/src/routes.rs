use crate::infra::{AppState, ReadinessStatus};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use marketplace_admin::vendors::{vendor_router, VendorDirectoryService, VendorRepository};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_vendor_routes<R>(service: Arc<VendorDirectoryService<R>>) -> axum::Router
where
    R: VendorRepository + 'static,
{
    vendor_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": env!("CARGO_PKG_NAME") }))
}

/// 200 once the seed import has finished, 503 while it runs or after it failed.
pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let status = state.readiness.status();
    let code = match status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::Seeding | ReadinessStatus::SeedFailed => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(json!({ "status": status.as_str() })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use marketplace_admin::vendors::{InMemoryVendorRepository, VendorId, VendorRecord};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use crate::infra::Readiness;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Readiness::default(),
            metrics: Arc::new(recorder.handle()),
        }
    }

    fn test_app(state: AppState) -> axum::Router {
        let service = Arc::new(VendorDirectoryService::new(Arc::new(
            InMemoryVendorRepository::default(),
        )));
        service
            .register(VendorRecord {
                id: VendorId("v-1".to_string()),
                business_name: Some("Cedar Hill Creamery".to_string()),
                ..VendorRecord::default()
            })
            .expect("seed vendor");
        with_vendor_routes(service).layer(Extension(state))
    }

    #[tokio::test]
    async fn readiness_follows_seeding_outcome() {
        let seeding = test_state();
        let failed = test_state();
        failed.readiness.mark_failed();
        let ready = test_state();
        ready.readiness.mark_ready();

        let cases = [
            (seeding, StatusCode::SERVICE_UNAVAILABLE, "seeding"),
            (failed, StatusCode::SERVICE_UNAVAILABLE, "seed_failed"),
            (ready, StatusCode::OK, "ready"),
        ];
        for (state, code, label) in cases {
            let response = test_app(state)
                .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
                .await
                .expect("router responds");
            assert_eq!(response.status(), code);
            let bytes = axum::body::to_bytes(response.into_body(), 1024)
                .await
                .expect("read body");
            let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
            assert_eq!(body["status"], label);
        }
    }

    #[tokio::test]
    async fn health_and_vendor_routes_share_one_router() {
        let app = test_app(test_state());

        let health = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(health.status(), StatusCode::OK);

        let vendor = app
            .oneshot(
                Request::get("/api/v1/admin/vendors/v-1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(vendor.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_endpoint_uses_prometheus_content_type() {
        let response = metrics_endpoint(Extension(test_state())).await.into_response();
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/plain; version=0.0.4")
        );
    }
}
