use crate::app::handlers;
use crate::app::state::AppState;
use crate::utils::metrics::RappMetrics;
use axum::extract::{DefaultBodyLimit, MatchedPath, Request, State};
use axum::http::{header, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allow_origin);

    Router::new()
        // Liveness / readiness
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .route("/version", get(handlers::version))
        .route("/metrics", get(handlers::metrics))
        // PMS notifications
        .route(
            "/callback",
            post(handlers::callback).layer(DefaultBodyLimit::disable()),
        )
        // Read-only PMS views
        .route("/api/services", get(handlers::list_services))
        .route("/api/policies", get(handlers::list_policies))
        .route("/api/rics", get(handlers::list_rics))
        .route("/api/policy-types", get(handlers::list_policy_types))
        .route_layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// 以路由樣板當 label，避免任意路徑撐爆 cardinality
async fn track_requests(
    State(metrics): State<RappMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    metrics.record_http_request(&path, response.status().as_u16());
    response
}

fn cors_layer(allow_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allow_origin == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(allow_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(
                "⚠️ Ignoring invalid CORS_ALLOW_ORIGIN '{}': {}",
                allow_origin,
                e
            );
            layer
        }
    }
}
