use crate::app::state::AppState;
use crate::utils::error::Result;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}

const CALLBACK_LOG_PREVIEW: usize = 4096;

/// PMS 的通知內容不做任何解析，只記錄下來；大小不設上限，日誌只印前段
pub async fn callback(body: Bytes) -> Json<Value> {
    let preview = &body[..body.len().min(CALLBACK_LOG_PREVIEW)];
    tracing::info!(
        "📨 CALLBACK ({} bytes): {}{}",
        body.len(),
        String::from_utf8_lossy(preview),
        if body.len() > CALLBACK_LOG_PREVIEW { "…" } else { "" }
    );
    Json(json!({ "ok": true }))
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let current = state.startup.current();
    let ready = state.startup.is_ready();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(json!({ "ready": ready, "state": current.as_str() })))
}

pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response> {
    let body = state.metrics.export()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response())
}

pub async fn list_services(State(state): State<AppState>) -> Result<Response> {
    forward(&state, "/a1-policy/v2/services").await
}

pub async fn list_policies(State(state): State<AppState>) -> Result<Response> {
    forward(&state, "/a1-policy/v2/policy-instances").await
}

pub async fn list_rics(State(state): State<AppState>) -> Result<Response> {
    forward(&state, "/a1-policy/v2/rics").await
}

#[derive(Debug, Deserialize)]
pub struct PolicyTypesQuery {
    pub ric_id: Option<String>,
}

pub async fn list_policy_types(
    State(state): State<AppState>,
    Query(query): Query<PolicyTypesQuery>,
) -> Result<Response> {
    let mut path = "/a1-policy/v2/policy-types".to_string();
    if let Some(ric_id) = query.ric_id.filter(|r| !r.is_empty()) {
        let encoded: String = url::form_urlencoded::byte_serialize(ric_id.as_bytes()).collect();
        path.push_str("?ric_id=");
        path.push_str(&encoded);
    }
    forward(&state, &path).await
}

async fn forward(state: &AppState, path: &str) -> Result<Response> {
    let upstream = state.pms.forward_get(&state.config, path).await?;
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);

    let mut response = (status, upstream.body).into_response();
    if let Some(content_type) = upstream
        .content_type
        .and_then(|v| HeaderValue::from_str(&v).ok())
    {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}
