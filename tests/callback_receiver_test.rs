use a1_rapp::{create_router, AppState, PmsClient, RappConfig, RappMetrics, StartupOrchestrator};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use httpmock::prelude::*;
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    metrics: RappMetrics,
    orchestrator: StartupOrchestrator<PmsClient>,
}

fn test_app(config: RappConfig) -> TestApp {
    let config = Arc::new(config);
    let metrics = RappMetrics::new().unwrap();
    let pms = Arc::new(PmsClient::new(metrics.clone()).unwrap());
    let orchestrator = StartupOrchestrator::new(pms.clone(), config.clone());
    let state = AppState::new(config, pms, metrics.clone(), orchestrator.status());

    TestApp {
        router: create_router(state),
        metrics,
        orchestrator,
    }
}

fn unreachable_pms() -> RappConfig {
    RappConfig {
        pms_url: "http://127.0.0.1:1".to_string(),
        ..RappConfig::default()
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_callback(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/callback")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_healthz_is_ok_before_startup_runs() {
    let app = test_app(unreachable_pms());

    let (status, body) = send(&app.router, get("/healthz")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn test_callback_accepts_json_body() {
    let app = test_app(unreachable_pms());

    let (status, body) = send(&app.router, post_callback(r#"{"a":1}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn test_callback_accepts_empty_body() {
    let app = test_app(unreachable_pms());

    let (status, body) = send(&app.router, post_callback(Body::empty())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn test_callback_accepts_non_json_and_binary_bodies() {
    let app = test_app(unreachable_pms());

    let (status, body) = send(&app.router, post_callback("not-json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({"ok": true}));

    let (status, body) = send(&app.router, post_callback(vec![0xff_u8, 0xfe, 0x00, 0x7b])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn test_callback_accepts_body_larger_than_default_limit() {
    let app = test_app(unreachable_pms());
    let payload = vec![b'x'; 3 * 1024 * 1024];

    let (status, body) = send(&app.router, post_callback(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn test_callbacks_can_interleave() {
    let app = test_app(unreachable_pms());

    let calls = (0..8).map(|i| {
        let router = app.router.clone();
        tokio::spawn(async move {
            let payload = format!(r#"{{"seq":{}}}"#, i);
            send(&router, post_callback(payload)).await.0
        })
    });

    for call in calls.collect::<Vec<_>>() {
        assert_eq!(call.await.unwrap(), StatusCode::OK);
    }
    assert_eq!(app.metrics.http_request_count("/callback", 200), 8);
}

#[tokio::test]
async fn test_readyz_reflects_startup_state() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/a1-policy/v2/services");
        then.status(200);
    });
    server.mock(|when, then| {
        when.method(PUT).path("/a1-policy/v2/policies");
        then.status(200);
    });

    let app = test_app(RappConfig {
        pms_url: server.base_url(),
        ..RappConfig::default()
    });

    let (status, body) = send(&app.router, get("/readyz")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json(&body), serde_json::json!({"ready": false, "state": "idle"}));

    app.orchestrator.run().await;

    let (status, body) = send(&app.router, get("/readyz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({"ready": true, "state": "done"}));
}

#[tokio::test]
async fn test_readyz_reports_failed_handshake() {
    let app = test_app(unreachable_pms());

    app.orchestrator.run().await;

    let (status, body) = send(&app.router, get("/readyz")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json(&body), serde_json::json!({"ready": false, "state": "failed"}));

    let (status, _) = send(&app.router, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_version_endpoint() {
    let app = test_app(unreachable_pms());

    let (status, body) = send(&app.router, get("/version")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_metrics_endpoint_counts_requests() {
    let app = test_app(unreachable_pms());

    send(&app.router, get("/healthz")).await;
    send(&app.router, get("/healthz")).await;
    send(&app.router, post_callback("{}")).await;

    let response = app.router.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(text.contains("rapp_http_requests_total"));
    assert!(text.contains("path=\"/healthz\""));
    assert!(text.contains("path=\"/callback\""));
    assert_eq!(app.metrics.http_request_count("/healthz", 200), 2);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = test_app(unreachable_pms());

    let (status, _) = send(&app.router, get("/does-not-exist")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_header_is_added() {
    let app = test_app(unreachable_pms());

    let request = Request::builder()
        .method("GET")
        .uri("/healthz")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_api_views_forward_to_pms() {
    let server = MockServer::start();
    let rics_mock = server.mock(|when, then| {
        when.method(GET).path("/a1-policy/v2/rics");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"rics": [{"ric_id": "ric2"}]}));
    });
    let instances_mock = server.mock(|when, then| {
        when.method(GET).path("/a1-policy/v2/policy-instances");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"policy_instances": []}));
    });
    let services_mock = server.mock(|when, then| {
        when.method(GET).path("/a1-policy/v2/services");
        then.status(404);
    });

    let app = test_app(RappConfig {
        pms_url: server.base_url(),
        ..RappConfig::default()
    });

    let (status, body) = send(&app.router, get("/api/rics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["rics"][0]["ric_id"], "ric2");

    let (status, body) = send(&app.router, get("/api/policies")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({"policy_instances": []}));

    let (status, _) = send(&app.router, get("/api/services")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    rics_mock.assert();
    instances_mock.assert();
    services_mock.assert();
}

#[tokio::test]
async fn test_policy_types_forwards_ric_filter() {
    let server = MockServer::start();
    let types_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/a1-policy/v2/policy-types")
            .query_param("ric_id", "ric 2");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"policytype_ids": ["", "STD_1"]}));
    });

    let app = test_app(RappConfig {
        pms_url: server.base_url(),
        ..RappConfig::default()
    });

    let (status, body) = send(&app.router, get("/api/policy-types?ric_id=ric%202")).await;

    types_mock.assert();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["policytype_ids"][1], "STD_1");
}

#[tokio::test]
async fn test_api_view_with_unreachable_pms_is_bad_gateway() {
    let app = test_app(unreachable_pms());

    let (status, body) = send(&app.router, get("/api/rics")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json(&body)["ok"], false);
}
