use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{api, AppState};
use shared::{SearchProxy, UpstreamConfig};
use tower::ServiceExt;

/// Stub of the messages endpoint; counts the calls it receives.
async fn spawn_upstream(status: StatusCode, body: String) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let app = Router::new().route(
        "/v1/messages",
        post(move || {
            let body = body.clone();
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), calls)
}

fn text_reply(text: &str) -> String {
    json!({"content": [{"type": "text", "text": text}]}).to_string()
}

fn spawn_app(base_url: &str, static_dir: Option<PathBuf>) -> Router {
    let config = UpstreamConfig {
        base_url: base_url.to_string(),
        ..UpstreamConfig::default()
    };
    let state = AppState {
        proxy: SearchProxy::new("sk-ant-test", &config).unwrap(),
        static_dir,
    };
    api::router(Arc::new(state))
}

// Nothing listens on port 9; reaching the network would fail the test.
fn offline_app() -> Router {
    spawn_app("http://127.0.0.1:9", None)
}

fn search_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn read_body(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn read_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&read_body(response).await).unwrap()
}

fn assert_cors(response: &Response<Body>) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn test_search_extracts_array_from_prose() {
    let (base_url, calls) = spawn_upstream(
        StatusCode::OK,
        text_reply("Here are results:\n[{\"title\":\"A\"}]\nEnjoy!"),
    )
    .await;
    let app = spawn_app(&base_url, None);

    let response = app
        .oneshot(search_request(r#"{"query":"gigs in Belleville"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(read_json(response).await, json!({"events": [{"title": "A"}]}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_search_without_array_returns_empty_events() {
    let (base_url, _) = spawn_upstream(StatusCode::OK, text_reply("No events found.")).await;
    let app = spawn_app(&base_url, None);

    let response = app.oneshot(search_request(r#"{"query":"gigs"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"events": []}));
}

#[tokio::test]
async fn test_search_rejects_bad_bodies_without_calling_upstream() {
    let (base_url, calls) = spawn_upstream(StatusCode::OK, text_reply("[]")).await;
    let app = spawn_app(&base_url, None);

    for (body, message) in [
        ("", "invalid JSON body"),
        ("{not json", "invalid JSON body"),
        ("{}", "query required"),
        (r#"{"query":""}"#, "query required"),
    ] {
        let response = app.clone().oneshot(search_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_cors(&response);
        assert_eq!(read_json(response).await, json!({"error": message}));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_failure_keeps_status_and_body() {
    let (base_url, _) = spawn_upstream(
        StatusCode::from_u16(529).unwrap(),
        "overloaded".to_string(),
    )
    .await;
    let app = spawn_app(&base_url, None);

    let response = app.oneshot(search_request(r#"{"query":"gigs"}"#)).await.unwrap();

    assert_eq!(response.status().as_u16(), 529);
    assert_cors(&response);
    assert_eq!(read_json(response).await, json!({"error": "overloaded"}));
}

#[tokio::test]
async fn test_malformed_array_is_500() {
    let (base_url, _) = spawn_upstream(StatusCode::OK, text_reply("[{\"title\":]")).await;
    let app = spawn_app(&base_url, None);

    let response = app.oneshot(search_request(r#"{"query":"gigs"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(read_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_unreachable_upstream_is_500() {
    let response = offline_app()
        .oneshot(search_request(r#"{"query":"gigs"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(read_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_repeated_search_is_identical() {
    let (base_url, _) = spawn_upstream(
        StatusCode::OK,
        text_reply("```json\n[{\"title\":\"A\",\"price\":0},{\"title\":\"B\",\"price\":null}]\n```"),
    )
    .await;
    let app = spawn_app(&base_url, None);

    let first = read_body(app.clone().oneshot(search_request(r#"{"query":"gigs"}"#)).await.unwrap()).await;
    let second = read_body(app.oneshot(search_request(r#"{"query":"gigs"}"#)).await.unwrap()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_preflight_on_any_path() {
    let app = offline_app();

    for uri in ["/api/search", "/anything/else", "/"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "uri {}", uri);
        assert_cors(&response);
        assert!(read_body(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = offline_app();

    for uri in ["/", "/health"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);

        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], api::SERVICE_NAME);
        assert_eq!(body["endpoints"], json!(["/api/search"]));
    }
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = offline_app();

    for request in [get("/nope"), get("/api/search")] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors(&response);
        assert_eq!(read_json(response).await, json!({"error": "not found"}));
    }
}

/// Frontend bundle in a temp directory, removed on drop even if a test panics.
struct FrontendBundle {
    dir: PathBuf,
}

impl FrontendBundle {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("event-search-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(dir.join("index.html"), "<!doctype html><div id=\"root\"></div>").unwrap();
        std::fs::write(dir.join("assets/app.js"), "console.log('app');").unwrap();
        Self { dir }
    }

    fn app(&self) -> Router {
        spawn_app("http://127.0.0.1:9", Some(self.dir.clone()))
    }
}

impl Drop for FrontendBundle {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

#[tokio::test]
async fn test_static_mode_serves_bundle_with_spa_fallback() {
    let bundle = FrontendBundle::new("spa");
    let app = bundle.app();

    let response = app.clone().oneshot(get("/assets/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(read_body(response).await, b"console.log('app');");

    for uri in ["/", "/events/this-week"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri {}", uri);
        assert_eq!(
            read_body(response).await,
            b"<!doctype html><div id=\"root\"></div>"
        );
    }

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(read_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_static_mode_rejects_other_methods_with_json_404() {
    let bundle = FrontendBundle::new("methods");
    let app = bundle.app();

    for method in ["POST", "PUT", "DELETE"] {
        let request = Request::builder()
            .method(method)
            .uri("/foo")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "method {}", method);
        assert_cors(&response);
        assert_eq!(read_json(response).await, json!({"error": "not found"}));
    }

    let request = Request::builder()
        .method("HEAD")
        .uri("/events/this-week")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_frontend_bundle_is_removed_on_drop() {
    let bundle = FrontendBundle::new("drop");
    let dir = bundle.dir.clone();
    assert!(dir.join("index.html").exists());

    drop(bundle);
    assert!(!dir.exists());
}
