use crate::test_app;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{Pool, Sqlite};
use test_log::test;
use tower::Service;


async fn get(app: &mut Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .expect("Failed to build request");
    app.as_service()
        .call(request)
        .await
        .expect("Failed to execute request")
}

async fn post_json(app: &mut Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");
    app.as_service()
        .call(request)
        .await
        .expect("Failed to execute request")
}

/// note that this consumes the response, so the status must be checked first
async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Failed to parse response body as json")
}

#[test(sqlx::test(migrations = "../db/migrations/"))]
async fn test_api_root(pool: Pool<Sqlite>) {
    let mut app = test_app(pool);
    let response = get(&mut app, "/api/").await;
    assert_eq!(response.status(), StatusCode::OK);
}
