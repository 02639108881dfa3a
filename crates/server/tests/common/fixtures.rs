//! Request bodies and helpers shared by the API tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tfreg_core::config::AuthConfig;
use tfreg_server::SECRET_KEY_HEADER;
use tower::ServiceExt;

/// The secret configured by `AppConfig::for_testing`.
#[allow(dead_code)]
pub fn test_secret() -> String {
    AuthConfig::for_testing().secret_key
}

/// Publish body for aws 5.1.0 on linux/amd64 with the given shasum.
#[allow(dead_code)]
pub fn aws_5_1_0(shasum: &str) -> Value {
    json!({
        "version": "5.1.0",
        "protocols": ["5.0"],
        "platforms": [{
            "os": "linux",
            "arch": "amd64",
            "filename": "aws_5.1.0_linux_amd64.zip",
            "download_url": "https://x/aws.zip",
            "shasum": shasum
        }]
    })
}

/// Send a request and decode the response body as JSON (Null when empty).
#[allow(dead_code)]
pub async fn send(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Body>,
    secret: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(secret) = secret {
        builder = builder.header(SECRET_KEY_HEADER, secret);
    }
    if body.is_some() {
        builder = builder.header("Content-Type", "application/json");
    }

    let request = builder.body(body.unwrap_or_else(Body::empty)).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

#[allow(dead_code)]
pub async fn get(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, None, None).await
}

/// PUT a JSON body with the configured secret.
#[allow(dead_code)]
pub async fn publish(router: &axum::Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let secret = test_secret();
    send(
        router,
        "PUT",
        uri,
        Some(Body::from(serde_json::to_vec(body).unwrap())),
        Some(&secret),
    )
    .await
}
