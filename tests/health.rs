mod common;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use reform_storefront::routes::{create_app, health::health_check};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.service, "reform-storefront");
}

#[tokio::test]
async fn router_serves_health_and_unknown_paths() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let app = create_app(state);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let response = app
        .oneshot(Request::builder().uri("/nowhere").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn login_token_opens_protected_routes() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let app = create_app(state);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/orders").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let login = serde_json::json!({
        "email": "test@example.com",
        "password": "anything",
        "role": "customer",
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(login.to_string()))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(body["data"]["user"]["name"], "Test User");
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/orders")
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(body["meta"]["total"], 3);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/orders/ORD-1735123456789/invoice")
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("ReForm_Invoice_ORD-1735123456789.txt"));
    Ok(())
}

#[tokio::test]
async fn catalog_search_is_public() -> anyhow::Result<()> {
    let (_dir, state) = common::seeded_state().await?;
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products?category=Tech%20Waste&sort_by=price_low&per_page=2")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["data"]["items"][0]["id"], "tw-001");
    assert_eq!(body["data"]["items"][1]["id"], "tw-003");
    Ok(())
}
