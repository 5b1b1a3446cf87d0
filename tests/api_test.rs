//! Route-level tests for the public API surface
//!
//! These drive the real router with `tower::ServiceExt::oneshot`. The
//! document store client connects lazily, so everything that short-circuits
//! before a store operation (liveness, token issuance, the 401/403 gates)
//! is exercised end to end without a running cluster.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bistro_core::config::{
    Config, DatabaseConfig, HttpConfig, JwtConfig, SmtpConfig, StripeConfig,
};
use bistro_core::email::{EmailService, SmtpEmailProvider};
use bistro_core::jwt::JwtManager;
use bistro_core::repository::{
    cart::CartRepositoryImpl, menu::MenuRepositoryImpl, payment::PaymentRepositoryImpl,
    review::ReviewRepositoryImpl, user::UserRepositoryImpl,
};
use bistro_core::server::{build_router, AppState};
use bistro_core::stripe::StripeClient;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        http: HttpConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            user: "test".to_string(),
            password: "test".to_string(),
            cluster: "localhost".to_string(),
            name: "bistro-test".to_string(),
        },
        jwt: JwtConfig {
            secret: "route-test-secret".to_string(),
            issuer: "bistro-core".to_string(),
            ttl_secs: 3600,
        },
        stripe: StripeConfig {
            secret_key: "sk_test_123".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        },
        smtp: SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            use_tls: false,
            from_email: "orders@bistro.example".to_string(),
            from_name: None,
        },
    }
}

async fn test_app() -> Router {
    let config = test_config();

    // The driver resolves and connects on first operation, never here
    let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
        .await
        .expect("client construction is offline");
    let db = client.database(&config.database.name);

    let email_provider =
        SmtpEmailProvider::from_config(&config.smtp).expect("smtp transport builds offline");

    let state = AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        menu: Arc::new(MenuRepositoryImpl::new(&db)),
        reviews: Arc::new(ReviewRepositoryImpl::new(&db)),
        carts: Arc::new(CartRepositoryImpl::new(&db)),
        users: Arc::new(UserRepositoryImpl::new(&db)),
        payments: Arc::new(PaymentRepositoryImpl::new(&db)),
        jwt_manager: JwtManager::new(config.jwt.clone()),
        stripe_client: StripeClient::new(config.stripe.clone()),
        email_service: Arc::new(EmailService::new(Arc::new(email_provider))),
    };

    build_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn issue_token(app: &Router, email: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/jwt")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!(r#"{{"email":"{}"}}"#, email)))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_root_liveness() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"bistro server running");
}

#[tokio::test]
async fn test_health_reports_version() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_jwt_issuance_returns_token() {
    let app = test_app().await;
    let token = issue_token(&app, "diner@example.com").await;

    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_gated_route_without_token_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "access-unauthorized");
}

#[tokio::test]
async fn test_gated_route_with_garbage_token_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin-stats")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "access-unauthorized");
}

#[tokio::test]
async fn test_admin_gated_route_with_invalid_token_prefers_401() {
    // Token invalidity must win over the role check
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/order-stats")
                .header(header::AUTHORIZATION, "Bearer expired.or.garbage")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_bearer_scheme_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_status_for_other_identity_is_forbidden() {
    let app = test_app().await;
    let token = issue_token(&app, "diner@example.com").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/admin/other@example.com")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "access-forbidden");
}

#[tokio::test]
async fn test_payments_for_other_identity_is_forbidden() {
    let app = test_app().await;
    let token = issue_token(&app, "diner@example.com").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/payments/other@example.com")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_stats_for_other_identity_is_forbidden() {
    let app = test_app().await;
    let token = issue_token(&app, "diner@example.com").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/user-stats/other@example.com")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "access-forbidden");
}

#[tokio::test]
async fn test_cart_listing_requires_email_parameter() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/carts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_menu_id_is_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/menu/not-a-hex-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
