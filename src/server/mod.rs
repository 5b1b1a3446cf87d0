//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::email::{EmailService, SmtpEmailProvider};
use crate::jwt::JwtManager;
use crate::repository::{
    cart::CartRepositoryImpl, menu::MenuRepositoryImpl, payment::PaymentRepositoryImpl,
    review::ReviewRepositoryImpl, user::UserRepositoryImpl,
};
use crate::stripe::StripeClient;
use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, post},
    Router,
};
use mongodb::bson::doc;
use mongodb::{Client, Database};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub menu: Arc<MenuRepositoryImpl>,
    pub reviews: Arc<ReviewRepositoryImpl>,
    pub carts: Arc<CartRepositoryImpl>,
    pub users: Arc<UserRepositoryImpl>,
    pub payments: Arc<PaymentRepositoryImpl>,
    pub jwt_manager: JwtManager,
    pub stripe_client: StripeClient,
    pub email_service: Arc<EmailService>,
}

/// Run the HTTP server until shutdown
pub async fn run(config: Config) -> Result<()> {
    // Connect the store client and fail fast on a bad cluster
    let client = Client::with_uri_str(config.database.connection_uri())
        .await
        .context("Failed to create document store client")?;
    let db = client.database(&config.database.name);
    db.run_command(doc! { "ping": 1 })
        .await
        .context("Document store ping failed")?;
    info!("Connected to document store '{}'", config.database.name);

    let email_provider = SmtpEmailProvider::from_config(&config.smtp)
        .map_err(|e| anyhow::anyhow!("Failed to build SMTP transport: {}", e))?;

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

    let app = build_router(state);

    let addr = config.http.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server started on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    // CORS configuration: permissive for all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness and health
        .route("/", get(api::health::live))
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready))
        // Token issuance
        .route("/jwt", post(api::auth::issue_token))
        // Menu
        .route("/menu", get(api::menu::list).post(api::menu::create))
        .route(
            "/menu/{id}",
            get(api::menu::get)
                .patch(api::menu::update)
                .delete(api::menu::remove),
        )
        // Reviews
        .route("/reviews", get(api::reviews::list))
        // Carts
        .route("/carts", get(api::cart::list).post(api::cart::create))
        .route("/carts/{id}", delete(api::cart::remove))
        // Users; the admin subpath doubles as role grant (PATCH by id)
        // and role query (GET by email)
        .route("/users", get(api::user::list).post(api::user::create))
        .route("/users/{id}", delete(api::user::remove))
        .route(
            "/users/admin/{id}",
            get(api::user::admin_status).patch(api::user::grant_admin),
        )
        // Payments
        .route("/create-payment-intent", post(api::payment::create_intent))
        .route("/payments", post(api::payment::record))
        .route("/payments/{email}", get(api::payment::list_by_email))
        // Stats
        .route("/user-stats/{email}", get(api::stats::user_stats))
        .route("/admin-stats", get(api::stats::admin_stats))
        .route("/order-stats", get(api::stats::order_stats))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Resolve when the process receives SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
