//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::application::SeedAdminUseCase;
use auth::{AuthConfig, PgUserRepository, TokenService};
use payment::{PaymentConfig, PgPaymentRepository};
use platform::cors::CorsPolicy;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{AppServices, build_router};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,payment=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    if config.uses_default_secret() && config.environment.is_production() {
        tracing::warn!("JWT_SECRET is not set; using the built-in default in production");
    }

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let payments = Arc::new(PgPaymentRepository::new(pool));

    // Default admin on an empty database
    SeedAdminUseCase::new(users.clone()).execute().await?;

    let tokens = Arc::new(TokenService::new(&AuthConfig::new(config.jwt_secret.as_bytes())));

    let app = build_router(AppServices {
        users,
        payments,
        tokens,
        payment_config: Arc::new(PaymentConfig::new(config.total_tagihan)),
        cors: Arc::new(CorsPolicy::new(
            config.allowed_origins.clone(),
            config.environment,
        )),
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!(environment = %config.environment, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
