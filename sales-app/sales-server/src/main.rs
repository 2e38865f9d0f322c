use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, warn};

use sales_api::{build_router, AppState};
use sales_infrastructure::{create_pool, run_migrations};
use sales_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Configuration first: it decides where logs go
    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = sales_shared::telemetry::init_telemetry(&config.logging);

    info!("{} starting ({})", config.app.name, config.app.env);

    // Connect to Database
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database connection established.");

    if config.database.run_migrations {
        run_migrations(&pool).await.context("Failed to run migrations")?;
    }

    let host: std::net::IpAddr = config.app.host.parse().context("Invalid app.host")?;
    let addr = SocketAddr::from((host, config.app.port));

    let state = AppState::new(pool, config).context("Failed to initialise services")?;
    bootstrap_super_admin(&state).await?;

    let app = build_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the first super admin from `bootstrap.*` when both values are set.
async fn bootstrap_super_admin(state: &AppState) -> anyhow::Result<()> {
    let bootstrap = &state.config.bootstrap;
    match (&bootstrap.super_admin_email, &bootstrap.super_admin_password) {
        (Some(email), Some(password)) => {
            let created = state
                .auth
                .bootstrap_super_admin(email, password)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to bootstrap super admin: {}", e))?;
            if !created {
                info!("Super admin already present, bootstrap skipped");
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("bootstrap.super_admin_email and bootstrap.super_admin_password must both be set");
        }
        (None, None) => {}
    }
    Ok(())
}
