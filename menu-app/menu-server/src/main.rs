use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use menu_api::{build_router, AppState};
use menu_core::ports::{AssetHost, IdentityProvider};
use menu_core::repositories::{DraftRepository, UserRepository};
use menu_infrastructure::{
    create_pool, run_migrations, CloudinaryAssetHost, GoogleIdentityProvider,
    MemoryDraftRepository, MemoryUserRepository, PgDraftRepository, PgUserRepository,
};
use menu_shared::config::{AppConfig, DatabaseBackend};
use menu_shared::telemetry::init_telemetry;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry; the guard flushes file output on shutdown
    let _log_guard = init_telemetry(&config.log)?;

    info!("Menu server starting ({})...", config.app.env);

    // Stores
    let (db, drafts, users): (_, Arc<dyn DraftRepository>, Arc<dyn UserRepository>) =
        match config.database.backend {
            DatabaseBackend::Postgres => {
                info!("Connecting to database...");
                let pool = create_pool(&config.database)
                    .await
                    .context("Failed to connect to database")?;
                if config.database.run_migrations {
                    run_migrations(&pool).await?;
                }
                info!("Database connection established.");
                (
                    Some(pool.clone()),
                    Arc::new(PgDraftRepository::new(pool.clone())),
                    Arc::new(PgUserRepository::new(pool)),
                )
            }
            DatabaseBackend::Memory => {
                warn!("Using in-memory stores; nothing survives a restart");
                (
                    None,
                    Arc::new(MemoryDraftRepository::new()),
                    Arc::new(MemoryUserRepository::new()),
                )
            }
        };

    // External adapters
    let assets: Arc<dyn AssetHost> = Arc::new(CloudinaryAssetHost::new(&config.assets)?);
    let identity: Option<Arc<dyn IdentityProvider>> = match &config.oauth.google {
        Some(google) => Some(Arc::new(GoogleIdentityProvider::new(google)?)),
        None => {
            info!("Google sign-in not configured");
            None
        }
    };

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let state = AppState::new(config, db, drafts, users, assets, identity);
    let app = build_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
