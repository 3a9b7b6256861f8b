//! Citypass backend server
//!
//! CRUD backend for accounts, recreations, and restaurants over PostgreSQL,
//! with a two-tier cache-aside layer (process-local cache in front of a
//! shared Redis) wrapped around every store.

mod cache;
mod handlers;
mod httputil;
mod storage;
mod usecase;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use citypass_core::AppConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use cache::{CachedAccountRepository, CachedRecreationRepository, CachedRestaurantRepository};
use storage::{
    PgAccountRepository, PgRecreationRepository, PgRestaurantRepository, RedisCache, RemoteCache,
};
use usecase::{AccountUsecase, RecreationUsecase, RestaurantUsecase};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountUsecase>,
    pub recreations: Arc<RecreationUsecase>,
    pub restaurants: Arc<RestaurantUsecase>,
    pub access_token: Arc<String>,
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting citypass server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = AppConfig::load(&["files/etc/config"]).context("Failed to load configuration")?;
    info!(
        environment = %config.server.environment,
        port = config.server.port,
        "Configuration loaded"
    );

    let pool = storage::postgres::connect(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to initialize PostgreSQL")?;
    info!("PostgreSQL pool ready, schema ensured");

    let remote: Arc<dyn RemoteCache> = Arc::new(
        RedisCache::connect(
            &config.redis.host,
            config.redis.dial_timeout(),
            config.redis.command_timeout(),
        )
        .await
        .context("Failed to connect to Redis")?,
    );
    info!(host = %config.redis.host, "Redis connection manager ready");

    let db_timeout = config.server.db_timeout();
    let ttl = config.memory.default_expiration();
    let purge = config.memory.purge_interval();

    let accounts = Arc::new(AccountUsecase::new(Arc::new(CachedAccountRepository::new(
        Arc::new(PgAccountRepository::new(pool.clone(), db_timeout)),
        remote.clone(),
        ttl,
        purge,
    ))));
    let recreations = Arc::new(RecreationUsecase::new(Arc::new(
        CachedRecreationRepository::new(
            Arc::new(PgRecreationRepository::new(pool.clone(), db_timeout)),
            remote.clone(),
            ttl,
            purge,
        ),
    )));
    let restaurants = Arc::new(RestaurantUsecase::new(Arc::new(
        CachedRestaurantRepository::new(
            Arc::new(PgRestaurantRepository::new(pool, db_timeout)),
            remote,
            ttl,
            purge,
        ),
    )));
    info!("Repositories wired with the two-tier cache layer");

    let state = AppState {
        accounts,
        recreations,
        restaurants,
        access_token: Arc::new(config.auth.access_token),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", account_routes())
        .nest("/api", module_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account", post(handlers::account::create))
        .route(
            "/account/:account_id",
            get(handlers::account::get).put(handlers::account::update),
        )
        .route("/accounts", get(handlers::account::list))
}

fn module_routes() -> Router<AppState> {
    Router::new()
        .route("/recreation", post(handlers::recreation::create))
        .route("/recreation/city", post(handlers::recreation::by_city))
        .route(
            "/recreation/:recreation_id",
            get(handlers::recreation::get).delete(handlers::recreation::delete),
        )
        .route("/recreations", get(handlers::recreation::list))
        .route("/restaurant", post(handlers::restaurant::create))
        .route("/restaurant/city", post(handlers::restaurant::by_city))
        .route(
            "/restaurant/:restaurant_id",
            get(handlers::restaurant::get).delete(handlers::restaurant::delete),
        )
        .route("/restaurants", get(handlers::restaurant::list))
}
