// src/main.rs

use std::{net::SocketAddr, sync::Arc, time::Duration};

use dotenvy::dotenv;
use impact_backend::{
    config::Config,
    integrations::{LeadMirror, Mailer, NotionMirror, ResendMailer},
    routes,
    state::AppState,
    store::{LeadStore, MemoryStore, PgStore, ProfileStore},
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let (profiles, leads): (Arc<dyn ProfileStore>, Arc<dyn LeadStore>) =
        match &config.database_url {
            Some(url) => {
                let store = Arc::new(PgStore::new(connect(url).await));
                (store.clone() as Arc<dyn ProfileStore>, store as Arc<dyn LeadStore>)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory storage");
                let store = Arc::new(MemoryStore::new());
                (store.clone() as Arc<dyn ProfileStore>, store as Arc<dyn LeadStore>)
            }
        };

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to build HTTP client");

    let mailer = config.resend.clone().map(|resend| {
        tracing::info!("Welcome emails enabled via Resend");
        Arc::new(ResendMailer::new(http.clone(), resend)) as Arc<dyn Mailer>
    });
    let mirror = config.notion.clone().map(|notion| {
        tracing::info!("Lead mirroring enabled via Notion");
        Arc::new(NotionMirror::new(http.clone(), notion)) as Arc<dyn LeadMirror>
    });

    let state = AppState {
        profiles,
        leads,
        mailer,
        mirror,
        config: config.clone(),
    };

    let app = routes::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    axum::serve(listener, app).await.expect("Server error");
}

/// Connects with retry, then applies the embedded migrations.
async fn connect(database_url: &str) -> PgPool {
    let mut retry_count = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to connect to database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };
    tracing::info!("Database connected...");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    pool
}
