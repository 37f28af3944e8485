mod announcements;
mod compliance;
mod config;
mod courses;
mod db;
mod errors;
mod models;
mod navigation;
mod profile;
mod reminders;
mod reports;
mod routes;
mod session;
mod state;
mod store;
mod uploads;
mod validation;

use anyhow::Result;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::{Config, StorageBackend};
use crate::db::create_pool;
use crate::models::profile::FacultyProfile;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{ComplianceStore, MemoryStore, PgStore};

/// Faculty id provisioned by the in-memory backend so the API is usable locally.
const DEMO_FACULTY_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compliance API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ComplianceStore> = match &config.storage {
        StorageBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            info!("Using PostgreSQL storage");
            Arc::new(PgStore::new(pool))
        }
        StorageBackend::Memory => {
            let store = MemoryStore::new();
            store.provision_profile(demo_profile()).await;
            info!("Using in-memory storage (demo faculty id {DEMO_FACULTY_ID})");
            Arc::new(store)
        }
    };

    let state = AppState::new(store);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn demo_profile() -> FacultyProfile {
    let now = Utc::now();
    FacultyProfile {
        id: DEMO_FACULTY_ID,
        email: "demo.faculty@example.edu".to_string(),
        full_name: "Demo Faculty".to_string(),
        institution_name: "Demo College".to_string(),
        years_experience: 5,
        profile_picture_url: None,
        research_publications: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}
