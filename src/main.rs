use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use megaphone_announcements::{
    build_app,
    config::Settings,
    repository::MegaphoneAnnouncementRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "megaphone_announcements=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!("Starting Megaphone Announcements on {}:{}", settings.server.host, settings.server.port);
    tracing::info!(
        "Reading announcements from {} database '{}' on '{}'",
        format!("{:?}", settings.database.driver).to_lowercase(),
        settings.database.database,
        settings.database.server
    );

    // Connections are opened per request; a store outage fails requests, not startup
    let announcement_repo = Arc::new(MegaphoneAnnouncementRepository::connect(&settings.database)?);

    let app = build_app(announcement_repo, &settings)?;

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
