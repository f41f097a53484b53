use std::sync::Arc;

use connectors::{AssistClient, PhotoClient, WeatherService};
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

const DEFAULT_ASSIST_URL: &str =
    "https://generativelanguage.googleapis.com/v1/models/gemini-2.0-flash:generateContent";
const DEFAULT_PEXELS_URL: &str = "https://api.pexels.com/v1";
const DEFAULT_UNSPLASH_URL: &str = "https://api.unsplash.com";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "sahyaatra={level},server={level},engine={level},connectors={level}",
            level = settings.app.level
        ))
        .init();

    let http = reqwest::Client::new();
    let assist = {
        let assist = settings.assist.unwrap_or(settings::Assist {
            api_url: None,
            api_key: None,
        });
        AssistClient::new(
            http.clone(),
            assist
                .api_url
                .unwrap_or_else(|| DEFAULT_ASSIST_URL.to_string()),
            assist.api_key,
        )
    };
    let photos = {
        let photos = settings.photos.unwrap_or(settings::Photos {
            pexels_url: None,
            pexels_key: None,
            unsplash_url: None,
            unsplash_key: None,
        });
        PhotoClient::new(
            http.clone(),
            photos
                .pexels_url
                .unwrap_or_else(|| DEFAULT_PEXELS_URL.to_string()),
            photos.pexels_key,
            photos
                .unsplash_url
                .unwrap_or_else(|| DEFAULT_UNSPLASH_URL.to_string()),
            photos.unsplash_key,
        )
    };

    if let Some(server) = settings.server {
        tasks.spawn(async move {
            tracing::info!("Found server settings...");
            let db = match parse_database(&server.database).await {
                Ok(db) => db,
                Err(err) => {
                    tracing::error!("failed to initialize database: {err}");
                    return;
                }
            };

            let engine = match engine::Engine::builder()
                .database(db.clone())
                .build()
                .await
            {
                Ok(engine) => engine,
                Err(err) => {
                    tracing::error!("failed to build engine from database: {err}");
                    return;
                }
            };

            match engine.seed_states().await {
                Ok(0) => {}
                Ok(seeded) => tracing::info!("seeded {seeded} states"),
                Err(err) => {
                    tracing::error!("failed to seed the state catalog: {err}");
                    return;
                }
            }

            let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
            let addr = format!("{}:{}", bind, server.port);
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!("failed to bind server listener: {err}");
                    return;
                }
            };

            let state = server::ServerState {
                engine: Arc::new(engine),
                db,
                assist: Arc::new(assist),
                photos: Arc::new(photos),
                weather: Arc::new(WeatherService::new()),
            };
            if let Err(err) = server::run_with_listener(state, listener).await {
                tracing::error!("server failed: {err}");
            }
        });
    }

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
