use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use std::sync::Arc;

use error::Result;
use settings::{Database, Settings};

mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitledger={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect(&settings.server.database).await?;
    let engine = Arc::new(engine::Engine::builder().database(db).build().await?);
    let state = server::ServerState {
        engine: Arc::clone(&engine),
        identity: Arc::new(server::TrustedHeader),
    };

    let addr = settings.server.addr();
    if let Err(err) = server::run(state, &addr).await {
        tracing::error!("server failed: {err}");
        return Err(err.into());
    }

    match Arc::try_unwrap(engine) {
        Ok(engine) => {
            tracing::info!("server stopped, closing database");
            engine.shutdown().await?;
        }
        Err(_) => tracing::warn!("engine still in use after shutdown, skipping close"),
    }
    Ok(())
}

async fn connect(config: &Database) -> Result<DatabaseConnection> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("database ready");
    Ok(database)
}
