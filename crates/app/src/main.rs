use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    if settings.logger.enabled {
        tracing_subscriber::fmt()
            .with_env_filter(format!(
                "billdone={level},server={level},engine={level},tower_http={level}",
                level = settings.logger.level
            ))
            .init();
    }

    let db = connect_database(&settings.database).await?;
    let store = engine::Store::builder().database(db).build().await?;

    let listener = tokio::net::TcpListener::bind(settings.address()).await?;
    let served = server::run_with_listener(store.clone(), listener, shutdown_signal()).await;

    if let Err(err) = store.close().await {
        tracing::error!("failed to close database: {err}");
    }
    served?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(config.url.as_str()).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("Database ready");
    Ok(database)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown requested");
}
