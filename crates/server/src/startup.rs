use std::future::Future;

use axum::Router;
use configs::AppConfig;
use sea_orm::{DatabaseConnection, DbErr};
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// The two services built from this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Counter,
    Albums,
}

impl Service {
    pub fn name(self) -> &'static str {
        match self {
            Service::Counter => "counter",
            Service::Albums => "albums",
        }
    }

    /// Port used when neither `PORT` nor the config file sets one.
    pub fn default_port(self) -> u16 {
        match self {
            Service::Counter => 8080,
            Service::Albums => 8081,
        }
    }

    /// Create this service's table if it is missing.
    pub async fn ensure_schema(self, db: &DatabaseConnection) -> Result<(), DbErr> {
        match self {
            Service::Counter => migration::ensure_counter_schema(db).await,
            Service::Albums => migration::ensure_album_schema(db).await,
        }
    }

    pub fn router(self, state: AppState) -> Router {
        match self {
            Service::Counter => routes::build_counter_router(state),
            Service::Albums => routes::build_album_router(state),
        }
    }
}

/// Load configuration from the environment, then [`serve`] until Ctrl+C/SIGTERM.
pub async fn run(service: Service) -> Result<(), StartupError> {
    let cfg = AppConfig::load_and_validate(service.default_port())
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    serve(service, cfg, shutdown_signal()).await
}

/// Connect, ensure the schema, bind and serve until `shutdown` resolves.
pub async fn serve<F>(service: Service, cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = models::db::connect_with_config(&cfg.database).await?;
    service.ensure_schema(&db).await?;

    let app = service.router(AppState::new(db, cfg.server.max_upload_bytes));

    let addr = cfg
        .server
        .bind_addr()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!(service = service.name(), %addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve)?;
    info!(service = service.name(), "server drained");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(err = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(err = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "received shutdown signal, draining");
}

#[cfg(test)]
mod tests {
    use super::*;
    use configs::{DatabaseConfig, EnvOverrides};

    fn sqlite_cfg() -> AppConfig {
        let mut cfg = AppConfig::resolve(
            AppConfig::default(),
            EnvOverrides { dsn: Some("sqlite::memory:".into()), ..Default::default() },
            8080,
        )
        .expect("valid config");
        cfg.server.host = "127.0.0.1".into();
        // ephemeral
        cfg.server.port = Some(0);
        cfg.database = DatabaseConfig::sqlite_memory();
        cfg
    }

    #[test]
    fn default_ports_differ() {
        assert_eq!(Service::Counter.default_port(), 8080);
        assert_eq!(Service::Albums.default_port(), 8081);
    }

    #[tokio::test]
    async fn unreachable_database_is_fatal() {
        let mut cfg = sqlite_cfg();
        cfg.database.url = "sqlite:///nonexistent-dir/never.db?mode=ro".into();
        let err = serve(Service::Counter, cfg, async {}).await.unwrap_err();
        assert!(matches!(err, StartupError::Database(_)));
    }

    #[tokio::test]
    async fn serve_returns_after_shutdown() {
        for service in [Service::Counter, Service::Albums] {
            serve(service, sqlite_cfg(), async {}).await.expect("clean shutdown");
        }
    }
}
