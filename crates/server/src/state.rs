use sea_orm::DatabaseConnection;

/// Everything a handler may touch. Built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Upper bound for a whole request body; only the album upload route needs more than axum's 2 MiB default.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(db: DatabaseConnection, max_upload_bytes: usize) -> Self {
        Self { db, max_upload_bytes }
    }
}
