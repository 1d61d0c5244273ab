use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid database config: {0}")]
    Config(String),
    #[error("failed to open database: {0}")]
    Connect(String),
    #[error("failed to reach database: {0}")]
    Ping(String),
}
