use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Environment variable carrying the database DSN. Required.
pub const DSN_ENV: &str = "DB_DSN";
/// Environment variable overriding the listener port.
pub const PORT_ENV: &str = "PORT";
/// Worker thread count used when the config file does not set one.
pub const WORKER_THREADS_ENV: &str = "TOKIO_WORKER_THREADS";
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Resolved from `PORT`, then the file, then the service default.
    #[serde(default)]
    pub port: Option<u16>,
    /// File value, then `TOKIO_WORKER_THREADS`, then 4.
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            worker_threads: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Only ever filled from `DB_DSN`.
    #[serde(skip)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_max_upload_bytes() -> usize { 32 * 1024 * 1024 }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Values taken from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub dsn: Option<String>,
    pub port: Option<String>,
    pub worker_threads: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            dsn: non_empty_var(DSN_ENV),
            port: non_empty_var(PORT_ENV),
            worker_threads: non_empty_var(WORKER_THREADS_ENV),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (defaults when the file is missing), apply `DB_DSN`/`PORT`
    /// and validate. `default_port` is used when neither source names a port.
    pub fn load_and_validate(default_port: u16) -> Result<Self> {
        let path = config_path();
        let base = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("cannot load {path}: {e}"))?
        } else {
            AppConfig::default()
        };
        Self::resolve(base, EnvOverrides::from_env(), default_port)
    }

    pub fn resolve(mut cfg: AppConfig, env: EnvOverrides, default_port: u16) -> Result<Self> {
        cfg.database.url = env
            .dsn
            .ok_or_else(|| anyhow!("{DSN_ENV} environment variable not set"))?;
        if let Some(p) = env.port {
            let port = p
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("invalid {PORT_ENV} value {p:?}: {e}"))?;
            cfg.server.port = Some(port);
        }
        cfg.server.port.get_or_insert(default_port);
        if cfg.server.worker_threads.is_none() {
            if let Some(w) = env.worker_threads {
                let threads = w
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| anyhow!("invalid {WORKER_THREADS_ENV} value {w:?}: {e}"))?;
                cfg.server.worker_threads = Some(threads);
            }
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == Some(0) {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
            Some(_) => {}
        }
        if self.max_upload_bytes == 0 {
            return Err(anyhow!("server.max_upload_bytes must be > 0"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let port = self.port.ok_or_else(|| anyhow!("server.port not resolved"))?;
        Ok(format!("{}:{}", self.host, port).parse()?)
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database url is empty; set {DSN_ENV}"));
        }
        let lower = self.url.to_lowercase();
        let known = ["postgresql://", "postgres://", "mysql://", "sqlite:"];
        if !known.iter().any(|scheme| lower.starts_with(scheme)) {
            return Err(anyhow!(
                "{DSN_ENV} must start with one of postgres://, postgresql://, mysql://, sqlite:"
            ));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration { Duration::from_secs(self.connect_timeout_secs) }
    pub fn idle_timeout(&self) -> Duration { Duration::from_secs(self.idle_timeout_secs) }
    pub fn max_lifetime(&self) -> Duration { Duration::from_secs(self.max_lifetime_secs) }
    pub fn acquire_timeout(&self) -> Duration { Duration::from_secs(self.acquire_timeout_secs) }

    /// Single-connection in-memory SQLite, used by tests.
    pub fn sqlite_memory() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            ..Self::default()
        }
    }
}
