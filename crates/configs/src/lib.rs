use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// How concurrent mutations of one collection are ordered.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// One read-modify-write cycle at a time per collection.
    #[default]
    Serialized,
    /// No gate; concurrent cycles may overwrite each other.
    LastWriterWins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_products_file")]
    pub products_file: String,
    #[serde(default = "default_carts_file")]
    pub carts_file: String,
    #[serde(default)]
    pub write_mode: WriteMode,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            products_file: default_products_file(),
            carts_file: default_carts_file(),
            write_mode: WriteMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogConfig {
    /// Upper bound on the number of products a single list call returns.
    #[serde(default)]
    pub max_list_limit: Option<usize>,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_products_file() -> String { "products.json".into() }
fn default_carts_file() -> String { "carts.json".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
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
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config built from `SERVER_HOST`, `SERVER_PORT`, `DATA_DIR` and
    /// `TOKIO_WORKER_THREADS`, used when no config file is present.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(dir) = std::env::var("DATA_DIR") {
            cfg.storage.data_dir = PathBuf::from(dir);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_dir is empty"));
        }
        if self.products_file.trim().is_empty() || self.carts_file.trim().is_empty() {
            return Err(anyhow!("storage.products_file and storage.carts_file must be set"));
        }
        if self.products_file == self.carts_file {
            return Err(anyhow!("products and carts cannot share one file"));
        }
        Ok(())
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn carts_path(&self) -> PathBuf {
        self.data_dir.join(&self.carts_file)
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_list_limit == Some(0) {
            return Err(anyhow!("catalog.max_list_limit must be >= 1 when set"));
        }
        Ok(())
    }
}
