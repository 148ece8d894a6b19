use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use explorer_core::DEFAULT_INTERVAL;
use serde::Deserialize;

use crate::error::{Result, WebError};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "explorer.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub events_path: PathBuf,
    pub static_dir: PathBuf,
    pub log_dir: PathBuf,
    pub carousel_interval: Duration,
}

impl Default for WebConfig {
    fn default() -> Self {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            events_path: manifest_dir.join("../data/events.json"),
            static_dir: manifest_dir.join("static"),
            log_dir: PathBuf::from("logs"),
            carousel_interval: DEFAULT_INTERVAL,
        }
    }
}

/// Optional `explorer.toml`; every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    events_path: Option<PathBuf>,
    static_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    carousel_interval_ms: Option<u64>,
}

impl WebConfig {
    /// Defaults, then the config file, then environment variables.
    /// CLI flags are applied on top by the caller.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => read_file_config(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                read_file_config(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => FileConfig::default(),
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = WebConfig::default();

        if let Some(host) = file.host {
            config.host = host;
        }
        if let Some(port) = file.port {
            config.port = port;
        }
        if let Some(path) = file.events_path {
            config.events_path = path;
        }
        if let Some(dir) = file.static_dir {
            config.static_dir = dir;
        }
        if let Some(dir) = file.log_dir {
            config.log_dir = dir;
        }
        if let Some(ms) = file.carousel_interval_ms {
            config.carousel_interval = interval_from_ms(ms)?;
        }

        if let Some(host) = env("HOST") {
            config.host = host;
        }
        if let Some(port) = env("PORT") {
            config.port = port
                .parse()
                .map_err(|_| WebError::Config(format!("PORT is not a valid port: {}", port)))?;
        }
        if let Some(path) = env("EVENTS_PATH") {
            config.events_path = PathBuf::from(path);
        }
        if let Some(dir) = env("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(ms) = env("CAROUSEL_INTERVAL_MS") {
            let ms = ms.parse().map_err(|_| {
                WebError::Config(format!("CAROUSEL_INTERVAL_MS is not a number: {}", ms))
            })?;
            config.carousel_interval = interval_from_ms(ms)?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        WebError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
    })?;
    Ok(toml::from_str(&content)?)
}

fn interval_from_ms(ms: u64) -> Result<Duration> {
    if ms == 0 {
        return Err(WebError::Config("carousel interval must be positive".to_string()));
    }
    Ok(Duration::from_millis(ms))
}
