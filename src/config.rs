use crate::error::{BibleError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root of the data bundle
    pub dir: PathBuf,
    /// Keep parsed per-book files in memory
    pub cache: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            cache: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling JSON log; file logging is off when unset
    pub dir: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            filter: "bijbel_api=info,tower_http=info".to_string(),
        }
    }
}

impl Config {
    /// Load `path` if given, else `config.toml` when present, else defaults;
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BibleError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `BIJBEL_DATA_DIR`, `BIJBEL_PORT` and `BIJBEL_CACHE` override the file
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var("BIJBEL_DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        if let Some(port) = var("BIJBEL_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| BibleError::Config(format!("BIJBEL_PORT is not a port: '{}'", port)))?;
        }
        if let Some(cache) = var("BIJBEL_CACHE") {
            self.data.cache = match cache.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(BibleError::Config(format!(
                        "BIJBEL_CACHE must be true or false, got '{}'",
                        cache
                    )))
                }
            };
        }
        Ok(())
    }
}
