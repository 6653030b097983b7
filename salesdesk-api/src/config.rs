use config::{Config, ConfigError, File};
use lead_matching::MatchOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 8080

[cors]
allowed_origins = ["http://localhost:3000"]

[database]
# Defaults to the platform data directory
# path = "/var/lib/salesdesk/salesdesk.db"

[matching]
min_score = 60
max_results = 10
"#;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: Option<ServerConfig>,
    pub cors: Option<CorsConfig>,
    pub database: Option<DatabaseConfig>,
    pub matching: Option<MatchingConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: Some(ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            }),
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            database: None,
            matching: Some(MatchingConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

/// Overrides for the match finder's threshold and result cap
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MatchingConfig {
    pub min_score: Option<u8>,
    pub max_results: Option<usize>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let defaults = MatchOptions::default();
        Self {
            min_score: Some(defaults.min_score),
            max_results: Some(defaults.max_results),
        }
    }
}

impl ApiConfig {
    /// Read the config file, writing the default one first if it is missing.
    /// `path` overrides the platform config location.
    pub fn load(path: Option<PathBuf>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.unwrap_or_else(get_config_path);

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn match_options(&self) -> Result<MatchOptions, ConfigError> {
        let defaults = MatchOptions::default();
        let matching = self.matching.clone().unwrap_or_default();

        let options = MatchOptions {
            min_score: matching.min_score.unwrap_or(defaults.min_score),
            max_results: matching.max_results.unwrap_or(defaults.max_results),
        };
        if options.min_score > 100 {
            return Err(ConfigError::Message(format!(
                "matching.min_score must be at most 100, got {}",
                options.min_score
            )));
        }

        Ok(options)
    }

    pub fn database_path(&self) -> Option<PathBuf> {
        self.database.as_ref().and_then(|d| d.path.clone())
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("salesdesk").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
