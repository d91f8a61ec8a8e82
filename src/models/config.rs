use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Configuration options for the category media service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// SQLite database file (or `:memory:`).
    pub database_url: String,
    /// Directory holding uploaded images and their thumbnails.
    pub upload_dir: String,
}

impl ServerConfig {
    /// Loads `config/default.yaml`, then `config/local.yaml`, then `APP__*`
    /// environment variables, each layer overriding the previous one.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "app.db")?
            .set_default("upload_dir", "uploads")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
