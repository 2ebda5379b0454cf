use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub media: MediaConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// JSON document holding the profile and entry collections.
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Filesystem root for uploaded files (certificates, photos).
    pub root: PathBuf,
    /// URL prefix under which media files are served.
    pub url: String,
    /// Filesystem root for static assets.
    pub static_root: PathBuf,
    /// URL prefix under which static assets are served.
    pub static_url: String,
    /// Extra directories searched for static assets missing from the
    /// static root.
    #[serde(default)]
    pub static_search_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Upper bound on one remote certificate download.
    pub timeout_secs: u64,
}

impl Config {
    /// Layered configuration: built-in defaults, then an optional
    /// `config/default.toml`, then `VITAE__`-prefixed environment
    /// variables (e.g. `VITAE__SERVER__PORT=8080`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("content.data_file", "data/cv.json")?
            .set_default("media.root", "media")?
            .set_default("media.url", "/media/")?
            .set_default("media.static_root", "static")?
            .set_default("media.static_url", "/static/")?
            .set_default("fetch.timeout_secs", 12)?;

        if std::path::Path::new("config/default.toml").exists() {
            builder = builder.add_source(config::File::with_name("config/default"));
        }

        builder = builder.add_source(config::Environment::with_prefix("VITAE").separator("__"));

        builder.build()?.try_deserialize()
    }
}
