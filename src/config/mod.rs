use serde::Deserialize;

pub const DEFAULT_SESSION_SECRET: &str = "development-secret-change-in-production";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Comma-separated origins allowed to make credentialed cross-origin calls
    #[serde(default)]
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_env() -> String {
    "development".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    10
}

fn default_ttl_hours() -> i64 {
    24 * 7
}

fn default_cookie_name() -> String {
    "connecthub_session".to_string()
}

fn default_upload_dir() -> String {
    "static/profile_pics".to_string()
}

fn default_max_bytes() -> usize {
    5 * 1024 * 1024
}

impl Config {
    /// Load configuration from the environment (`SECTION__KEY`), falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let builder = config::Config::builder().add_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        );

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let config = builder
            .set_default("app.env", default_env())?
            .set_default("app.host", default_host())?
            .set_default("app.port", 8080)?
            .set_default("database.url", "postgres://localhost/connecthub")?
            .set_default("database.max_connections", 10)?
            .set_default("session.secret", DEFAULT_SESSION_SECRET)?
            .set_default("uploads.dir", default_upload_dir())?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }

    pub fn allowed_origins(&self) -> Vec<&str> {
        self.app
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}
