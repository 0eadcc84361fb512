use std::path::PathBuf;
use anyhow::{Context, Result};
use dotenvy::dotenv;

pub const DEFAULT_HEADER_ROW: usize = 7;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_file_size: usize,
    /// Zero-based sheet row holding the column headers.
    pub header_row: usize,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_file_size: default_max_file_size(),
            header_row: DEFAULT_HEADER_ROW,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let defaults = Config::default();

        Ok(Config {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT")?.unwrap_or(defaults.port),
            max_file_size: env_parse("MAX_FILE_SIZE")?.unwrap_or(defaults.max_file_size),
            header_row: env_parse("HEADER_ROW")?.unwrap_or(defaults.header_row),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        })
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Failed to parse {}={:?}", key, raw)),
        Err(_) => Ok(None),
    }
}

pub fn load_config() -> Result<Config> {
    let config = Config::new()?;
    tracing::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
