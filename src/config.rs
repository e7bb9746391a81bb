use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use crate::error::{AppError, Result};

const DEFAULT_RECIPE_API_URL: &str = "https://forkify-api.herokuapp.com/api";

/// Settings for the laptop catalog server.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub server_addr: SocketAddr,
    pub data_path: PathBuf,
    pub templates_dir: PathBuf,
}

impl CatalogConfig {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env_or("HOST", "127.0.0.1");
        let port = env_or("PORT", "1337");

        Ok(CatalogConfig {
            server_addr: server_addr(&host, &port)?,
            data_path: PathBuf::from(env_or("CATALOG_DATA", "data/data.json")),
            templates_dir: PathBuf::from(env_or("TEMPLATES_DIR", "templates")),
        })
    }
}

/// Settings for the recipe app front end.
#[derive(Clone, Debug)]
pub struct RecipeConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub likes_dir: PathBuf,
}

impl RecipeConfig {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let api_url = env_or("RECIPE_API_URL", DEFAULT_RECIPE_API_URL);
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(AppError::ConfigError(format!(
                "RECIPE_API_URL must be an http(s) URL, got {}",
                api_url
            )));
        }

        let api_key = match env::var("RECIPE_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Some(key),
            Ok(_) | Err(env::VarError::NotPresent) => None,
            Err(e) => return Err(e.into()),
        };

        Ok(RecipeConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            likes_dir: PathBuf::from(env_or("LIKES_DIR", ".storage")),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn server_addr(host: &str, port: &str) -> Result<SocketAddr> {
    let port = port
        .parse::<u16>()
        .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
    let ip = IpAddr::from_str(host)
        .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

    Ok(SocketAddr::new(ip, port))
}
