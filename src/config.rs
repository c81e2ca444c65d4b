use std::net::IpAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub save_dir: PathBuf,
    pub max_body_size: usize,
    pub cors_origin: HeaderValue,
    pub on_collision: CollisionPolicy,
    pub trusted_proxies: Vec<IpNet>,
    pub log_level: String,
}

/// What to do when a derived record filename already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Replace the existing file.
    Overwrite,
    /// Append `_2`, `_3`, ... until an unused name is found.
    Suffix,
}

impl CollisionPolicy {
    fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "suffix" => Ok(CollisionPolicy::Suffix),
            other => Err(format!(
                "Invalid INTAKE_ON_COLLISION '{other}': expected 'overwrite' or 'suffix'"
            )),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("INTAKE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_HOST: {e}"))?;

        let port: u16 = env_or("INTAKE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_PORT: {e}"))?;

        let save_dir = PathBuf::from(env_or("INTAKE_SAVE_DIR", "applications_data"));

        let max_body_size: usize = env_or("INTAKE_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_MAX_BODY_SIZE: {e}"))?;

        let cors_origin = HeaderValue::from_str(&env_or("INTAKE_CORS_ORIGIN", "*"))
            .map_err(|e| format!("Invalid INTAKE_CORS_ORIGIN: {e}"))?;

        let on_collision = CollisionPolicy::parse(&env_or("INTAKE_ON_COLLISION", "overwrite"))?;

        let trusted_proxies = parse_proxies(&env_or("INTAKE_TRUSTED_PROXIES", ""))?;

        let log_level = env_or("INTAKE_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            save_dir,
            max_body_size,
            cors_origin,
            on_collision,
            trusted_proxies,
            log_level,
        })
    }

    /// Defaults with the given save directory. Used by tests and embedders.
    pub fn with_save_dir(save_dir: impl Into<PathBuf>) -> Self {
        Config {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            save_dir: save_dir.into(),
            max_body_size: 1_048_576,
            cors_origin: HeaderValue::from_static("*"),
            on_collision: CollisionPolicy::Overwrite,
            trusted_proxies: vec![],
            log_level: "info".to_string(),
        }
    }
}

fn parse_proxies(raw: &str) -> Result<Vec<IpNet>, String> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|e| format!("Invalid INTAKE_TRUSTED_PROXIES entry '{s}': {e}"))
        })
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
