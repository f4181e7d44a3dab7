use std::{env, path::PathBuf, time::Duration};

const DEV_JWT_SECRET: &str = "reform-local-session";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub checkout_delay: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/local"));
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };
        let checkout_delay = match env::var("CHECKOUT_DELAY_MS") {
            Ok(raw) => Duration::from_millis(raw.parse::<u64>().map_err(|e| {
                anyhow::anyhow!("CHECKOUT_DELAY_MS must be a number of milliseconds: {e}")
            })?),
            Err(_) => Duration::from_millis(2000),
        };
        Ok(Self {
            host,
            port,
            data_dir,
            jwt_secret,
            checkout_delay,
        })
    }

    /// Loopback config over `data_dir` with no checkout delay.
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            data_dir: data_dir.into(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            checkout_delay: Duration::ZERO,
        }
    }
}
