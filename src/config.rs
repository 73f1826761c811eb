use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub store_timeout: Duration,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"<redacted>")
            .field("store_timeout", &self.store_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn secs_from_env(key: &str, default: u64) -> Duration {
    Duration::from_secs(env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default))
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string()), // Use a secure secret in production
            store_timeout: secs_from_env("STORE_TIMEOUT_SECS", 10),
            request_timeout: secs_from_env("REQUEST_TIMEOUT_SECS", 30),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
