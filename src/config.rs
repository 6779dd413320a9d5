use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub posts: PostConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes (default: 1MB)
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum idle connections in pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostConfig {
    /// Maximum number of posts accepted by one create request
    #[serde(default = "default_max_posts_per_batch")]
    pub max_posts_per_batch: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins (comma-separated, or "*" for any)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }
fn default_max_body_size() -> usize { 1024 * 1024 } // 1MB
fn default_max_connections() -> u32 { 100 }
fn default_min_connections() -> u32 { 10 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_posts_per_batch() -> usize { 1000 }
fn default_cors_origins() -> String { "*".to_string() }

fn env_or<T: std::str::FromStr>(key: &str, default: fn() -> T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| default_host()),
                port: env_or("PORT", default_port),
                max_body_size: env_or("MAX_BODY_SIZE", default_max_body_size),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .context("DATABASE_URL must be set")?,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", default_max_connections),
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", default_min_connections),
                connect_timeout_secs: env_or("DATABASE_CONNECT_TIMEOUT", default_connect_timeout),
                idle_timeout_secs: env_or("DATABASE_IDLE_TIMEOUT", default_idle_timeout),
            },
            posts: PostConfig {
                max_posts_per_batch: env_or("MAX_POSTS_PER_BATCH", default_max_posts_per_batch),
            },
            security: SecurityConfig {
                cors_origins: std::env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| default_cors_origins()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_defaults() {
        let server: ServerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 5000);

        let database: DatabaseConfig =
            serde_json::from_str(r#"{"url":"postgres://localhost/forum"}"#).unwrap();
        assert_eq!(database.max_connections, 100);
        assert_eq!(database.idle_timeout_secs, 600);

        let posts: PostConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(posts.max_posts_per_batch, 1000);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        std::env::set_var("FORUM_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_or("FORUM_TEST_BAD_PORT", default_port), 5000);
        std::env::remove_var("FORUM_TEST_BAD_PORT");
    }
}
