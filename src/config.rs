use crate::error::{ChatError, Result};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP/WebSocket server configuration
    pub server: ServerConfig,
    /// Upload storage configuration
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (default: 3000)
    pub port: u16,
    /// Host to bind to (default: 0.0.0.0, all interfaces)
    pub host: String,
    /// Maximum upload request body size in megabytes
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory where uploaded files are persisted
    pub upload_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                port: get_env_or("PORT", "3000").parse().map_err(|_| {
                    ChatError::InvalidConfig("PORT must be a valid port number".into())
                })?,
                host: get_env_or("HOST", "0.0.0.0"),
                max_upload_mb: get_env_or("MAX_UPLOAD_MB", "100").parse().map_err(|_| {
                    ChatError::InvalidConfig("MAX_UPLOAD_MB must be a valid number".into())
                })?,
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from(get_env_or("UPLOAD_DIR", "uploads")),
            },
        })
    }

    /// Get the server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    /// Maximum upload request body size in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
