use crate::error::DocsumError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default maximum chunk length in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 3000;

/// Default upload limit (20 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// docsum application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ollama API base URL
    pub ollama_base_url: String,

    /// LLM summarization model name
    pub llm_model: String,

    /// Timeout for a single generation request, in seconds
    pub llm_timeout_secs: u64,

    /// Maximum chunk length in characters
    pub max_chunk_chars: usize,

    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: "http://localhost:11434".to_string(),
            llm_model: "qwen2.5".to_string(),
            llm_timeout_secs: 300,
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, DocsumError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();
        let config = Self {
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_timeout_secs: Self::get_env_parsed("LLM_TIMEOUT_SECS")
                .unwrap_or(defaults.llm_timeout_secs),
            max_chunk_chars: Self::get_env_parsed("MAX_CHUNK_CHARS")
                .unwrap_or(defaults.max_chunk_chars),
            max_upload_bytes: Self::get_env_parsed("MAX_UPLOAD_BYTES")
                .unwrap_or(defaults.max_upload_bytes),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Parse an environment variable, ignoring values that do not parse
    fn get_env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
    }

    /// Ensure the log directory exists, create if not
    pub fn ensure_directories(&self) -> Result<(), DocsumError> {
        if !self.log_dir.exists() {
            std::fs::create_dir_all(&self.log_dir).map_err(|e| {
                DocsumError::config(format!(
                    "Failed to create directory {}: {}",
                    self.log_dir.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DocsumError> {
        if self.llm_model.trim().is_empty() {
            return Err(DocsumError::config("LLM model name cannot be empty"));
        }

        // Validate Ollama URL
        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://") {
            return Err(DocsumError::config(
                "Ollama base URL must start with http:// or https://"
            ));
        }

        if self.server_port == 0 {
            return Err(DocsumError::config("Server port cannot be 0"));
        }

        if self.max_chunk_chars == 0 {
            return Err(DocsumError::config("Maximum chunk length cannot be 0"));
        }

        Ok(())
    }
}
