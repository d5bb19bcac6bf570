// src/config/mod.rs
// All tunables come from the environment; defaults keep a dev setup working.

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ZusConfig {
    // ── Completion Service Configuration
    pub openai_base_url: String,
    pub chat_model: String,
    pub chat_temperature: f32,

    // ── Embeddings Configuration
    pub embedding_model: String,
    pub embedding_dimensions: usize,

    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Vector Index Configuration
    pub qdrant_url: String,
    pub qdrant_collection: String,

    // ── Agent Configuration
    pub retrieval_k: usize,
    pub agent_max_iterations: usize,

    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Logging Configuration
    pub log_level: String,
}

/// Parse an env var, falling back to `default` when missing or unparsable.
/// Values may carry trailing comments and whitespace.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl ZusConfig {
    pub fn from_env() -> Self {
        Self {
            openai_base_url: env_var_or("OPENAI_BASE_URL", "https://api.openai.com/v1".to_string()),
            chat_model: env_var_or("ZUS_CHAT_MODEL", "gpt-4.1-mini".to_string()),
            chat_temperature: env_var_or("ZUS_CHAT_TEMPERATURE", 0.3),
            embedding_model: env_var_or("ZUS_EMBEDDING_MODEL", "text-embedding-3-small".to_string()),
            embedding_dimensions: env_var_or("ZUS_EMBEDDING_DIM", 1536),
            database_url: env_var_or("DATABASE_URL", "sqlite:./data/outlets.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            qdrant_url: env_var_or("QDRANT_URL", "http://localhost:6333".to_string()),
            qdrant_collection: env_var_or("QDRANT_COLLECTION", "zus-products".to_string()),
            retrieval_k: env_var_or("ZUS_RETRIEVAL_K", 3),
            agent_max_iterations: env_var_or("ZUS_AGENT_MAX_ITERATIONS", 3),
            host: env_var_or("ZUS_HOST", "0.0.0.0".to_string()),
            port: env_var_or("ZUS_PORT", 8000),
            log_level: env_var_or("ZUS_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub static CONFIG: Lazy<ZusConfig> = Lazy::new(ZusConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = ZusConfig::from_env();
        assert_eq!(config.retrieval_k, 3);
        assert_eq!(config.agent_max_iterations, 3);
        assert!(config.openai_base_url.starts_with("http"));
    }

    #[test]
    fn test_bind_address() {
        let config = ZusConfig::from_env();
        assert_eq!(config.bind_address(), format!("{}:{}", config.host, config.port));
    }
}
