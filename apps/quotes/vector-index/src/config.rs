//! Configuration for the vector index server

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_vector_index::IndexConfig;
use std::time::Duration;

pub use core_config::Environment;

const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub index: IndexConfig,
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let shutdown_secs =
            core_config::env_parse("SHUTDOWN_TIMEOUT_SECS", DEFAULT_SHUTDOWN_TIMEOUT_SECS)?;

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            index: IndexConfig::from_env()?,
            shutdown_timeout: Duration::from_secs(shutdown_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(
            [
                "APP_ENV",
                "HOST",
                "PORT",
                "VECTOR_DIMENSION",
                "DEFAULT_TOP_K",
                "MAX_TOP_K",
                "MAX_BODY_BYTES",
                "SHUTDOWN_TIMEOUT_SECS",
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "quotes_vector_index");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.address(), "0.0.0.0:8080");
                assert_eq!(config.index, IndexConfig::default());
                assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn test_invalid_index_config_fails() {
        temp_env::with_var("VECTOR_DIMENSION", Some("zero"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
