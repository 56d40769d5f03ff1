use std::env;

use auth::HashingParams;
use auth::TokenConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub hashing: HashingConfig,
    pub notifier: NotifierConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime, `<digits><h|d|m>`. Anything else falls back to 24 hours.
    pub expires_in: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HashingConfig {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotifierConfig {
    /// Welcome messages are only logged when no key is set.
    pub resend_api_key: Option<String>,
    pub from_email: String,
    pub api_url: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__EXPIRES_IN=7d overrides jwt.expires_in
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let hashing = HashingParams::default();

        ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 3000)?
            .set_default("jwt.expires_in", "24h")?
            .set_default("hashing.memory_cost", i64::from(hashing.memory_cost))?
            .set_default("hashing.time_cost", i64::from(hashing.time_cost))?
            .set_default("hashing.parallelism", i64::from(hashing.parallelism))?
            .set_default("notifier.from_email", "onboarding@resend.dev")?
            .set_default("notifier.api_url", "https://api.resend.com")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        Ok(())
    }

    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            secret: self.jwt.secret.clone(),
            expires_in: self.jwt.expires_in.clone(),
        }
    }

    pub fn hashing_params(&self) -> HashingParams {
        HashingParams {
            memory_cost: self.hashing.memory_cost,
            time_cost: self.hashing.time_cost,
            parallelism: self.hashing.parallelism,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/carpool".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 3000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expires_in: "7d".to_string(),
            },
            hashing: HashingConfig {
                memory_cost: 19456,
                time_cost: 2,
                parallelism: 1,
            },
            notifier: NotifierConfig {
                resend_api_key: None,
                from_email: "onboarding@resend.dev".to_string(),
                api_url: "https://api.resend.com".to_string(),
            },
        }
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(config_with_secret("   ").validate().is_err());
        assert!(config_with_secret("secret").validate().is_ok());
    }

    #[test]
    fn test_explicit_values_for_auth() {
        let config = config_with_secret("secret");

        assert_eq!(config.hashing_params(), HashingParams::default());
        let tokens = config.token_config();
        assert_eq!(tokens.secret, "secret");
        assert_eq!(tokens.expires_in, "7d");
    }
}
