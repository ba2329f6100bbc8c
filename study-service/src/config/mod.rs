use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{self as core_config, get_env, is_production};
use service_core::error::AppError;

#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub cors: CorsConfig,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: Secret<String>,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Mongodb,
    Memory,
}

impl StudyConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;
        let is_prod = is_production();

        let ttl_minutes = get_env("ACCESS_TOKEN_TTL_MINUTES", Some("60"), is_prod)?
            .parse::<i64>()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid ACCESS_TOKEN_TTL_MINUTES: {}", e))
            })?;

        Ok(StudyConfig {
            common,
            database: DatabaseConfig {
                backend: get_env("DATABASE_BACKEND", Some("mongodb"), is_prod)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                name: get_env("MONGODB_DATABASE", Some("onlineGroupStudy"), is_prod)?,
            },
            token: TokenConfig {
                secret: Secret::new(get_env(
                    "ACCESS_TOKEN_SECRET",
                    Some("dev-access-token-secret"),
                    is_prod,
                )?),
                ttl_minutes,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    Some("http://localhost:5173"),
                    is_prod,
                )?),
            },
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
        })
    }
}

impl std::str::FromStr for DatabaseBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(DatabaseBackend::Mongodb),
            "memory" => Ok(DatabaseBackend::Memory),
            _ => Err(format!("Invalid database backend: {}", s)),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_database_backends() {
        assert_eq!("mongodb".parse::<DatabaseBackend>(), Ok(DatabaseBackend::Mongodb));
        assert_eq!("Memory".parse::<DatabaseBackend>(), Ok(DatabaseBackend::Memory));
        assert!("postgres".parse::<DatabaseBackend>().is_err());
    }

    #[test]
    fn parses_comma_separated_origins() {
        assert_eq!(
            parse_origins("http://localhost:5173, https://study.example.com,,"),
            vec![
                "http://localhost:5173".to_string(),
                "https://study.example.com".to_string()
            ]
        );
    }
}
