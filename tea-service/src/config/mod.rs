use axum::http::HeaderValue;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TeaConfig {
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string. Absent means the store starts unavailable.
    pub url: Option<Secret<String>>,
    pub name: Option<String>,
    pub server_selection_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: None,
            server_selection_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

const DEFAULT_TIMEOUT_SECS: u64 = 5;

impl TeaConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the service config from `common` plus the variables `lookup`
    /// resolves. Empty values count as unset.
    pub fn from_lookup<F>(mut common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            common.port = port.trim().parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("PORT must be a valid port number: {}", e))
            })?;
        }

        let server_selection_timeout_secs = match get("DATABASE_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "DATABASE_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let allowed_origins: Vec<String> = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty() && *o != "*")
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(origin) = allowed_origins
            .iter()
            .find(|origin| origin.parse::<HeaderValue>().is_err())
        {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "CORS_ALLOWED_ORIGINS contains an invalid origin: {:?}",
                origin
            )));
        }

        Ok(TeaConfig {
            common,
            database: DatabaseConfig {
                url: get("DATABASE_URL").map(Secret::new),
                name: get("DATABASE_NAME"),
                server_selection_timeout_secs,
            },
            cors: CorsConfig { allowed_origins },
        })
    }

    pub fn database_url_set(&self) -> bool {
        self.database.url.is_some()
    }

    pub fn database_name_set(&self) -> bool {
        self.database.name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<TeaConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TeaConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config.common.port, 8000);
        assert!(!config.database_url_set());
        assert!(!config.database_name_set());
        assert_eq!(config.database.server_selection_timeout_secs, 5);
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn reads_database_and_port() {
        let config = load(&[
            ("PORT", "9001"),
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("DATABASE_NAME", "teashop"),
        ])
        .unwrap();

        assert_eq!(config.common.port, 9001);
        assert_eq!(
            config.database.url.as_ref().unwrap().expose_secret(),
            "mongodb://localhost:27017"
        );
        assert_eq!(config.database.name.as_deref(), Some("teashop"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("DATABASE_URL", "  "), ("DATABASE_NAME", "")]).unwrap();
        assert!(!config.database_url_set());
        assert!(!config.database_name_set());
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn invalid_cors_origin_is_a_config_error() {
        let err = load(&[("CORS_ALLOWED_ORIGINS", "https://tea.example, bad\u{7f}origin")])
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn cors_origins_are_split_and_wildcard_dropped() {
        let config = load(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://tea.example, *, http://localhost:5173",
        )])
        .unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://tea.example", "http://localhost:5173"]
        );
    }
}
