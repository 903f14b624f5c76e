use std::env;
use std::time::Duration;

use url::Url;

const DEFAULT_ML_SERVICE_URL: &str = "http://localhost:8000";
const DEFAULT_PORT: u16 = 8081;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base address of the inference service, without a trailing slash.
    pub ml_service_url: String,
    pub port: u16,
    pub frontend_dir: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ml_service_url = lookup("ML_SERVICE_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ML_SERVICE_URL.to_string());
        let ml_service_url = ml_service_url.trim().trim_end_matches('/').to_string();
        Url::parse(&ml_service_url).map_err(|e| ConfigError::InvalidValue {
            key: "ML_SERVICE_URL".into(),
            message: e.to_string(),
        })?;

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT".into(),
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("ML_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: "ML_REQUEST_TIMEOUT_SECS".into(),
                        message: format!("expected a positive number of seconds, got {:?}", raw),
                    });
                }
                Ok(secs) => secs,
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let frontend_dir = lookup("FRONTEND_DIR").unwrap_or_else(|| {
            if let Some(manifest_dir) = lookup("CARGO_MANIFEST_DIR") {
                format!("{}/../frontend/dist", manifest_dir)
            } else {
                "/usr/src/app/frontend/dist".to_string()
            }
        });

        Ok(Self {
            ml_service_url,
            port,
            frontend_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
