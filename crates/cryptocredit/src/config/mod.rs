use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::scoring::weights::{ScoreWeights, WeightsError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data_source: DataSourceConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        let data_source = DataSourceConfig {
            api_key: env::var("GOLDRUSH_API_KEY").ok(),
            base_url: env::var("GOLDRUSH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GOLDRUSH_BASE_URL.to_string()),
            timeout_secs: parse_number("GOLDRUSH_TIMEOUT_SECS", 15)?,
        };

        let weights = match env::var("SCORE_WEIGHTS_PATH") {
            Ok(path) if !path.trim().is_empty() => load_weights(PathBuf::from(path))?,
            _ => ScoreWeights::default(),
        };
        weights.validate().map_err(ConfigError::Weights)?;

        let scoring = ScoringConfig {
            default_tx_limit: parse_number("SCORE_DEFAULT_TX_LIMIT", 100)?,
            max_tx_limit: parse_number("SCORE_MAX_TX_LIMIT", 1000)?,
            weights,
        };
        if scoring.default_tx_limit == 0 || scoring.default_tx_limit > scoring.max_tx_limit {
            return Err(ConfigError::InvalidTxLimits {
                default: scoring.default_tx_limit,
                max: scoring.max_tx_limit,
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            data_source,
            scoring,
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    variable: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { variable }),
        Err(_) => Ok(default),
    }
}

fn load_weights(path: PathBuf) -> Result<ScoreWeights, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::WeightsFile {
        path: path.clone(),
        source,
    })?;
    ScoreWeights::from_json(&raw).map_err(|source| ConfigError::WeightsParse { path, source })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "full" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

pub const DEFAULT_GOLDRUSH_BASE_URL: &str = "https://api.covalenthq.com";

/// Connection settings for the blockchain data provider.
#[derive(Debug, Clone)]
pub struct DataSourceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Request limits and the calibration table used by the scoring engine.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub default_tx_limit: u32,
    pub max_tx_limit: u32,
    pub weights: ScoreWeights,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidNumber {
        variable: &'static str,
    },
    InvalidTxLimits {
        default: u32,
        max: u32,
    },
    WeightsFile {
        path: PathBuf,
        source: std::io::Error,
    },
    WeightsParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Weights(WeightsError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable } => {
                write!(f, "{variable} must be a valid positive number")
            }
            ConfigError::InvalidTxLimits { default, max } => write!(
                f,
                "SCORE_DEFAULT_TX_LIMIT ({default}) must be between 1 and SCORE_MAX_TX_LIMIT ({max})"
            ),
            ConfigError::WeightsFile { path, .. } => {
                write!(f, "unable to read weights file {}", path.display())
            }
            ConfigError::WeightsParse { path, .. } => {
                write!(f, "weights file {} is not a valid weights table", path.display())
            }
            ConfigError::Weights(err) => write!(f, "invalid score weights: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidTxLimits { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::WeightsFile { source, .. } => Some(source),
            ConfigError::WeightsParse { source, .. } => Some(source),
            ConfigError::Weights(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "GOLDRUSH_API_KEY",
            "GOLDRUSH_BASE_URL",
            "GOLDRUSH_TIMEOUT_SECS",
            "SCORE_DEFAULT_TX_LIMIT",
            "SCORE_MAX_TX_LIMIT",
            "SCORE_WEIGHTS_PATH",
        ] {
            env::remove_var(variable);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        assert_eq!(config.data_source.base_url, DEFAULT_GOLDRUSH_BASE_URL);
        assert_eq!(config.data_source.timeout_secs, 15);
        assert_eq!(config.scoring.default_tx_limit, 100);
        assert_eq!(config.scoring.max_tx_limit, 1000);
        assert_eq!(config.scoring.weights, ScoreWeights::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SCORE_MAX_TX_LIMIT", "lots");
        match AppConfig::load() {
            Err(ConfigError::InvalidNumber { variable }) => {
                assert_eq!(variable, "SCORE_MAX_TX_LIMIT")
            }
            other => panic!("expected invalid number, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_default_limit_above_max() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SCORE_DEFAULT_TX_LIMIT", "2000");
        let result = AppConfig::load();
        reset_env();

        match result {
            Err(err @ ConfigError::InvalidTxLimits { default: 2000, max: 1000 }) => {
                assert!(err.to_string().contains("between 1 and SCORE_MAX_TX_LIMIT (1000)"));
            }
            other => panic!("expected invalid tx limits, got {other:?}"),
        }

        env::set_var("SCORE_DEFAULT_TX_LIMIT", "0");
        let result = AppConfig::load();
        reset_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidTxLimits { default: 0, .. })
        ));
    }

    #[test]
    fn invalid_weights_file_fails_fast() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let path = env::temp_dir().join(format!("cryptocredit-weights-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"target_range": 900, "metrics": {"unique_tokens": {"min_val": 10, "avg_val": 5, "max_val": 30, "max_score": 10}}}"#,
        )
        .expect("write weights file");
        env::set_var("SCORE_WEIGHTS_PATH", &path);

        let result = AppConfig::load();
        fs::remove_file(&path).ok();
        reset_env();

        assert!(matches!(result, Err(ConfigError::Weights(_))));
    }
}
