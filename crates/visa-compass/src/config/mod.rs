use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use chrono::Duration;

use crate::workflows::calculator::progress::DEFAULT_PROGRESS_TTL_DAYS;
use crate::workflows::calculator::{
    CalculatorConfig, ScoringPolicy, HIGH_PROBABILITY_THRESHOLD, MEDIUM_PROBABILITY_THRESHOLD,
};

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
    pub calculator: CalculatorConfig,
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

        let processing_delay_ms = parse_var("APP_PROCESSING_DELAY_MS", 0u64)
            .map_err(|_| ConfigError::InvalidProcessingDelay)?;
        let progress_ttl_days = parse_var("APP_PROGRESS_TTL_DAYS", DEFAULT_PROGRESS_TTL_DAYS)
            .ok()
            .filter(|days| *days > 0 && Duration::try_days(*days).is_some())
            .ok_or(ConfigError::InvalidProgressTtl)?;

        let high_threshold = parse_var("APP_HIGH_PROBABILITY_THRESHOLD", HIGH_PROBABILITY_THRESHOLD)
            .map_err(|_| ConfigError::InvalidThreshold("APP_HIGH_PROBABILITY_THRESHOLD"))?;
        let medium_threshold =
            parse_var("APP_MEDIUM_PROBABILITY_THRESHOLD", MEDIUM_PROBABILITY_THRESHOLD)
                .map_err(|_| ConfigError::InvalidThreshold("APP_MEDIUM_PROBABILITY_THRESHOLD"))?;
        if high_threshold > 100 || medium_threshold > high_threshold {
            return Err(ConfigError::InvalidThresholds {
                high: high_threshold,
                medium: medium_threshold,
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            calculator: CalculatorConfig {
                policy: ScoringPolicy::with_thresholds(high_threshold, medium_threshold),
                progress_ttl_days,
                processing_delay_ms,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, T::Err> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>(),
        Err(_) => Ok(default),
    }
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidProcessingDelay,
    InvalidProgressTtl,
    InvalidThreshold(&'static str),
    InvalidThresholds { high: u8, medium: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidProcessingDelay => {
                write!(f, "APP_PROCESSING_DELAY_MS must be a non-negative integer")
            }
            ConfigError::InvalidProgressTtl => {
                write!(f, "APP_PROGRESS_TTL_DAYS must be a positive number of days chrono can represent")
            }
            ConfigError::InvalidThreshold(name) => write!(f, "{name} must be an integer 0-255"),
            ConfigError::InvalidThresholds { high, medium } => write!(
                f,
                "probability thresholds must satisfy medium <= high <= 100 (high {high}, medium {medium})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
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
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_PROCESSING_DELAY_MS",
            "APP_PROGRESS_TTL_DAYS",
            "APP_HIGH_PROBABILITY_THRESHOLD",
            "APP_MEDIUM_PROBABILITY_THRESHOLD",
        ] {
            env::remove_var(name);
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
        assert_eq!(config.calculator, CalculatorConfig::default());
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
    fn reads_calculator_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PROCESSING_DELAY_MS", "3000");
        env::set_var("APP_PROGRESS_TTL_DAYS", "3");
        env::set_var("APP_HIGH_PROBABILITY_THRESHOLD", "90");
        env::set_var("APP_MEDIUM_PROBABILITY_THRESHOLD", "55");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.calculator.processing_delay_ms, 3000);
        assert_eq!(config.calculator.progress_ttl_days, 3);
        assert_eq!(config.calculator.policy.high_threshold, 90);
        assert_eq!(config.calculator.policy.medium_threshold, 55);
        reset_env();
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HIGH_PROBABILITY_THRESHOLD", "50");
        env::set_var("APP_MEDIUM_PROBABILITY_THRESHOLD", "70");

        let error = AppConfig::load().expect_err("thresholds inverted");

        assert!(matches!(
            error,
            ConfigError::InvalidThresholds {
                high: 50,
                medium: 70
            }
        ));
        reset_env();
    }

    #[test]
    fn rejects_zero_progress_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PROGRESS_TTL_DAYS", "0");

        let error = AppConfig::load().expect_err("ttl must be positive");

        assert!(matches!(error, ConfigError::InvalidProgressTtl));
        reset_env();
    }

    #[test]
    fn rejects_progress_ttl_beyond_duration_range() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PROGRESS_TTL_DAYS", (i64::MAX / 2).to_string());

        let error = AppConfig::load().expect_err("ttl overflows chrono duration");

        assert!(matches!(error, ConfigError::InvalidProgressTtl));
        reset_env();
    }
}
