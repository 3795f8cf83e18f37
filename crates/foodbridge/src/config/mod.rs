use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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

/// Top-level configuration for the matching service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
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

        let max_distance_km = env::var("MATCH_MAX_DISTANCE_KM")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidMatchSetting {
                key: "MATCH_MAX_DISTANCE_KM",
            })?;
        let default_top_n = env::var("MATCH_DEFAULT_TOP_N")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidMatchSetting {
                key: "MATCH_DEFAULT_TOP_N",
            })?;
        let emergency_limit = env::var("MATCH_EMERGENCY_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidMatchSetting {
                key: "MATCH_EMERGENCY_LIMIT",
            })?;

        if max_distance_km <= 0.0 {
            return Err(ConfigError::InvalidMatchSetting {
                key: "MATCH_MAX_DISTANCE_KM",
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: MatchingConfig {
                max_distance_km,
                default_top_n,
                emergency_limit,
            },
        })
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Tunables for the ranking and emergency paths. Scoring weights are
/// deliberately not configurable; see `matching::scoring::ScoringPolicy`.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    pub max_distance_km: f64,
    pub default_top_n: usize,
    pub emergency_limit: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMatchSetting { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMatchSetting { key } => {
                write!(f, "{key} must be a positive number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidMatchSetting { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
