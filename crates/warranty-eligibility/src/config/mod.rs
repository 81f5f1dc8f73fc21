use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::eligibility::evaluation::{EvaluationConfig, EvaluationPolicy};
use crate::eligibility::timing::TimingWindows;

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

/// Top-level configuration for the engine and its HTTP surface.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub eligibility: EvaluationConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            eligibility: load_eligibility()?,
        })
    }
}

fn load_eligibility() -> Result<EvaluationConfig, ConfigError> {
    let policy = match env::var("APP_ELIGIBILITY_POLICY") {
        Ok(raw) => EvaluationPolicy::parse(&raw).ok_or(ConfigError::InvalidPolicy(raw))?,
        Err(_) => EvaluationPolicy::default(),
    };

    let defaults = TimingWindows::default();
    let outer_window_months = months_var("APP_WINDOW_MONTHS", defaults.outer_window_months)?;
    let presumption_months = months_var("APP_PRESUMPTION_MONTHS", defaults.presumption_months)?;
    if presumption_months > outer_window_months {
        return Err(ConfigError::PresumptionExceedsWindow {
            presumption_months,
            outer_window_months,
        });
    }

    Ok(EvaluationConfig {
        policy,
        windows: TimingWindows {
            outer_window_months,
            presumption_months,
            average_month_days: defaults.average_month_days,
        },
    })
}

fn months_var(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|months| *months > 0)
            .ok_or(ConfigError::InvalidMonths { name }),
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
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPolicy(String),
    InvalidMonths { name: &'static str },
    PresumptionExceedsWindow {
        presumption_months: u32,
        outer_window_months: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPolicy(value) => write!(
                f,
                "APP_ELIGIBILITY_POLICY must be accumulate_all or short_circuit (got '{}')",
                value
            ),
            ConfigError::InvalidMonths { name } => {
                write!(f, "{name} must be a positive number of months")
            }
            ConfigError::PresumptionExceedsWindow {
                presumption_months,
                outer_window_months,
            } => write!(
                f,
                "presumption period ({presumption_months} months) cannot exceed the eligibility window ({outer_window_months} months)"
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
