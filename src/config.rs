//! Configuration types.

use std::net::IpAddr;

use axum::http::HeaderValue;

use crate::error::ConfigError;

/// Which front end drives the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// HTTP + WebSocket adapter for a browser-rendered page.
    #[default]
    Http,
    /// Terminal REPL.
    Cli,
}

impl std::str::FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "cli" => Ok(Self::Cli),
            other => Err(ConfigError::InvalidValue {
                key: "SIGNUP_MODE".to_string(),
                message: format!("expected `http` or `cli`, got `{other}`"),
            }),
        }
    }
}

/// Process configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct SignupConfig {
    pub mode: RunMode,
    pub host: IpAddr,
    pub port: u16,
    /// Allowed browser origin, already checked to be a valid header value.
    /// `None` means unset and allows any origin.
    pub cors_origin: Option<HeaderValue>,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            cors_origin: None,
        }
    }
}

impl SignupConfig {
    /// Read `SIGNUP_MODE`, `SIGNUP_HOST`, `SIGNUP_PORT` and `SIGNUP_CORS_ORIGIN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let mode = match lookup("SIGNUP_MODE") {
            Some(raw) => raw.parse::<RunMode>()?,
            None => defaults.mode,
        };

        let host = match lookup("SIGNUP_HOST") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|e| ConfigError::InvalidValue {
                key: "SIGNUP_HOST".to_string(),
                message: format!("{e}"),
            })?,
            None => defaults.host,
        };

        let port = match lookup("SIGNUP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "SIGNUP_PORT".to_string(),
                message: format!("{e}"),
            })?,
            None => defaults.port,
        };

        let cors_origin = match lookup("SIGNUP_CORS_ORIGIN") {
            Some(raw) if !raw.trim().is_empty() => {
                Some(HeaderValue::from_str(raw.trim()).map_err(|e| {
                    ConfigError::InvalidValue {
                        key: "SIGNUP_CORS_ORIGIN".to_string(),
                        message: format!("{e}"),
                    }
                })?)
            }
            _ => None,
        };

        Ok(Self {
            mode,
            host,
            port,
            cors_origin,
        })
    }

    pub fn bind_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::new(self.host, self.port)
    }
}
