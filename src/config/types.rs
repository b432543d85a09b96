use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

pub const ENV_PORT: &str = "PORT";
pub const ENV_URLS: &str = "ES_URLS";
pub const ENV_BASIC_AUTH: &str = "ES_BASIC_AUTH";
pub const ENV_DECODE_POLICY: &str = "ES_DECODE_POLICY";

/// Endpoint used when `ES_URLS` is unset or blank.
pub const DEFAULT_URL: &str = "http://127.0.0.1:9200";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Static credentials passed through to the engine.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

// Keep the password out of logs.
impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl FromStr for BasicAuth {
    type Err = ConfigError;

    /// Splits on the first `:` only, so passwords may contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (username, password) = s.split_once(':').ok_or_else(|| ConfigError::Invalid {
            name: ENV_BASIC_AUTH,
            reason: "expected `username:password`".to_string(),
        })?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// What happens to a search hit whose `_source` doesn't decode into the expected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Log a warning and leave the hit out of the results.
    #[default]
    Skip,
    /// Fail the whole request.
    Fail,
}

impl FromStr for DecodePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(ConfigError::Invalid {
                name: ENV_DECODE_POLICY,
                reason: format!("unknown policy `{}` (expected `skip` or `fail`)", other),
            }),
        }
    }
}

/// Settings for the engine client.
///
/// Node discovery is never performed: traffic only goes to `urls`.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub urls: Vec<String>,
    pub basic_auth: Option<BasicAuth>,
    /// Skip TLS certificate and hostname verification on this client.
    pub accept_invalid_certs: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            urls: vec![DEFAULT_URL.to_string()],
            basic_auth: None,
            accept_invalid_certs: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub search: SearchConfig,
    pub decode_policy: DecodePolicy,
}

impl AppConfig {
    /// Address the HTTP server binds to (all interfaces).
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), self.port)
    }
}
