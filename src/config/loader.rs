use super::types::{
    AppConfig, BasicAuth, ConfigError, DecodePolicy, SearchConfig, DEFAULT_URL, ENV_BASIC_AUTH,
    ENV_DECODE_POLICY, ENV_PORT, ENV_URLS,
};

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = get(ENV_PORT).ok_or(ConfigError::Missing(ENV_PORT))?;
        let port: u16 = port.trim().parse().map_err(|e| ConfigError::Invalid {
            name: ENV_PORT,
            reason: format!("`{}`: {}", port, e),
        })?;

        let urls = match get(ENV_URLS) {
            Some(raw) => parse_urls(&raw),
            None => vec![DEFAULT_URL.to_string()],
        };
        if urls.is_empty() {
            return Err(ConfigError::Invalid {
                name: ENV_URLS,
                reason: "no endpoint in list".to_string(),
            });
        }

        let basic_auth = get(ENV_BASIC_AUTH)
            .map(|raw| raw.parse::<BasicAuth>())
            .transpose()?;

        let decode_policy = get(ENV_DECODE_POLICY)
            .map(|raw| raw.parse::<DecodePolicy>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            port,
            search: SearchConfig {
                urls,
                basic_auth,
                accept_invalid_certs: true,
            },
            decode_policy,
        })
    }
}

/// Splits a comma-separated endpoint list, dropping blanks and trailing slashes.
pub fn parse_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|url| url.trim().trim_end_matches('/'))
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}
