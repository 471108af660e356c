use crate::errors::config_error::ConfigError;
use std::{env, str::FromStr, time::Duration};

/// What a session does when the live source reports an error mid-stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Report the error and keep listening
    #[default]
    Lenient,
    /// Report the error and drop the live connection
    Teardown,
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "lenient" => Ok(ErrorPolicy::Lenient),
            "teardown" => Ok(ErrorPolicy::Teardown),
            _ => Err(ConfigError::InvalidErrorPolicy(value.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub live_bridge_url: String,
    pub connect_timeout: Duration,
    pub error_policy: ErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_address: "0.0.0.0".to_string(),
            port: 8091,
            live_bridge_url: "ws://127.0.0.1:8092/live".to_string(),
            connect_timeout: Duration::from_secs(15),
            error_policy: ErrorPolicy::Lenient,
        }
    }
}

impl Config {
    /// Reads the configuration from environment variables, using defaults for unset ones
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|key| env::var(key))
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, env::VarError>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &'static str| match lookup(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key)),
        };

        let mut config = Config::default();

        if let Some(bind_address) = get("BIND_ADDRESS")? {
            config.bind_address = bind_address;
        }

        if let Some(port) = get("PORT")? {
            config.port = port
                .trim()
                .parse()
                .or(Err(ConfigError::InvalidPort(port)))?;
        }

        if let Some(live_bridge_url) = get("LIVE_BRIDGE_URL")? {
            config.live_bridge_url = live_bridge_url;
        }

        if let Some(timeout) = get("LIVE_CONNECT_TIMEOUT_SECS")? {
            let seconds: u64 = timeout
                .trim()
                .parse()
                .or(Err(ConfigError::InvalidConnectTimeout(timeout.clone())))?;

            if seconds == 0 {
                return Err(ConfigError::InvalidConnectTimeout(timeout));
            }
            config.connect_timeout = Duration::from_secs(seconds);
        }

        if let Some(policy) = get("LIVE_ERROR_POLICY")? {
            config.error_policy = policy.parse()?;
        }

        Ok(config)
    }
}
