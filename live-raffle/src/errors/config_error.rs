use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
    #[error("LIVE_CONNECT_TIMEOUT_SECS is not a valid number of seconds: {0}")]
    InvalidConnectTimeout(String),
    #[error("LIVE_ERROR_POLICY must be lenient or teardown, got {0}")]
    InvalidErrorPolicy(String),
    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),
}
