use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Could not bind HTTP server on {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("Could not get local address of HTTP server: {0}")]
    LocalAddress(std::io::Error),
}
