use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Failures reported by a live source while establishing a connection.
///
/// The display text keeps the raw cause so it can be matched by
/// [`crate::localize::localize`].
#[derive(Error, Debug)]
pub enum LiveError {
    #[error("{0}")]
    Rejected(String),
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),
    #[error("{0}")]
    Handshake(#[from] tungstenite::Error),
    #[error("Connection closed before the live source answered")]
    ClosedBeforeReady,
    #[error("Live source sent an invalid frame: {0}")]
    InvalidFrame(#[from] serde_json::Error),
    #[error("Timed out waiting for the live source")]
    Timeout,
}
