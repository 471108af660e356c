use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Operator sent an invalid frame: {0}")]
    InvalidFrame(#[from] serde_json::Error),
    #[error("Operator sent an unknown event: {0}")]
    UnknownEvent(String),
}
