pub mod config_error;
pub mod live_error;
pub mod protocol_error;
pub mod registry_error;
pub mod server_error;
pub mod session_error;
