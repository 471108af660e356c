pub mod bridge;
pub mod connector;
pub mod event;
