pub mod raffles;
pub mod registry;
