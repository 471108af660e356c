pub mod participant;
