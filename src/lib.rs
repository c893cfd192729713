pub mod analysis;
pub mod client;
pub mod config;
pub mod demo;
pub mod email;
pub mod heuristic;
pub mod result_slot;
