pub mod config;
pub mod error;
pub mod rewards;
pub mod roster;
pub mod telemetry;
