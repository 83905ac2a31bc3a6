pub mod config;
pub mod connection;
pub mod domain;
pub mod error;
pub mod startup;
pub mod subscribers;
pub mod telemetry;
