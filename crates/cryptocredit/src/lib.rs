pub mod chains;
pub mod config;
pub mod datasource;
pub mod error;
pub mod scoring;
pub mod telemetry;
