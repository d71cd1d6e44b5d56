pub mod curves;
pub mod report;
pub mod run_config;
