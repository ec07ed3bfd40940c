// Library surface for the binary and the integration tests.
pub mod allocation;
pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod records;
