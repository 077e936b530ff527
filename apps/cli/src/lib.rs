//! `stoich` command-line driver: configuration, logging, reports and exports
//! on top of `stoich-formula`.

pub mod commands;
pub mod config;
pub mod export;
pub mod input;
pub mod logging;
pub mod report;

pub use config::Config;
