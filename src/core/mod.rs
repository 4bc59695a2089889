//! Core types: errors, logging and the configuration file

pub mod types;
pub mod error;
pub mod logging;
pub mod config;

pub use types::*;
pub use error::{AssetError, ConfigError, Error};
pub use config::ConfiguratorConfig;
