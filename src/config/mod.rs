//! Configuration loading and management for the Allowance Engine.
//!
//! This module loads the proration policy and rate table from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use allowance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/magni").unwrap();
//! println!("Loaded {} rate rules", config.rate_table().rules.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_OFF_DAY_ENTITLEMENT, EngineConfig, EngineMetadata, ProrationPolicy, RatesConfig,
};
