pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::TomlConfig;
pub use crate::core::pricer::PricingService;
pub use crate::domain::model::{GemFeatures, Quote};
pub use crate::utils::error::{PricerError, Result};
