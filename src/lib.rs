pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{env::EnvConfig, toml_config::TomlConfig};
pub use core::{
    engine::{BriefEngine, RunOutcome},
    pipeline::BriefPipeline,
    progress::{compute_progress, ProgressCalculator},
};
pub use utils::error::{BriefError, Result};
