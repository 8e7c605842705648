pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::RadarConfig;

pub use adapters::contracts::{BundledContracts, JsonFileContracts};
pub use adapters::gemini::GeminiClient;
pub use crate::core::{aggregator::RadarView, brief::BriefGenerator, radar::Radar};
pub use utils::error::{RadarError, Result};
