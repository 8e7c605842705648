pub mod aggregator;
pub mod brief;
pub mod insights;
pub mod radar;

pub use crate::domain::model::{Contract, FilterConfiguration, RegionFilter, RiskLevel, TileFilter};
pub use crate::domain::ports::{ConfigProvider, ContractSource, TextGenerator};
pub use crate::utils::error::Result;
