use crate::domain::model::Contract;
use crate::domain::ports::ContractSource;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_unique_ids};
use std::path::PathBuf;

const BUNDLED_CONTRACTS: &str = include_str!("../../data/contracts.json");

/// Parses and validates a JSON array of contracts.
pub fn parse_contracts(json: &str) -> Result<Vec<Contract>> {
    let contracts: Vec<Contract> = serde_json::from_str(json)?;
    validate_contracts(&contracts)?;
    Ok(contracts)
}

pub fn validate_contracts(contracts: &[Contract]) -> Result<()> {
    validate_unique_ids(contracts.iter().map(|c| c.id.as_str()))?;
    for contract in contracts {
        validate_non_empty_string(&format!("{}.vendorName", contract.id), &contract.vendor_name)?;
    }
    Ok(())
}

/// The demo dataset compiled into the binary.
pub fn bundled_contracts() -> Result<Vec<Contract>> {
    parse_contracts(BUNDLED_CONTRACTS)
}

#[derive(Debug, Clone, Default)]
pub struct BundledContracts;

impl ContractSource for BundledContracts {
    async fn load(&self) -> Result<Vec<Contract>> {
        let contracts = bundled_contracts()?;
        tracing::debug!("Loaded {} bundled contracts", contracts.len());
        Ok(contracts)
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileContracts {
    path: PathBuf,
}

impl JsonFileContracts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContractSource for JsonFileContracts {
    async fn load(&self) -> Result<Vec<Contract>> {
        tracing::debug!("Reading contracts from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        let contracts = parse_contracts(&content)?;
        tracing::info!(
            "Loaded {} contracts from {}",
            contracts.len(),
            self.path.display()
        );
        Ok(contracts)
    }
}
