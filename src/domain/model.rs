use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::RadarError;

/// Days horizon used when no filter has been chosen.
pub const DEFAULT_DAYS_HORIZON: i64 = 90;

/// Display value of the catch-all region selector.
pub const ALL_REGIONS: &str = "All Regions";

/// Severity along one risk dimension. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Hex color shared by the risk badge and the distribution chart.
    pub fn badge_color(&self) -> &'static str {
        match self {
            RiskLevel::High => "#EF4444",
            RiskLevel::Medium => "#F59E0B",
            RiskLevel::Low => "#10B981",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "EMEA")]
    Emea,
    #[serde(rename = "NA")]
    Na,
    #[serde(rename = "APAC")]
    Apac,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Emea => "EMEA",
            Region::Na => "NA",
            Region::Apac => "APAC",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenewalType {
    #[serde(rename = "Auto-renew")]
    AutoRenew,
    #[serde(rename = "Fixed Term")]
    FixedTerm,
}

impl fmt::Display for RenewalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenewalType::AutoRenew => f.write_str("Auto-renew"),
            RenewalType::FixedTerm => f.write_str("Fixed Term"),
        }
    }
}

/// One vendor agreement. Loaded once and never mutated.
///
/// `days_remaining` is stored alongside `renewal_date` and is trusted as-is;
/// nothing in the crate re-derives it from the date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub vendor_name: String,
    pub contract_name: String,
    pub renewal_date: NaiveDate,
    pub days_remaining: i64,
    /// Formatted money, e.g. `"$1.2M"` or `"$850K"`.
    pub value: String,
    pub commercial_risk: RiskLevel,
    pub compliance_risk: RiskLevel,
    pub risk_reason: String,
    pub term: String,
    pub uplift: String,
    pub sla_breaches: u32,
    pub notice_period: String,
    #[serde(rename = "type")]
    pub renewal_type: RenewalType,
    pub description: String,
    pub region: Region,
}

impl Contract {
    /// Priority merge of both risk dimensions: High wins over Medium wins over Low.
    pub fn overall_risk(&self) -> RiskLevel {
        self.commercial_risk.max(self.compliance_risk)
    }

    pub fn is_high_risk(&self) -> bool {
        self.commercial_risk == RiskLevel::High || self.compliance_risk == RiskLevel::High
    }

    pub fn has_dpa_issue(&self) -> bool {
        self.compliance_risk == RiskLevel::High || self.risk_reason.to_lowercase().contains("dpa")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn matches(&self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(selected) => *selected == region,
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str(ALL_REGIONS),
            RegionFilter::Only(region) => f.write_str(region.as_str()),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL REGIONS" | "ALL" => Ok(RegionFilter::All),
            "EMEA" => Ok(RegionFilter::Only(Region::Emea)),
            "NA" => Ok(RegionFilter::Only(Region::Na)),
            "APAC" => Ok(RegionFilter::Only(Region::Apac)),
            _ => Err(RadarError::InvalidConfigValueError {
                field: "region".to_string(),
                value: s.to_string(),
                reason: "expected one of: All Regions, EMEA, NA, APAC".to_string(),
            }),
        }
    }
}

/// Summary tile selector. At most one tile is active; `All` means none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileFilter {
    #[default]
    All,
    HighRisk,
    Dpa,
    /// Highlights spend without narrowing the rows.
    Spend,
}

impl TileFilter {
    pub fn label(&self) -> &'static str {
        match self {
            TileFilter::All => "All Renewals",
            TileFilter::HighRisk => "High Risk Renewals",
            TileFilter::Dpa => "Non-compliant DPAs",
            TileFilter::Spend => "All Spend Context",
        }
    }
}

impl FromStr for TileFilter {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ALL" => Ok(TileFilter::All),
            "HIGH_RISK" => Ok(TileFilter::HighRisk),
            "DPA" => Ok(TileFilter::Dpa),
            "SPEND" => Ok(TileFilter::Spend),
            _ => Err(RadarError::InvalidConfigValueError {
                field: "tile".to_string(),
                value: s.to_string(),
                reason: "expected one of: ALL, HIGH_RISK, DPA, SPEND".to_string(),
            }),
        }
    }
}

/// The user-driven filter state behind the radar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterConfiguration {
    pub days_horizon: i64,
    pub region: RegionFilter,
    pub tile: TileFilter,
}

impl Default for FilterConfiguration {
    fn default() -> Self {
        Self {
            days_horizon: DEFAULT_DAYS_HORIZON,
            region: RegionFilter::All,
            tile: TileFilter::All,
        }
    }
}

impl FilterConfiguration {
    /// Selecting the active tile a second time turns it off.
    pub fn toggle_tile(&mut self, tile: TileFilter) {
        self.tile = if self.tile == tile {
            TileFilter::All
        } else {
            tile
        };
    }

    pub fn clear_tile(&mut self) {
        self.tile = TileFilter::All;
    }

    pub fn set_days_horizon(&mut self, days: i64) {
        self.days_horizon = days;
    }

    pub fn set_region(&mut self, region: RegionFilter) {
        self.region = region;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A copilot chat entry. Carries structured fields; renderers decide emphasis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CopilotMessage {
    Narration {
        vendor_name: String,
    },
    Analysis {
        renewal_date: NaiveDate,
        term: String,
        uplift: String,
        sla_breaches: u32,
    },
}

impl fmt::Display for CopilotMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopilotMessage::Narration { vendor_name } => {
                write!(f, "Reviewing contract details for {}...", vendor_name)
            }
            CopilotMessage::Analysis {
                renewal_date,
                term,
                uplift,
                sla_breaches,
            } => write!(
                f,
                "If you do nothing, this contract auto-renews on {} for another {} with a {} annual price uplift.\n\
                 Vendor has missed the uptime SLA {} times in the last 9 months. \
                 Data-processing terms don't match your 2025 policy.",
                renewal_date, term, uplift, sla_breaches
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
        assert_eq!(RiskLevel::Low.max(RiskLevel::High), RiskLevel::High);
    }

    #[test]
    fn test_dpa_issue_from_compliance_or_reason() {
        let contracts = crate::adapters::contracts::bundled_contracts().unwrap();
        let dpa: Vec<&str> = contracts
            .iter()
            .filter(|c| c.has_dpa_issue())
            .map(|c| c.id.as_str())
            .collect();

        assert_eq!(dpa, vec!["c2", "c5", "c8", "c10"]);
    }

    #[test]
    fn test_toggle_tile_twice_returns_to_all() {
        let mut filter = FilterConfiguration::default();
        filter.toggle_tile(TileFilter::HighRisk);
        assert_eq!(filter.tile, TileFilter::HighRisk);
        filter.toggle_tile(TileFilter::HighRisk);
        assert_eq!(filter.tile, TileFilter::All);
    }

    #[test]
    fn test_toggle_switches_between_tiles() {
        let mut filter = FilterConfiguration::default();
        filter.toggle_tile(TileFilter::Dpa);
        filter.toggle_tile(TileFilter::Spend);
        assert_eq!(filter.tile, TileFilter::Spend);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut filter = FilterConfiguration::default();
        filter.set_days_horizon(30);
        filter.set_region(RegionFilter::Only(Region::Apac));
        filter.toggle_tile(TileFilter::Dpa);

        filter.reset();

        assert_eq!(filter, FilterConfiguration::default());
        assert_eq!(filter.days_horizon, 90);
        assert_eq!(filter.region.to_string(), "All Regions");
    }

    #[test]
    fn test_region_filter_parsing() {
        assert_eq!("All Regions".parse::<RegionFilter>().unwrap(), RegionFilter::All);
        assert_eq!(
            "emea".parse::<RegionFilter>().unwrap(),
            RegionFilter::Only(Region::Emea)
        );
        assert!("LATAM".parse::<RegionFilter>().is_err());
    }

    #[test]
    fn test_tile_filter_parsing() {
        assert_eq!("high-risk".parse::<TileFilter>().unwrap(), TileFilter::HighRisk);
        assert_eq!("SPEND".parse::<TileFilter>().unwrap(), TileFilter::Spend);
        assert!("CHEAP".parse::<TileFilter>().is_err());
    }

    #[test]
    fn test_contract_wire_format() {
        let json = serde_json::json!({
            "id": "c9",
            "vendorName": "Acme",
            "contractName": "Widgets MSA",
            "renewalDate": "2025-03-01",
            "daysRemaining": 45,
            "value": "$1.2M",
            "commercialRisk": "Medium",
            "complianceRisk": "High",
            "riskReason": "Outdated DPA",
            "term": "12 Months",
            "uplift": "5%",
            "slaBreaches": 2,
            "noticePeriod": "60 Days",
            "type": "Auto-renew",
            "description": "Widgets",
            "region": "EMEA"
        });

        let contract: Contract = serde_json::from_value(json).unwrap();

        assert_eq!(contract.renewal_type, RenewalType::AutoRenew);
        assert_eq!(contract.region, Region::Emea);
        assert_eq!(contract.overall_risk(), RiskLevel::High);
        assert!(contract.has_dpa_issue());
    }

    #[test]
    fn test_copilot_message_renders_without_markup() {
        let message = CopilotMessage::Narration {
            vendor_name: "Acme".to_string(),
        };
        let text = message.to_string();
        assert_eq!(text, "Reviewing contract details for Acme...");
        assert!(!text.contains("**"));
    }
}
