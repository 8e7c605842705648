//! Pure derivations from (contracts, filter) to what the radar renders.
//!
//! Every function here is deterministic and keeps the input order of the
//! contract collection.

use crate::domain::model::{Contract, FilterConfiguration, RegionFilter, RiskLevel, TileFilter};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static MONEY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d*\.?\d+").expect("money token regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskSlice {
    pub level: RiskLevel,
    pub count: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub high_risk_count: usize,
    pub dpa_issue_count: usize,
    pub total_spend_millions: f64,
    pub formatted_total_spend: String,
    /// Ids of contracts whose value had no numeric token and counted as zero.
    pub malformed_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarView {
    pub filter: FilterConfiguration,
    pub rows: Vec<Contract>,
    pub distribution: [RiskSlice; 3],
    pub metrics: SummaryMetrics,
    pub visible_count: usize,
    pub context_count: usize,
}

/// The horizon/region sub-filter shared by the context and filtered sets.
pub fn by_horizon_and_region<'a>(
    contracts: &'a [Contract],
    days_horizon: i64,
    region: RegionFilter,
) -> impl Iterator<Item = &'a Contract> + 'a {
    contracts
        .iter()
        .filter(move |c| c.days_remaining <= days_horizon && region.matches(c.region))
}

/// Contracts in scope for the summary tiles, regardless of the active tile.
pub fn compute_context_set(
    contracts: &[Contract],
    days_horizon: i64,
    region: RegionFilter,
) -> Vec<&Contract> {
    by_horizon_and_region(contracts, days_horizon, region).collect()
}

/// Rows for the table and chart. Re-derived from the full collection.
pub fn compute_filtered_set<'a>(
    contracts: &'a [Contract],
    filter: &FilterConfiguration,
) -> Vec<&'a Contract> {
    by_horizon_and_region(contracts, filter.days_horizon, filter.region)
        .filter(|c| tile_matches(c, filter.tile))
        .collect()
}

/// Applies only the tile rule to an already horizon/region-filtered set.
pub fn narrow_by_tile<'a>(set: &[&'a Contract], tile: TileFilter) -> Vec<&'a Contract> {
    set.iter().copied().filter(|c| tile_matches(c, tile)).collect()
}

fn tile_matches(contract: &Contract, tile: TileFilter) -> bool {
    match tile {
        TileFilter::All | TileFilter::Spend => true,
        TileFilter::HighRisk => contract.is_high_risk(),
        TileFilter::Dpa => contract.has_dpa_issue(),
    }
}

/// Counts per overall risk, always in the order High, Medium, Low.
pub fn compute_risk_distribution(filtered: &[&Contract]) -> [RiskSlice; 3] {
    let mut slices = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low].map(|level| RiskSlice {
        level,
        count: 0,
        color: level.badge_color(),
    });

    for contract in filtered {
        let idx = match contract.overall_risk() {
            RiskLevel::High => 0,
            RiskLevel::Medium => 1,
            RiskLevel::Low => 2,
        };
        slices[idx].count += 1;
    }

    slices
}

pub fn compute_summary_metrics(context: &[&Contract]) -> SummaryMetrics {
    let mut high_risk_count = 0;
    let mut dpa_issue_count = 0;
    let mut total_spend_millions = 0.0;
    let mut malformed_values = Vec::new();

    for contract in context {
        if contract.is_high_risk() {
            high_risk_count += 1;
        }
        if contract.has_dpa_issue() {
            dpa_issue_count += 1;
        }

        match parse_value_millions(&contract.value) {
            Some(millions) => total_spend_millions += millions,
            None => {
                tracing::warn!(
                    "Contract {} has unparseable value '{}', counting it as zero spend",
                    contract.id,
                    contract.value
                );
                malformed_values.push(contract.id.clone());
            }
        }
    }

    SummaryMetrics {
        high_risk_count,
        dpa_issue_count,
        total_spend_millions,
        formatted_total_spend: format_millions(total_spend_millions),
        malformed_values,
    }
}

/// Reads a formatted money string as millions.
///
/// Takes the first decimal-number token; a literal `K` anywhere in the string
/// marks thousands. Returns `None` when there is no numeric token.
pub fn parse_value_millions(value: &str) -> Option<f64> {
    let token = MONEY_TOKEN.find(value)?;
    let number: f64 = token.as_str().parse().ok()?;
    if value.contains('K') {
        Some(number / 1000.0)
    } else {
        Some(number)
    }
}

/// Same as [`parse_value_millions`] with zero for malformed input.
pub fn value_contribution(value: &str) -> f64 {
    parse_value_millions(value).unwrap_or(0.0)
}

/// One decimal place, ties rounded away from zero (`1.25` is `$1.3M`).
pub fn format_millions(millions: f64) -> String {
    format!("${:.1}M", (millions * 10.0).round() / 10.0)
}

/// Runs every derivation for one filter state.
pub fn aggregate(contracts: &[Contract], filter: &FilterConfiguration) -> RadarView {
    let context = compute_context_set(contracts, filter.days_horizon, filter.region);
    let filtered = compute_filtered_set(contracts, filter);

    RadarView {
        filter: *filter,
        distribution: compute_risk_distribution(&filtered),
        metrics: compute_summary_metrics(&context),
        visible_count: filtered.len(),
        context_count: context.len(),
        rows: filtered.into_iter().cloned().collect(),
    }
}
