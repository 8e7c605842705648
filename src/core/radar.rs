use crate::core::aggregator::{self, RadarView};
use crate::domain::model::{Contract, FilterConfiguration, RegionFilter, TileFilter};
use crate::utils::error::{RadarError, Result};

/// Owns the contract collection and the live filter, and caches the last view.
pub struct Radar {
    contracts: Vec<Contract>,
    filter: FilterConfiguration,
    cache: Option<RadarView>,
    recomputations: usize,
}

impl Radar {
    pub fn new(contracts: Vec<Contract>) -> Self {
        Self::with_filter(contracts, FilterConfiguration::default())
    }

    pub fn with_filter(contracts: Vec<Contract>, filter: FilterConfiguration) -> Self {
        Self {
            contracts,
            filter,
            cache: None,
            recomputations: 0,
        }
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn filter(&self) -> &FilterConfiguration {
        &self.filter
    }

    pub fn find(&self, id: &str) -> Result<&Contract> {
        self.contracts
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| RadarError::NotFound { id: id.to_string() })
    }

    /// The view for the current filter, recomputed only when the filter changed.
    pub fn view(&mut self) -> &RadarView {
        let fresh = matches!(&self.cache, Some(view) if view.filter == self.filter);
        if !fresh {
            tracing::debug!("Recomputing radar view for {:?}", self.filter);
            self.recomputations += 1;
            self.cache = Some(aggregator::aggregate(&self.contracts, &self.filter));
        }
        self.cache.as_ref().expect("cache populated above")
    }

    /// How many times the view has actually been recomputed.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn toggle_tile(&mut self, tile: TileFilter) {
        self.filter.toggle_tile(tile);
    }

    pub fn clear_tile(&mut self) {
        self.filter.clear_tile();
    }

    pub fn set_days_horizon(&mut self, days: i64) {
        self.filter.set_days_horizon(days);
    }

    pub fn set_region(&mut self, region: RegionFilter) {
        self.filter.set_region(region);
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
    }
}
