use renewal_radar::adapters::contracts::bundled_contracts;
use renewal_radar::core::aggregator::{
    aggregate, compute_context_set, compute_filtered_set, compute_risk_distribution,
    compute_summary_metrics,
};
use renewal_radar::domain::model::{
    Contract, FilterConfiguration, Region, RegionFilter, RiskLevel, TileFilter,
};
use renewal_radar::Radar;

const TILES: [TileFilter; 4] = [
    TileFilter::All,
    TileFilter::HighRisk,
    TileFilter::Dpa,
    TileFilter::Spend,
];

const REGIONS: [RegionFilter; 4] = [
    RegionFilter::All,
    RegionFilter::Only(Region::Emea),
    RegionFilter::Only(Region::Na),
    RegionFilter::Only(Region::Apac),
];

fn all_filters() -> Vec<FilterConfiguration> {
    let mut filters = Vec::new();
    for days_horizon in [0, 30, 60, 90, 365] {
        for region in REGIONS {
            for tile in TILES {
                filters.push(FilterConfiguration {
                    days_horizon,
                    region,
                    tile,
                });
            }
        }
    }
    filters
}

fn ids(set: &[&Contract]) -> Vec<String> {
    set.iter().map(|c| c.id.clone()).collect()
}

#[test]
fn test_default_radar_over_bundled_contracts() {
    let contracts = bundled_contracts().unwrap();
    let view = aggregate(&contracts, &FilterConfiguration::default());

    assert_eq!(view.context_count, 8);
    assert_eq!(view.visible_count, 8);
    assert_eq!(view.metrics.high_risk_count, 3);
    assert_eq!(view.metrics.dpa_issue_count, 2);
    assert!((view.metrics.total_spend_millions - 7.415).abs() < 1e-9);
    assert_eq!(view.metrics.formatted_total_spend, "$7.4M");
    assert!(view.metrics.malformed_values.is_empty());

    let counts: Vec<(RiskLevel, usize)> = view
        .distribution
        .iter()
        .map(|s| (s.level, s.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            (RiskLevel::High, 3),
            (RiskLevel::Medium, 3),
            (RiskLevel::Low, 2)
        ]
    );
}

#[test]
fn test_filtered_set_is_subset_of_context_set() {
    let contracts = bundled_contracts().unwrap();

    for filter in all_filters() {
        let context = compute_context_set(&contracts, filter.days_horizon, filter.region);
        let filtered = compute_filtered_set(&contracts, &filter);

        match filter.tile {
            TileFilter::All | TileFilter::Spend => assert_eq!(ids(&filtered), ids(&context)),
            TileFilter::HighRisk | TileFilter::Dpa => {
                let context_ids = ids(&context);
                assert!(ids(&filtered).iter().all(|id| context_ids.contains(id)));
            }
        }
    }
}

#[test]
fn test_distribution_counts_sum_to_filtered_size() {
    let contracts = bundled_contracts().unwrap();

    for filter in all_filters() {
        let filtered = compute_filtered_set(&contracts, &filter);
        let distribution = compute_risk_distribution(&filtered);

        assert_eq!(
            distribution.iter().map(|s| s.count).sum::<usize>(),
            filtered.len()
        );
        assert_eq!(
            distribution.map(|s| s.level),
            [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]
        );
    }
}

#[test]
fn test_aggregation_is_deterministic() {
    let contracts = bundled_contracts().unwrap();

    for filter in all_filters() {
        let first = serde_json::to_string(&aggregate(&contracts, &filter)).unwrap();
        let second = serde_json::to_string(&aggregate(&contracts, &filter)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_filtered_rows_keep_collection_order() {
    let contracts = bundled_contracts().unwrap();
    let position = |id: &str| contracts.iter().position(|c| c.id == id).unwrap();

    for filter in all_filters() {
        let filtered = compute_filtered_set(&contracts, &filter);
        let positions: Vec<usize> = filtered.iter().map(|c| position(&c.id)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_region_filter_is_exact() {
    let contracts = bundled_contracts().unwrap();
    let emea = RegionFilter::Only(Region::Emea);

    for tile in TILES {
        let filter = FilterConfiguration {
            days_horizon: 365,
            region: emea,
            tile,
        };
        let context = compute_context_set(&contracts, filter.days_horizon, filter.region);
        let filtered = compute_filtered_set(&contracts, &filter);

        assert!(context.iter().all(|c| c.region == Region::Emea));
        assert!(filtered.iter().all(|c| c.region == Region::Emea));
    }

    let context = compute_context_set(&contracts, 90, emea);
    assert_eq!(ids(&context), vec!["c1", "c2", "c7"]);
    let metrics = compute_summary_metrics(&context);
    assert_eq!(metrics.high_risk_count, 2);
    assert_eq!(metrics.dpa_issue_count, 1);
    assert_eq!(metrics.formatted_total_spend, "$2.1M");
}

#[test]
fn test_tiles_narrow_bundled_rows() {
    let contracts = bundled_contracts().unwrap();
    let mut filter = FilterConfiguration::default();

    filter.toggle_tile(TileFilter::HighRisk);
    assert_eq!(
        ids(&compute_filtered_set(&contracts, &filter)),
        vec!["c1", "c2", "c4"]
    );

    filter.toggle_tile(TileFilter::Dpa);
    assert_eq!(
        ids(&compute_filtered_set(&contracts, &filter)),
        vec!["c2", "c5"]
    );

    filter.set_days_horizon(365);
    assert_eq!(
        ids(&compute_filtered_set(&contracts, &filter)),
        vec!["c2", "c5", "c8", "c10"]
    );
}

#[test]
fn test_high_risk_tile_toggle_returns_to_all() {
    let mut radar = Radar::new(bundled_contracts().unwrap());

    radar.toggle_tile(TileFilter::HighRisk);
    assert_eq!(radar.view().visible_count, 3);

    radar.toggle_tile(TileFilter::HighRisk);
    assert_eq!(radar.filter().tile, TileFilter::All);
    assert_eq!(radar.view().visible_count, 8);
}

#[test]
fn test_metrics_stay_stable_across_tiles() {
    let mut radar = Radar::new(bundled_contracts().unwrap());
    let baseline = radar.view().metrics.clone();

    for tile in [TileFilter::HighRisk, TileFilter::Dpa, TileFilter::Spend] {
        radar.toggle_tile(tile);
        assert_eq!(radar.view().metrics, baseline);
    }
}
