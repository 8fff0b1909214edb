//! Property tests for the synthetic generator.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use tickerlens_market_data::SyntheticDataGenerator;

proptest! {
    #[test]
    fn series_is_well_formed_for_any_seed(seed in any::<u64>(), minute in 0i64..1_000_000) {
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute);
        let series = SyntheticDataGenerator::new(seed).prices_ending_at("ANY", end);

        prop_assert_eq!(series.len(), 50);
        prop_assert_eq!(series[49].timestamp, end);
        for pair in series.windows(2) {
            prop_assert!(pair[0].timestamp < pair[1].timestamp);
        }
        for point in &series {
            prop_assert!(point.is_consistent());
            prop_assert!(point.close > 0.0);
        }
    }

    #[test]
    fn search_results_all_match(keyword in "[a-zA-Z]{1,4}") {
        let results = SyntheticDataGenerator::default().search(&keyword);
        prop_assert!(results.len() <= 5);
        for result in &results {
            prop_assert!(result.matches(&keyword));
        }
    }
}
