use super::district_finder::{District, DistrictFinderError, OptimalDistrictFinder};
use super::memory_tracking;

use std::time;

use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DistrictReport {
    pub optimal_district_index: usize,
    pub optimal_district_object: District,
    pub min_max_distance: usize,
    pub num_districts: usize,
    /// Milliseconds.
    pub execution_time: f64,
    /// KB of heap growth during the run, measured while the distance table is alive.
    pub memory_used: f64,
    /// KB, process-wide heap peak.
    pub peak_memory: f64,
}

#[inline]
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/**
 * Runs the finder, timing it and reading the heap counters of `memory_tracking`.
 * The memory fields are zero unless `CountingAllocator` is the global allocator.
 * The selection is the same one `OptimalDistrictFinder::find` returns.
 */
pub fn run_instrumented(districts: &[District]) -> Result<DistrictReport, DistrictFinderError> {
    let start_memory = memory_tracking::allocated_bytes();
    let start_instant = time::Instant::now();

    let finder = OptimalDistrictFinder::new(districts)?;
    let table = finder.distance_table();
    let result = finder.find_in_table(&table)?;

    let elapsed = start_instant.elapsed();
    let elapsed_millis = elapsed.as_secs_f64() * 1000.0;
    let end_memory = memory_tracking::allocated_bytes();
    let peak_memory = memory_tracking::peak_bytes();
    // Other threads may free memory meanwhile, so the delta can be negative.
    let memory_used = end_memory as f64 - start_memory as f64;

    info!(
        "Processed {} districts with {} categories in {} seconds",
        districts.len(),
        finder.categories().len(),
        elapsed.as_secs_f64()
    );

    Ok(DistrictReport {
        optimal_district_index: result.index,
        optimal_district_object: result.district.clone(),
        min_max_distance: result.min_max_distance,
        num_districts: districts.len(),
        execution_time: round_to(elapsed_millis, 4),
        memory_used: round_to(memory_used / 1024.0, 2),
        peak_memory: round_to(peak_memory as f64 / 1024.0, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::district_data::{generate_district_data, static_example_data};
    use crate::district_finder::find_optimal_district;
    use assert_matches::assert_matches;
    use indicatif::ProgressBar;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn it_should_report_the_static_example() {
        let districts = static_example_data();

        let report = run_instrumented(&districts).unwrap();

        assert_eq!(report.optimal_district_index, 1);
        assert_eq!(report.min_max_distance, 1);
        assert_eq!(report.optimal_district_object, districts[1]);
        assert_eq!(report.num_districts, 5);
        assert!(report.execution_time >= 0.0);
        assert!(report.peak_memory > 0.0);
    }

    #[test]
    fn it_should_select_the_same_district_as_the_finder() {
        let mut rng = StdRng::seed_from_u64(21);
        let districts = generate_district_data(5000, &mut rng, &ProgressBar::hidden());

        let report = run_instrumented(&districts).unwrap();
        let result = find_optimal_district(&districts).unwrap();

        assert_eq!(report.optimal_district_index, result.index);
        assert_eq!(report.min_max_distance, result.min_max_distance);
    }

    #[test]
    fn it_should_propagate_finder_errors() {
        let result = run_instrumented(&[]);

        assert_matches!(result, Err(DistrictFinderError::EmptyInput));
    }

    #[test]
    fn it_should_serialize_the_report() {
        let report = run_instrumented(&static_example_data()).unwrap();

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["optimal_district_index"], 1);
        assert_eq!(json["min_max_distance"], 1);
        assert_eq!(json["optimal_district_object"]["hospital"], false);
    }

    #[test]
    fn it_should_keep_the_building_order_in_the_report() {
        let report = run_instrumented(&static_example_data()).unwrap();

        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains(
            r#""optimal_district_object":{"hospital":false,"school":false,"restaurant":false,"gym":false}"#
        ));
    }

    #[test]
    fn it_should_measure_a_peak_covering_the_distance_table() {
        let mut rng = StdRng::seed_from_u64(34);
        let districts = generate_district_data(5000, &mut rng, &ProgressBar::hidden());
        let table_bytes = 5000 * 4 * std::mem::size_of::<Option<usize>>();

        let report = run_instrumented(&districts).unwrap();

        assert!(report.peak_memory * 1024.0 >= table_bytes as f64);
    }

    #[test]
    fn it_should_round_values() {
        assert_eq!(round_to(1.23456789, 4), 1.2346);
        assert_eq!(round_to(2.005, 0), 2.0);
    }
}
