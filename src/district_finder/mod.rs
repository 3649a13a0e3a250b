mod district_finder_types;
mod optimal_district_finder;

pub use district_finder_types::{Distance, DistanceTable, District, FindResult};
pub use optimal_district_finder::{find_optimal_district, DistrictFinderError, OptimalDistrictFinder};
