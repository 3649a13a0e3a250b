use super::district_finder::District;

use indicatif::ProgressBar;
use rand::Rng;

pub const BUILDING_TYPES: [&str; 4] = ["hospital", "school", "restaurant", "gym"];

// Progress bar updates are batched, drawing on every district is too slow for big datasets.
const PROGRESS_CHUNK: usize = 1000;

/// Builds a district from 0/1 flags. Any non zero value means present.
pub fn district_from_flags(flags: &[(&str, u8)]) -> District {
    flags
        .iter()
        .map(|(building, flag)| (building.to_string(), *flag != 0))
        .collect()
}

pub fn generate_district_data<R: Rng>(
    num_districts: usize,
    rng: &mut R,
    progress_bar: &ProgressBar,
) -> Vec<District> {
    let mut districts = Vec::with_capacity(num_districts);

    for i in 0..num_districts {
        let district: District = BUILDING_TYPES
            .iter()
            .map(|building| (building.to_string(), rng.gen_bool(0.5)))
            .collect();
        districts.push(district);

        if (i + 1) % PROGRESS_CHUNK == 0 {
            progress_bar.inc(PROGRESS_CHUNK as u64);
        }
    }

    progress_bar.inc((num_districts % PROGRESS_CHUNK) as u64);
    progress_bar.finish();

    districts
}

pub fn static_example_data() -> Vec<District> {
    vec![
        district_from_flags(&[("hospital", 1), ("school", 0), ("restaurant", 0), ("gym", 1)]),
        district_from_flags(&[("hospital", 0), ("school", 0), ("restaurant", 0), ("gym", 0)]),
        district_from_flags(&[("hospital", 1), ("school", 1), ("restaurant", 1), ("gym", 0)]),
        district_from_flags(&[("hospital", 0), ("school", 0), ("restaurant", 1), ("gym", 0)]),
        district_from_flags(&[("hospital", 1), ("school", 0), ("restaurant", 1), ("gym", 1)]),
    ]
}
