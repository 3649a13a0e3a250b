use failure::Fail;

use super::district_finder_types::{Distance, DistanceTable, District, FindResult};

use log::{debug, info};

#[derive(Debug, Fail, PartialEq)]
pub enum DistrictFinderError {
    #[fail(display = "District data cannot be empty")]
    EmptyInput,
    #[fail(display = "District data has no building categories")]
    NoCategories,
    #[fail(
        display = "District {} has categories {:?}, expected {:?}",
        index, found, expected
    )]
    InconsistentSchema {
        index: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[fail(display = "No district offers the categories {:?}", missing)]
    NoValidOptimum { missing: Vec<String> },
}

pub struct OptimalDistrictFinder<'a> {
    districts: &'a [District],
    // Fixed from the first district and reused for every other one.
    categories: Vec<String>,
}

impl<'a> OptimalDistrictFinder<'a> {
    pub fn new(districts: &'a [District]) -> Result<OptimalDistrictFinder<'a>, DistrictFinderError> {
        let first = districts.first().ok_or(DistrictFinderError::EmptyInput)?;

        let categories: Vec<String> = first.categories().map(String::from).collect();
        if categories.is_empty() {
            return Err(DistrictFinderError::NoCategories);
        }

        for (index, district) in districts.iter().enumerate().skip(1) {
            // Same categories in the same order, so columns line up across districts.
            let same_schema = district.len() == categories.len()
                && district.categories().zip(categories.iter()).all(|(a, b)| a == b.as_str());

            if !same_schema {
                return Err(DistrictFinderError::InconsistentSchema {
                    index,
                    expected: categories.clone(),
                    found: district.categories().map(String::from).collect(),
                });
            }
        }

        Ok(OptimalDistrictFinder {
            districts,
            categories,
        })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /**
     * Distance from every district to the nearest one (itself included) offering `category`.
     * Two linear passes: left to right, then right to left keeping the minimum.
     */
    pub fn nearest_distances(&self, category: &str) -> Option<Vec<Distance>> {
        let column = self.categories.iter().position(|c| c == category)?;

        let has_category = |i: usize| self.districts[i].flag_at(column);
        let num_districts = self.districts.len();
        let mut distances: Vec<Distance> = vec![None; num_districts];

        let mut last_seen: Option<usize> = None;
        for i in 0..num_districts {
            if has_category(i) {
                last_seen = Some(i);
            }
            distances[i] = last_seen.map(|seen| i - seen);
        }

        last_seen = None;
        for i in (0..num_districts).rev() {
            if has_category(i) {
                last_seen = Some(i);
            }
            if let Some(seen) = last_seen {
                let candidate = seen - i;
                distances[i] = Some(distances[i].map_or(candidate, |d| d.min(candidate)));
            }
        }

        Some(distances)
    }

    pub fn distance_table(&self) -> DistanceTable {
        let distances = self
            .categories
            .iter()
            .filter_map(|category| self.nearest_distances(category))
            .collect();

        DistanceTable {
            categories: self.categories.clone(),
            distances,
        }
    }

    pub fn find(&self) -> Result<FindResult<'a>, DistrictFinderError> {
        let table = self.distance_table();
        self.find_in_table(&table)
    }

    pub(crate) fn find_in_table(
        &self,
        table: &DistanceTable,
    ) -> Result<FindResult<'a>, DistrictFinderError> {
        let mut best: Option<(usize, usize)> = None;

        for (index, max_distance) in table.max_distances().into_iter().enumerate() {
            let max_distance = match max_distance {
                Some(d) => d,
                None => continue,
            };

            // Only strictly smaller values win, so ties keep the first index.
            match best {
                Some((_, best_distance)) if best_distance <= max_distance => {}
                _ => best = Some((index, max_distance)),
            }
        }

        match best {
            Some((index, min_max_distance)) => {
                debug!(
                    "Optimal district {} with max distance {}",
                    index, min_max_distance
                );
                Ok(FindResult {
                    index,
                    district: &self.districts[index],
                    min_max_distance,
                })
            }
            None => {
                let missing: Vec<String> = self
                    .categories
                    .iter()
                    .enumerate()
                    .filter(|(column, _)| !self.districts.iter().any(|d| d.flag_at(*column)))
                    .map(|(_, category)| category.clone())
                    .collect();
                info!("No district offers {:?}", missing);
                Err(DistrictFinderError::NoValidOptimum { missing })
            }
        }
    }
}

pub fn find_optimal_district(districts: &[District]) -> Result<FindResult, DistrictFinderError> {
    OptimalDistrictFinder::new(districts)?.find()
}
