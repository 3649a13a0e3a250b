use std::iter::FromIterator;
use std::ops::Index;

use serde::ser::SerializeMap;

/// Presence flag per building category, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct District {
    flags: Vec<(String, bool)>,
}

impl District {
    pub fn new() -> District {
        District::default()
    }

    /// Sets the flag of `building`, keeping its original position if it was already there.
    pub fn insert(&mut self, building: &str, present: bool) {
        match self.flags.iter_mut().find(|(name, _)| name == building) {
            Some((_, flag)) => *flag = present,
            None => self.flags.push((building.to_owned(), present)),
        }
    }

    pub fn get(&self, building: &str) -> Option<bool> {
        self.flags
            .iter()
            .find(|(name, _)| name == building)
            .map(|(_, present)| *present)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, present)| (name.as_str(), *present))
    }

    // Callers check the schema first, so the column always exists.
    #[inline]
    pub(crate) fn flag_at(&self, column: usize) -> bool {
        self.flags[column].1
    }
}

impl FromIterator<(String, bool)> for District {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> District {
        let mut district = District::new();
        for (building, present) in iter {
            district.insert(&building, present);
        }
        district
    }
}

impl<'a> Index<&'a str> for District {
    type Output = bool;

    fn index(&self, building: &'a str) -> &bool {
        match self.flags.iter().find(|(name, _)| name == building) {
            Some((_, present)) => present,
            None => panic!("Unknown building category: {}", building),
        }
    }
}

impl serde::Serialize for District {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.flags.len()))?;
        for (building, present) in &self.flags {
            map.serialize_entry(building, present)?;
        }
        map.end()
    }
}

/// Distance (in positions) to the nearest district with a category.
/// `None` means no district in the sequence has it.
pub type Distance = Option<usize>;

#[derive(Debug, PartialEq)]
pub struct FindResult<'a> {
    pub index: usize,
    pub district: &'a District,
    pub min_max_distance: usize,
}

/// Nearest distances for every category, laid out in the finder's category order.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    pub categories: Vec<String>,
    pub distances: Vec<Vec<Distance>>,
}

impl DistanceTable {
    pub fn num_districts(&self) -> usize {
        self.distances.first().map(Vec::len).unwrap_or(0)
    }

    pub fn for_category(&self, category: &str) -> Option<&[Distance]> {
        self.categories
            .iter()
            .position(|c| c == category)
            .map(|idx| self.distances[idx].as_slice())
    }

    /**
     * Worst served category for each district. Unreachable if any category is.
     */
    pub fn max_distances(&self) -> Vec<Distance> {
        (0..self.num_districts())
            .map(|i| {
                self.distances
                    .iter()
                    .try_fold(0, |max, column| column[i].map(|d| max.max(d)))
            })
            .collect()
    }
}
