//! Plant queries
//!
//! Free-text search, the favorites view, and per-category value filters.
//! Selections within one category are OR'd; everything else combines with
//! AND. Empty members impose no constraint.

use vd_types::PlantRecord;

use crate::filters::FilterCategory;

/// A query over the catalog.
#[derive(Debug, Clone, Default)]
pub struct PlantQuery {
    /// Case-insensitive substring matched against the English or botanical
    /// name.
    pub search: Option<String>,

    /// Restrict to rows with one of these botanical names (favorites).
    pub ids: Vec<String>,

    /// Selected values per category.
    pub selections: Vec<(FilterCategory, Vec<String>)>,
}

impl PlantQuery {
    /// Whether `plant` satisfies every constraint of this query.
    pub fn matches(&self, plant: &PlantRecord) -> bool {
        if !self.ids.is_empty() && !self.ids.iter().any(|id| id == &plant.botanical_name) {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !needle.is_empty()
                && !plant.english_name.to_lowercase().contains(&needle)
                && !plant.botanical_name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        self.selections.iter().all(|(category, values)| {
            values.is_empty() || values.iter().any(|v| v == category.value(plant))
        })
    }
}
