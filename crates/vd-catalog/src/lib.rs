//! In-memory plant catalog
//!
//! The catalog is loaded from CSV once at process start and never mutated;
//! the whole table is re-filtered per query, which is fine at a few hundred
//! rows. A missing dataset degrades to an empty catalog rather than an
//! error, so the service comes up regardless.

pub mod filters;
pub mod query;
pub mod sort_keys;

pub use filters::{FilterCategory, FilterOptions};
pub use query::PlantQuery;

use std::path::Path;

use tracing::{info, warn};
use vd_types::{AppResult, PlantRecord};

/// The loaded plant table. Read-only after construction.
#[derive(Debug, Default)]
pub struct Catalog {
    plants: Vec<PlantRecord>,
}

impl Catalog {
    /// Load the catalog from a CSV file. Any load failure is logged and
    /// yields an empty catalog; queries against it return empty results.
    pub fn load(path: &Path) -> Self {
        match read_records(path) {
            Ok(plants) => {
                info!("Loaded {} plants from {}", plants.len(), path.display());
                Self { plants }
            }
            Err(e) => {
                warn!(
                    "Failed to load catalog from {}: {} - starting with an empty dataset",
                    path.display(),
                    e
                );
                Self { plants: Vec::new() }
            }
        }
    }

    /// Build a catalog from already-loaded records.
    pub fn from_records(plants: Vec<PlantRecord>) -> Self {
        Self { plants }
    }

    pub fn plants(&self) -> &[PlantRecord] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Distinct non-empty values for every filterable column, each ordered
    /// for presentation.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            plant_family: self.distinct_values(FilterCategory::PlantFamily),
            strata: self.distinct_values(FilterCategory::Strata),
            lifecycle: self.distinct_values(FilterCategory::Lifecycle),
            time_to_maturity: self.distinct_values(FilterCategory::TimeToMaturity),
            lifespan: self.distinct_values(FilterCategory::Lifespan),
            zone: self.distinct_values(FilterCategory::Zone),
            origin: self.distinct_values(FilterCategory::Origin),
            function: self.distinct_values(FilterCategory::Function),
            spacing: self.distinct_values(FilterCategory::Spacing),
        }
    }

    /// Rows matching `query`, in original catalog order.
    pub fn query(&self, query: &PlantQuery) -> Vec<&PlantRecord> {
        self.plants.iter().filter(|p| query.matches(p)).collect()
    }

    fn distinct_values(&self, category: FilterCategory) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for plant in &self.plants {
            let value = category.value(plant);
            if !value.is_empty() && !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
        category.sort_values(&mut values);
        values
    }
}

fn read_records(path: &Path) -> AppResult<Vec<PlantRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut plants = Vec::new();
    for record in reader.deserialize() {
        plants.push(record?);
    }
    Ok(plants)
}
