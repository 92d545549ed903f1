//! Filter categories
//!
//! The nine columns clients can constrain a query by, with their wire keys
//! and presentation ordering.

use serde::{Deserialize, Serialize};
use vd_types::PlantRecord;

use crate::sort_keys;

/// One attribute column usable as a multi-select query constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    PlantFamily,
    Strata,
    Lifecycle,
    TimeToMaturity,
    Lifespan,
    Zone,
    Origin,
    Function,
    Spacing,
}

impl FilterCategory {
    /// All categories, in the order the filters endpoint lists them.
    pub const ALL: [FilterCategory; 9] = [
        FilterCategory::PlantFamily,
        FilterCategory::Strata,
        FilterCategory::Lifecycle,
        FilterCategory::TimeToMaturity,
        FilterCategory::Lifespan,
        FilterCategory::Zone,
        FilterCategory::Origin,
        FilterCategory::Function,
        FilterCategory::Spacing,
    ];

    /// Query-string parameter and response key for this category.
    pub fn wire_key(self) -> &'static str {
        match self {
            FilterCategory::PlantFamily => "plant_family",
            FilterCategory::Strata => "strata",
            FilterCategory::Lifecycle => "lifecycle",
            FilterCategory::TimeToMaturity => "time_to_maturity",
            FilterCategory::Lifespan => "lifespan",
            FilterCategory::Zone => "zone",
            FilterCategory::Origin => "origin",
            FilterCategory::Function => "function",
            FilterCategory::Spacing => "spacing",
        }
    }

    /// Look up a category by its wire key.
    pub fn from_wire_key(key: &str) -> Option<FilterCategory> {
        FilterCategory::ALL
            .into_iter()
            .find(|category| category.wire_key() == key)
    }

    /// The raw attribute value of `plant` for this category.
    pub fn value(self, plant: &PlantRecord) -> &str {
        match self {
            FilterCategory::PlantFamily => &plant.plant_family,
            FilterCategory::Strata => &plant.strata,
            FilterCategory::Lifecycle => &plant.lifecycle,
            FilterCategory::TimeToMaturity => &plant.time_to_maturity,
            FilterCategory::Lifespan => &plant.lifespan,
            FilterCategory::Zone => &plant.zone,
            FilterCategory::Origin => &plant.origin,
            FilterCategory::Function => &plant.function,
            FilterCategory::Spacing => &plant.spacing,
        }
    }

    /// Order a column's distinct values for presentation. Strata, maturity,
    /// lifespan and spacing use their domain sort key; the rest sort
    /// lexically. All sorts are stable, so equal keys keep first-seen order.
    pub(crate) fn sort_values(self, values: &mut [String]) {
        match self {
            FilterCategory::Strata => values.sort_by_key(|v| sort_keys::strata_rank(v)),
            FilterCategory::TimeToMaturity => values.sort_by(|a, b| {
                sort_keys::cmp_range(sort_keys::maturity_key(a), sort_keys::maturity_key(b))
            }),
            FilterCategory::Lifespan => values.sort_by(|a, b| {
                sort_keys::cmp_range(sort_keys::lifespan_key(a), sort_keys::lifespan_key(b))
            }),
            FilterCategory::Spacing => values.sort_by(|a, b| {
                sort_keys::cmp_range(sort_keys::spacing_key(a), sort_keys::spacing_key(b))
            }),
            _ => values.sort(),
        }
    }
}

/// Distinct non-empty values per filterable column, each in display order.
/// Serializes with the wire keys clients expect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub plant_family: Vec<String>,
    pub strata: Vec<String>,
    pub lifecycle: Vec<String>,
    pub time_to_maturity: Vec<String>,
    pub lifespan: Vec<String>,
    pub zone: Vec<String>,
    pub origin: Vec<String>,
    pub function: Vec<String>,
    pub spacing: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keys_round_trip() {
        for category in FilterCategory::ALL {
            assert_eq!(
                FilterCategory::from_wire_key(category.wire_key()),
                Some(category)
            );
        }
        assert_eq!(FilterCategory::from_wire_key("petal_count"), None);
    }

    #[test]
    fn test_filter_options_serialize_in_category_order() {
        let json = serde_json::to_string(&FilterOptions::default()).unwrap();
        let mut last = 0;
        for category in FilterCategory::ALL {
            let pos = json
                .find(&format!("\"{}\"", category.wire_key()))
                .expect("wire key present");
            assert!(pos >= last, "{} out of order", category.wire_key());
            last = pos;
        }
    }
}
