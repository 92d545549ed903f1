//! Plant record type
//!
//! One row of the catalog CSV. The serde renames carry the original CSV
//! headers, which are also the field names clients see in JSON responses,
//! so a record round-trips between the dataset and the API unchanged.

use serde::{Deserialize, Serialize};

/// A single catalog row. Every attribute is free text; blank cells
/// deserialize to empty strings rather than failing the load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantRecord {
    #[serde(rename = "English Name", default)]
    pub english_name: String,

    /// Unique identifier within the catalog; the favorites filter keys on it.
    #[serde(rename = "Botanical Name", default)]
    pub botanical_name: String,

    #[serde(rename = "Plant Family", default)]
    pub plant_family: String,

    #[serde(rename = "Strata", default)]
    pub strata: String,

    #[serde(rename = "Lifecycle", default)]
    pub lifecycle: String,

    #[serde(rename = "Time-to-Maturity", default)]
    pub time_to_maturity: String,

    #[serde(rename = "Lifespan", default)]
    pub lifespan: String,

    #[serde(rename = "Zone", default)]
    pub zone: String,

    #[serde(rename = "Origin", default)]
    pub origin: String,

    #[serde(rename = "Function", default)]
    pub function: String,

    #[serde(rename = "Spacing", default)]
    pub spacing: String,

    #[serde(rename = "Image Name", default)]
    pub image_name: String,

    #[serde(rename = "Image Prompt", default)]
    pub image_prompt: String,
}
