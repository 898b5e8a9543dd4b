//! Compliance report types.
//!
//! These are the payloads handed to downstream collaborators: the
//! notification message and the metric counters. Key names are fixed by the
//! consumers and must not change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metric name for the number of persons wearing any equipment.
pub const EQUIPPED_METRIC: &str = "PersonsWithSafetyEquip1";
/// Metric name for the number of persons wearing no equipment.
pub const UNEQUIPPED_METRIC: &str = "PersonsWithoutSafetyEquip1";

/// JSON-serializable summary of one audited image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComplianceReport {
    /// Human-readable summary, identical to `Stats::render_summary`.
    pub message: String,
    /// Opaque link to the source image.
    pub image_url: String,
    pub population_size: usize,
    pub unequipped_size: usize,
    /// One entry per person, in population order.
    pub equipment_per_person: Vec<PersonEquipment>,
    /// Person indices (as strings) per configured category. Categories
    /// nobody wears are present with an empty list.
    pub persons_per_equipment: BTreeMap<String, Vec<String>>,
}

/// Equipment worn by one person.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEquipment {
    pub ind: usize,
    /// Category names, sorted.
    pub equipment: Vec<String>,
}

/// A single scalar counter for the metrics collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDatum {
    pub metric_name: String,
    pub value: usize,
    pub unit: String,
}

impl MetricDatum {
    /// Creates a counter measured in `Count` units.
    pub fn count(metric_name: impl Into<String>, value: usize) -> Self {
        Self {
            metric_name: metric_name.into(),
            value,
            unit: "Count".to_string(),
        }
    }
}
