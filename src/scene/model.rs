//! Scene model: detected persons and equipment boxes for one image.

use std::collections::{BTreeMap, BTreeSet};

use super::bbox::BoundingBox;

/// A detected human candidate.
///
/// `index` stays `None` until the population is frozen into
/// [`Stats`](crate::stats::Stats), which assigns each person its position
/// in the population. The index carries no positional meaning on the image:
/// person 0 may stand between persons 1 and 2.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    /// Position in the accepted population, once frozen.
    pub index: Option<usize>,

    /// Region of the image occupied by this person.
    pub bounding_box: BoundingBox,

    /// Canonical equipment categories this person wears.
    ///
    /// Ordered, so iteration and rendering are alphabetical.
    pub equipment: BTreeSet<String>,

    /// Detector score (0-100), informational only.
    pub confidence: Option<f64>,
}

impl Person {
    /// Creates a new person with no equipment.
    pub fn new(bounding_box: BoundingBox) -> Self {
        Self {
            index: None,
            bounding_box,
            equipment: BTreeSet::new(),
            confidence: None,
        }
    }

    /// Sets the detector confidence (builder pattern).
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Returns true if the person wears at least one equipment category.
    pub fn is_equipped(&self) -> bool {
        !self.equipment.is_empty()
    }

    /// Returns true if the person wears the given category.
    pub fn wears(&self, category: &str) -> bool {
        self.equipment.contains(category)
    }
}

/// Equipment boxes grouped by canonical category name.
///
/// Boxes keep the order in which the detectors reported them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EquipmentBoxes {
    groups: BTreeMap<String, Vec<BoundingBox>>,
}

impl EquipmentBoxes {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a box under a category.
    pub fn push(&mut self, category: impl Into<String>, bounding_box: BoundingBox) {
        self.groups
            .entry(category.into())
            .or_default()
            .push(bounding_box);
    }

    /// Returns the boxes recorded for a category (empty if none).
    pub fn boxes(&self, category: &str) -> &[BoundingBox] {
        self.groups.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over `(category, boxes)` groups in category name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[BoundingBox])> {
        self.groups
            .iter()
            .map(|(category, boxes)| (category.as_str(), boxes.as_slice()))
    }

    /// Returns the category names that have at least one box.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Total number of boxes across all categories.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_starts_unequipped() {
        let person = Person::new(BoundingBox::from_ltwh(0.0, 0.0, 0.5, 0.5)).with_confidence(98.5);
        assert_eq!(person.index, None);
        assert_eq!(person.confidence, Some(98.5));
        assert!(!person.is_equipped());
        assert!(!person.wears("helmet"));
    }

    #[test]
    fn test_equipment_boxes_grouping() {
        let mut equipment = EquipmentBoxes::new();
        assert!(equipment.is_empty());

        equipment.push("vest", BoundingBox::from_ltwh(0.0, 0.0, 0.1, 0.1));
        equipment.push("helmet", BoundingBox::from_ltwh(0.2, 0.2, 0.1, 0.1));
        equipment.push("vest", BoundingBox::from_ltwh(0.4, 0.4, 0.1, 0.1));

        assert_eq!(equipment.len(), 3);
        assert_eq!(equipment.boxes("vest").len(), 2);
        assert_eq!(equipment.boxes("mask").len(), 0);
        let categories: Vec<&str> = equipment.categories().collect();
        assert_eq!(categories, vec!["helmet", "vest"]);
    }
}
