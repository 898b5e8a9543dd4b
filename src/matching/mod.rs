//! Equipment-to-person assignment.
//!
//! Every equipment box is tested against every person box. Each person whose
//! box intersects receives the box's category. There is no tie-break: a box
//! overlapping several persons is given to all of them and an
//! [`MatchDiagnostic::AmbiguousAssignment`] is recorded. Per-image
//! cardinalities are tens of boxes, so the exhaustive pairwise test is fine.

mod report;

pub use report::{MatchDiagnostic, MatchReport};

use crate::scene::{boxes_intersect, EquipmentBoxes, Person};

/// Assigns equipment categories to persons in place.
///
/// Only adds to each person's equipment set. Persons matching nothing keep
/// an empty set, and boxes matching nobody are dropped.
pub fn match_equipment(population: &mut [Person], equipment: &EquipmentBoxes) -> MatchReport {
    let mut report = MatchReport::new();

    for (category, boxes) in equipment.iter() {
        for (box_index, bbox) in boxes.iter().enumerate() {
            report.boxes_tested += 1;

            let mut wearers = Vec::new();
            for (position, person) in population.iter_mut().enumerate() {
                if boxes_intersect(&person.bounding_box, bbox) {
                    person.equipment.insert(category.to_string());
                    wearers.push(position);
                }
            }

            match wearers.len() {
                0 => report.boxes_unworn += 1,
                1 => report.boxes_assigned += 1,
                n => {
                    report.boxes_assigned += 1;
                    log::warn!("One {} assigned to {} persons.", category, n);
                    report.diagnostics.push(MatchDiagnostic::AmbiguousAssignment {
                        category: category.to_string(),
                        box_index,
                        persons: wearers,
                    });
                }
            }
        }
    }

    report
}
