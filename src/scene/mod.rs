//! Scene representation for a single audited image.
//!
//! This module defines the geometric model (intervals and bounding boxes,
//! plus the overlap predicate) and the two collections the pipeline passes
//! around: the population of detected [`Person`]s and the detected
//! [`EquipmentBoxes`] grouped by canonical category.
//!
//! # Example
//!
//! ```
//! use ppe_audit::scene::{boxes_intersect, make_bounding_box, EquipmentBoxes, Person};
//!
//! let person = Person::new(make_bounding_box(0.5, 0.5, 0.0, 0.0));
//! let mut equipment = EquipmentBoxes::new();
//! equipment.push("boot", make_bounding_box(0.1, 0.1, 0.1, 0.1));
//!
//! assert!(boxes_intersect(&person.bounding_box, &equipment.boxes("boot")[0]));
//! ```

mod bbox;
mod model;

pub use bbox::{boxes_intersect, intervals_intersect, make_bounding_box, BoundingBox, Interval};
pub use model::{EquipmentBoxes, Person};
