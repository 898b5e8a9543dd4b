#![allow(dead_code)]

use ppe_audit::scene::{make_bounding_box, BoundingBox, EquipmentBoxes, Person};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const CATEGORIES: [&str; 4] = ["helmet", "vest", "mask", "boot"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A box as the provider would report it: any corner in the unit square and
/// a size that may be negative (malformed) or zero.
pub fn arb_bbox() -> BoxedStrategy<BoundingBox> {
    (0.0f64..1.0, 0.0f64..1.0, -0.5f64..0.5, -0.5f64..0.5)
        .prop_map(|(left, top, width, height)| make_bounding_box(width, height, left, top))
        .boxed()
}

/// A box with strictly positive width and height.
pub fn arb_solid_bbox() -> BoxedStrategy<BoundingBox> {
    (0.0f64..0.9, 0.0f64..0.9, 0.01f64..0.5, 0.01f64..0.5)
        .prop_map(|(left, top, width, height)| make_bounding_box(width, height, left, top))
        .boxed()
}

pub fn arb_population(max_persons: usize) -> BoxedStrategy<Vec<Person>> {
    proptest::collection::vec(arb_solid_bbox(), 0..=max_persons)
        .prop_map(|boxes| boxes.into_iter().map(Person::new).collect())
        .boxed()
}

pub fn arb_equipment(max_boxes: usize) -> BoxedStrategy<EquipmentBoxes> {
    proptest::collection::vec((0..CATEGORIES.len(), arb_solid_bbox()), 0..=max_boxes)
        .prop_map(|entries| {
            let mut equipment = EquipmentBoxes::new();
            for (category, bbox) in entries {
                equipment.push(CATEGORIES[category], bbox);
            }
            equipment
        })
        .boxed()
}
