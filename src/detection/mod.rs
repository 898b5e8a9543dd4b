//! Detection parsing.
//!
//! Turns provider label records into the two typed collections the matcher
//! works on: the candidate [`Person`] population and the candidate
//! [`EquipmentBoxes`] grouped by canonical category. Several label sources
//! (the general detector and any number of specialized detectors) feed the
//! same category buckets.
//!
//! Noisy detector output is expected and never an error here:
//! - person instances without a box or a confidence are skipped,
//! - equipment instances without a box are skipped,
//! - labels matching neither a person nor an enabled category are ignored.

mod schema;

pub use schema::{BoxRecord, CustomLabel, DetectionDocument, Geometry, Instance, Label};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::AuditConfig;
use crate::error::PpeAuditError;
use crate::scene::{EquipmentBoxes, Person};

/// Persons and equipment found in one image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Detections {
    /// Candidate persons, in detection order.
    pub persons: Vec<Person>,
    /// Candidate equipment boxes by category.
    pub equipment: EquipmentBoxes,
}

impl Detections {
    /// Creates an empty detection set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every label of a document to this detection set.
    pub fn extend_from_document(&mut self, document: &DetectionDocument, config: &AuditConfig) {
        parse_general_labels(&document.labels, config, self);
        parse_custom_labels(&document.custom_labels, config, self);
    }
}

/// Parses a set of documents describing the same image.
///
/// Documents are merged in order, so persons keep the order in which the
/// detectors reported them.
pub fn parse_documents<'a>(
    documents: impl IntoIterator<Item = &'a DetectionDocument>,
    config: &AuditConfig,
) -> Detections {
    let mut detections = Detections::new();
    for document in documents {
        detections.extend_from_document(document, config);
    }
    detections
}

/// Parses labels from the general multi-class detector.
///
/// Person matching takes precedence: a label that is a person synonym is
/// never also treated as equipment.
pub fn parse_general_labels(labels: &[Label], config: &AuditConfig, out: &mut Detections) {
    for label in labels {
        if config.is_person_label(&label.name) {
            for instance in &label.instances {
                match (&instance.bounding_box, instance.confidence) {
                    (Some(record), Some(confidence)) => {
                        log::debug!("person detected ({:.1}%)", confidence);
                        out.persons
                            .push(Person::new(record.to_bounding_box()).with_confidence(confidence));
                    }
                    _ => log::debug!("skipping unlocated or unscored '{}' instance", label.name),
                }
            }
            continue;
        }

        for category in config.categories_for_label(&label.name) {
            for record in label.instances.iter().filter_map(|i| i.bounding_box.as_ref()) {
                out.equipment.push(category, record.to_bounding_box());
            }
        }
    }
}

/// Parses detections from specialized single-category detectors.
///
/// These only ever contribute equipment.
pub fn parse_custom_labels(labels: &[CustomLabel], config: &AuditConfig, out: &mut Detections) {
    for label in labels {
        let Some(record) = label.bounding_box() else {
            log::debug!("skipping unlocated custom label '{}'", label.name);
            continue;
        };
        for category in config.categories_for_label(&label.name) {
            out.equipment.push(category, record.to_bounding_box());
        }
    }
}

/// Reads a detection document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid document.
pub fn read_detection_document(path: &Path) -> Result<DetectionDocument, PpeAuditError> {
    let file = File::open(path).map_err(PpeAuditError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| PpeAuditError::DetectionParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a detection document from a JSON string.
pub fn from_detection_str(json: &str) -> Result<DetectionDocument, PpeAuditError> {
    serde_json::from_str(json).map_err(|source| PpeAuditError::DetectionParse {
        path: Path::new("<string>").to_path_buf(),
        source,
    })
}

/// Parses a detection document from bytes.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation.
pub fn from_detection_slice(bytes: &[u8]) -> Result<DetectionDocument, PpeAuditError> {
    serde_json::from_slice(bytes).map_err(|source| PpeAuditError::DetectionParse {
        path: Path::new("<bytes>").to_path_buf(),
        source,
    })
}
