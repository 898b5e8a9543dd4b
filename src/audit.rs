//! Single-image audit pipeline: parse, match, aggregate.

use std::path::Path;

use crate::config::AuditConfig;
use crate::detection::{self, DetectionDocument, Detections};
use crate::error::PpeAuditError;
use crate::matching::{self, MatchReport};
use crate::stats::Stats;

/// Result of auditing one image.
#[derive(Clone, Debug)]
pub struct Audit {
    pub stats: Stats,
    pub matching: MatchReport,
}

/// Matches parsed detections and freezes the population.
pub fn audit_detections(detections: Detections, config: &AuditConfig) -> Audit {
    let Detections {
        mut persons,
        equipment,
    } = detections;

    log::debug!(
        "matching {} person(s) against {} equipment box(es)",
        persons.len(),
        equipment.len()
    );
    let matching = matching::match_equipment(&mut persons, &equipment);
    let stats = Stats::new(persons, config);

    Audit { stats, matching }
}

/// Audits the detector responses describing one image.
pub fn audit_documents<'a>(
    documents: impl IntoIterator<Item = &'a DetectionDocument>,
    config: &AuditConfig,
) -> Audit {
    audit_detections(detection::parse_documents(documents, config), config)
}

/// Reads detector responses from files and audits them as one image.
///
/// # Errors
/// Fails on the first file that cannot be read or parsed.
pub fn audit_files<P: AsRef<Path>>(
    paths: &[P],
    config: &AuditConfig,
) -> Result<Audit, PpeAuditError> {
    let documents = paths
        .iter()
        .map(|path| detection::read_detection_document(path.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(audit_documents(&documents, config))
}
