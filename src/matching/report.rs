//! Match report types.

use std::fmt;

use serde::Serialize;

/// Outcome of assigning equipment to a population.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatchReport {
    /// Equipment boxes tested against the population.
    pub boxes_tested: usize,
    /// Boxes that intersected at least one person.
    pub boxes_assigned: usize,
    /// Boxes that intersected nobody (equipment without a wearer).
    pub boxes_unworn: usize,
    /// Non-fatal findings raised while matching.
    pub diagnostics: Vec<MatchDiagnostic>,
}

impl MatchReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of ambiguous assignments.
    pub fn ambiguous_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, MatchDiagnostic::AmbiguousAssignment { .. }))
            .count()
    }

    /// Returns true if no diagnostics were raised.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Matched {} of {} equipment box(es), {} unworn.",
            self.boxes_assigned, self.boxes_tested, self.boxes_unworn
        )?;
        for diagnostic in &self.diagnostics {
            writeln!(f, "  [WARN ] {}", diagnostic)?;
        }
        Ok(())
    }
}

/// A non-fatal matching finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum MatchDiagnostic {
    /// One equipment box overlaps several persons; every one of them was
    /// given the category. Usually crowding or an oversized detection.
    AmbiguousAssignment {
        category: String,
        /// Position of the box within its category.
        box_index: usize,
        /// Population positions of the persons it was assigned to.
        persons: Vec<usize>,
    },
}

impl fmt::Display for MatchDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchDiagnostic::AmbiguousAssignment {
                category,
                box_index,
                persons,
            } => write!(
                f,
                "One {} (box {}) assigned to {} persons",
                category,
                box_index,
                persons.len()
            ),
        }
    }
}
