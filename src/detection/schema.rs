//! Detection provider response shapes.
//!
//! Two invocation paths exist. The general multi-class detector reports
//! `Labels`, each optionally carrying `Instances` with a box and a score.
//! Specialized single-category detectors report `CustomLabels`, each with
//! the box nested under `Geometry`. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::scene::{make_bounding_box, BoundingBox};

/// One saved detector response, or several merged into one file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectionDocument {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_labels: Vec<CustomLabel>,
}

impl DetectionDocument {
    /// Returns true if the document carries no labels of either shape.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.custom_labels.is_empty()
    }
}

/// A label reported by the general detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Located occurrences. Scene-level labels ("Construction") have none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<Instance>,
}

/// One located occurrence of a general label.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoxRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A detection reported by a specialized detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomLabel {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

impl CustomLabel {
    /// Returns the nested box, if the detection is located.
    pub fn bounding_box(&self) -> Option<&BoxRecord> {
        self.geometry.as_ref()?.bounding_box.as_ref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoxRecord>,
}

/// Box as reported by the provider, in fractions of the image size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoxRecord {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl BoxRecord {
    /// Converts to a normalized [`BoundingBox`].
    pub fn to_bounding_box(&self) -> BoundingBox {
        make_bounding_box(self.width, self.height, self.left, self.top)
    }
}

impl From<&BoxRecord> for BoundingBox {
    fn from(record: &BoxRecord) -> Self {
        record.to_bounding_box()
    }
}
