//! Audit configuration: label vocabulary and equipment taxonomy.
//!
//! The detector vocabulary is not stable, so canonical equipment categories
//! are mapped onto lists of provider label synonyms. The table is data, not
//! code: categories can be added, renamed or switched off without touching
//! the matching logic. An [`AuditConfig`] is an immutable value handed to
//! the parser and to [`Stats`](crate::stats::Stats) at call time.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PpeAuditError;

const DEFAULT_PERSON_LABELS: [&str; 3] = ["person", "human", "child"];

/// One canonical equipment category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    /// Canonical name used as the group key in every output.
    pub name: String,

    /// Provider label names that map onto this category (case-insensitive).
    #[serde(default)]
    pub synonyms: Vec<String>,

    /// Disabled categories are declared but excluded from matching and from
    /// every count, e.g. while their specialized detector is not deployed.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl CategoryConfig {
    /// Creates an enabled category with the given synonyms.
    pub fn new<S: Into<String>>(name: impl Into<String>, synonyms: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
            enabled: true,
        }
    }

    /// Marks the category as disabled (builder pattern).
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Returns true if the provider label is one of this category's names.
    pub fn matches(&self, label: &str) -> bool {
        label_in(label, &self.synonyms)
    }
}

/// Configuration for one audit run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Provider label names that identify a person (case-insensitive).
    #[serde(default = "default_person_labels")]
    pub person_labels: Vec<String>,

    /// Equipment categories in declaration order. Reports iterate in this
    /// order.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

fn default_person_labels() -> Vec<String> {
    DEFAULT_PERSON_LABELS.iter().map(|s| s.to_string()).collect()
}

impl Default for AuditConfig {
    /// The deployed taxonomy. The vest detector is trained but not switched
    /// on, so `vest` is declared disabled.
    fn default() -> Self {
        Self {
            person_labels: default_person_labels(),
            categories: vec![
                CategoryConfig::new("helmet", ["helmet", "hardhat"]),
                CategoryConfig::new("vest", ["vest", "waistcoat", "safetyjacket"]).disabled(),
                CategoryConfig::new("mask", ["mask", "masks"]),
                CategoryConfig::new("boot", ["boot", "shoe"]),
            ],
        }
    }
}

impl AuditConfig {
    /// Creates a validated configuration.
    pub fn new(
        person_labels: Vec<String>,
        categories: Vec<CategoryConfig>,
    ) -> Result<Self, PpeAuditError> {
        let config = Self {
            person_labels,
            categories,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns true if the provider label identifies a person.
    pub fn is_person_label(&self, label: &str) -> bool {
        label_in(label, &self.person_labels)
    }

    /// Iterates over enabled categories in declaration order.
    pub fn enabled_categories(&self) -> impl Iterator<Item = &CategoryConfig> {
        self.categories.iter().filter(|c| c.enabled)
    }

    /// Names of enabled categories in declaration order.
    pub fn enabled_category_names(&self) -> Vec<String> {
        self.enabled_categories().map(|c| c.name.clone()).collect()
    }

    /// Enabled categories the provider label belongs to.
    ///
    /// A label listed as a synonym of several categories belongs to each.
    pub fn categories_for_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.enabled_categories()
            .filter(move |c| c.matches(label))
            .map(|c| c.name.as_str())
    }

    /// Checks the configuration for mistakes that would make reports
    /// ambiguous.
    pub fn validate(&self) -> Result<(), PpeAuditError> {
        if self.person_labels.iter().all(|l| l.trim().is_empty()) {
            return Err(PpeAuditError::InvalidConfig(
                "at least one person label is required".to_string(),
            ));
        }

        // Labels match case-insensitively, so names must be unique that way too.
        let mut seen: HashSet<String> = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(PpeAuditError::InvalidConfig(
                    "category name must not be empty".to_string(),
                ));
            }
            if !seen.insert(category.name.to_lowercase()) {
                return Err(PpeAuditError::InvalidConfig(format!(
                    "duplicate category '{}'",
                    category.name
                )));
            }
            // Person labels take precedence, so such a synonym would never match.
            if let Some(synonym) = category.synonyms.iter().find(|s| self.is_person_label(s)) {
                return Err(PpeAuditError::InvalidConfig(format!(
                    "synonym '{}' of category '{}' is a person label",
                    synonym, category.name
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PpeAuditError> {
        Self::parse_yaml(yaml, Path::new("<string>"))
    }

    fn parse_yaml(yaml: &str, path: &Path) -> Result<Self, PpeAuditError> {
        let config: AuditConfig =
            serde_yaml::from_str(yaml).map_err(|source| PpeAuditError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }
}

/// Reads and validates a YAML configuration file.
///
/// # Example file
///
/// ```yaml
/// person_labels: [person, human]
/// categories:
///   - name: helmet
///     synonyms: [helmet, hardhat]
///   - name: vest
///     synonyms: [vest, safetyjacket]
///     enabled: false
/// ```
pub fn read_config(path: &Path) -> Result<AuditConfig, PpeAuditError> {
    let yaml = fs::read_to_string(path).map_err(PpeAuditError::Io)?;
    AuditConfig::parse_yaml(&yaml, path)
}

/// Loads the configuration from `path`, or the built-in default.
pub fn load_config(path: Option<&Path>) -> Result<AuditConfig, PpeAuditError> {
    match path {
        Some(path) => read_config(path),
        None => Ok(AuditConfig::default()),
    }
}

fn label_in(label: &str, names: &[String]) -> bool {
    let label = label.to_lowercase();
    names.iter().any(|name| name.to_lowercase() == label)
}
