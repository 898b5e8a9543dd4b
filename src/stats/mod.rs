//! Compliance statistics.
//!
//! [`Stats`] freezes a matched population: it assigns every person its
//! final index, builds the `category -> persons` index and answers the
//! population-level queries. It is built once and never mutated, so
//! rendering the summary or the report twice yields identical output.

mod report;

pub use report::{
    ComplianceReport, MetricDatum, PersonEquipment, EQUIPPED_METRIC, UNEQUIPPED_METRIC,
};

use std::collections::BTreeMap;
use std::fmt;

use crate::config::AuditConfig;
use crate::scene::Person;

/// Population statistics for one image.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    population: Vec<Person>,
    /// Population positions per worn category, in population order.
    by_category: BTreeMap<String, Vec<usize>>,
    /// Configured categories in declaration order.
    categories: Vec<String>,
}

impl Stats {
    /// Builds statistics over the enabled categories of `config`.
    pub fn new(population: Vec<Person>, config: &AuditConfig) -> Self {
        Self::with_categories(population, config.enabled_category_names())
    }

    /// Builds statistics reporting on an explicit category list.
    ///
    /// Worn categories outside `categories` are dropped from every person
    /// before indexing, so they never reach a count or the report.
    pub fn with_categories(mut population: Vec<Person>, categories: Vec<String>) -> Self {
        let mut by_category: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (position, person) in population.iter_mut().enumerate() {
            person.index = Some(position);
            person.equipment.retain(|category| {
                let covered = categories.contains(category);
                if !covered {
                    log::debug!("person {} wears unreported category '{}'", position, category);
                }
                covered
            });
            for category in &person.equipment {
                by_category
                    .entry(category.clone())
                    .or_default()
                    .push(position);
            }
        }

        Self {
            population,
            by_category,
            categories,
        }
    }

    /// The frozen population, in index order.
    pub fn population(&self) -> &[Person] {
        &self.population
    }

    /// The categories this report covers, in declaration order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the number of persons detected.
    pub fn population_count(&self) -> usize {
        self.population.len()
    }

    /// Returns the number of persons wearing nothing.
    pub fn unequipped_count(&self) -> usize {
        self.population.iter().filter(|p| !p.is_equipped()).count()
    }

    /// Returns the number of persons wearing at least one category.
    pub fn equipped_count(&self) -> usize {
        self.population_count() - self.unequipped_count()
    }

    /// Persons wearing `category`, in population order.
    pub fn persons_in_category(&self, category: &str) -> Vec<&Person> {
        self.positions_in_category(category)
            .iter()
            .map(|&position| &self.population[position])
            .collect()
    }

    fn positions_in_category(&self, category: &str) -> &[usize] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Renders the human-readable summary.
    pub fn render_summary(&self) -> String {
        self.to_string()
    }

    /// Builds the JSON-serializable report.
    ///
    /// `image_url` is passed through untouched.
    pub fn build_report(&self, image_url: &str) -> ComplianceReport {
        let equipment_per_person = self
            .population
            .iter()
            .enumerate()
            .map(|(position, person)| PersonEquipment {
                ind: person.index.unwrap_or(position),
                equipment: person.equipment.iter().cloned().collect(),
            })
            .collect();

        let persons_per_equipment = self
            .categories
            .iter()
            .map(|category| {
                let indices = self
                    .positions_in_category(category)
                    .iter()
                    .map(|position| position.to_string())
                    .collect();
                (category.clone(), indices)
            })
            .collect();

        ComplianceReport {
            message: self.render_summary(),
            image_url: image_url.to_string(),
            population_size: self.population_count(),
            unequipped_size: self.unequipped_count(),
            equipment_per_person,
            persons_per_equipment,
        }
    }

    /// The equipped and unequipped counters, in that order.
    pub fn metrics(&self) -> [MetricDatum; 2] {
        [
            MetricDatum::count(EQUIPPED_METRIC, self.equipped_count()),
            MetricDatum::count(UNEQUIPPED_METRIC, self.unequipped_count()),
        ]
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report:")?;
        writeln!(f, "Found {} persons.", self.population_count())?;
        writeln!(f, "Without equipment: {}.", self.unequipped_count())?;

        for category in &self.categories {
            writeln!(
                f,
                "Persons with {}: {}.",
                category,
                self.positions_in_category(category).len()
            )?;
        }

        for (position, person) in self.population.iter().enumerate() {
            if person.is_equipped() {
                let worn: Vec<&str> = person.equipment.iter().map(String::as_str).collect();
                writeln!(f, "Person {} wears: {}.", position, worn.join(", "))?;
            } else {
                writeln!(f, "Person {} is unequipped.", position)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::match_equipment;
    use crate::scene::{make_bounding_box, EquipmentBoxes};

    fn wearing(categories: &[&str]) -> Person {
        let mut person = Person::new(make_bounding_box(0.25, 0.25, 0.0, 0.0));
        person
            .equipment
            .extend(categories.iter().map(|c| c.to_string()));
        person
    }

    fn make_test_stats() -> Stats {
        Stats::new(
            vec![
                wearing(&["helmet", "boot"]),
                wearing(&[]),
                wearing(&["boot"]),
            ],
            &AuditConfig::default(),
        )
    }

    #[test]
    fn test_indices_assigned_in_order() {
        let stats = make_test_stats();
        let indices: Vec<Option<usize>> = stats.population().iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_counts() {
        let stats = make_test_stats();
        assert_eq!(stats.population_count(), 3);
        assert_eq!(stats.unequipped_count(), 1);
        assert_eq!(stats.equipped_count(), 2);
    }

    #[test]
    fn test_persons_in_category() {
        let stats = make_test_stats();
        let boots: Vec<Option<usize>> = stats
            .persons_in_category("boot")
            .iter()
            .map(|p| p.index)
            .collect();
        assert_eq!(boots, vec![Some(0), Some(2)]);
        assert!(stats.persons_in_category("mask").is_empty());
    }

    #[test]
    fn test_empty_population() {
        let stats = Stats::new(Vec::new(), &AuditConfig::default());
        assert_eq!(stats.population_count(), 0);
        assert_eq!(stats.equipped_count(), 0);
        let report = stats.build_report("");
        assert!(report.equipment_per_person.is_empty());
        assert_eq!(report.persons_per_equipment.len(), 3);
    }

    #[test]
    fn test_summary_text() {
        let stats = make_test_stats();
        let expected = "Report:\n\
                        Found 3 persons.\n\
                        Without equipment: 1.\n\
                        Persons with helmet: 1.\n\
                        Persons with mask: 0.\n\
                        Persons with boot: 2.\n\
                        Person 0 wears: boot, helmet.\n\
                        Person 1 is unequipped.\n\
                        Person 2 wears: boot.\n";
        assert_eq!(stats.render_summary(), expected);
    }

    #[test]
    fn test_report_fields() {
        let stats = make_test_stats();
        let report = stats.build_report("https://bucket.example/image.jpg?sig=abc");

        assert_eq!(report.image_url, "https://bucket.example/image.jpg?sig=abc");
        assert_eq!(report.population_size, 3);
        assert_eq!(report.unequipped_size, 1);
        assert_eq!(report.message, stats.render_summary());
        assert_eq!(
            report.equipment_per_person[0],
            PersonEquipment {
                ind: 0,
                equipment: vec!["boot".into(), "helmet".into()],
            }
        );
        assert_eq!(report.persons_per_equipment["boot"], vec!["0", "2"]);
        assert_eq!(report.persons_per_equipment["helmet"], vec!["0"]);
        assert!(report.persons_per_equipment["mask"].is_empty());
        assert!(!report.persons_per_equipment.contains_key("vest"));
    }

    #[test]
    fn test_report_json_keys() {
        let stats = make_test_stats();
        let json = serde_json::to_value(stats.build_report("url")).expect("serialize report");

        assert_eq!(json["PopulationSize"], 3);
        assert_eq!(json["UnequippedSize"], 1);
        assert_eq!(json["ImageUrl"], "url");
        assert_eq!(json["EquipmentPerPerson"][2]["ind"], 2);
        assert_eq!(json["EquipmentPerPerson"][2]["equipment"][0], "boot");
        assert_eq!(json["PersonsPerEquipment"]["boot"][1], "2");
        assert!(json["Message"].as_str().unwrap_or("").starts_with("Report:"));
    }

    #[test]
    fn test_metrics() {
        let stats = make_test_stats();
        let [equipped, unequipped] = stats.metrics();
        assert_eq!(equipped, MetricDatum::count(EQUIPPED_METRIC, 2));
        assert_eq!(unequipped, MetricDatum::count(UNEQUIPPED_METRIC, 1));

        let json = serde_json::to_value(&equipped).expect("serialize metric");
        assert_eq!(json["MetricName"], "PersonsWithSafetyEquip1");
        assert_eq!(json["Unit"], "Count");
    }

    #[test]
    fn test_disabled_category_is_not_counted() {
        let mut equipment = EquipmentBoxes::new();
        equipment.push("vest", make_bounding_box(0.125, 0.125, 0.0, 0.0));
        let mut population = vec![
            Person::new(make_bounding_box(0.5, 0.5, 0.0, 0.0)),
            wearing(&["vest", "helmet"]),
        ];
        match_equipment(&mut population, &equipment);
        assert!(population[0].wears("vest"));

        let stats = Stats::new(population, &AuditConfig::default());
        assert_eq!(stats.equipped_count(), 1);
        assert_eq!(stats.unequipped_count(), 1);
        assert!(stats.persons_in_category("vest").is_empty());
        assert!(!stats.population()[0].wears("vest"));

        let expected = "Report:\n\
                        Found 2 persons.\n\
                        Without equipment: 1.\n\
                        Persons with helmet: 1.\n\
                        Persons with mask: 0.\n\
                        Persons with boot: 0.\n\
                        Person 0 is unequipped.\n\
                        Person 1 wears: helmet.\n";
        assert_eq!(stats.render_summary(), expected);

        let report = stats.build_report("");
        assert!(report.equipment_per_person[0].equipment.is_empty());
        assert_eq!(report.equipment_per_person[1].equipment, vec!["helmet"]);
        assert!(!report.persons_per_equipment.contains_key("vest"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let stats = make_test_stats();
        assert_eq!(stats.render_summary(), stats.render_summary());
        assert_eq!(stats.build_report("u"), stats.build_report("u"));
    }
}
