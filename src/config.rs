use std::collections::HashSet;

use crate::error::QueryError;
use crate::models::{ColorRule, Field};

/// Fields shown by default, in column order, with their squeue format codes.
/// The header squeue prints for each code must equal the field name.
const DEFAULT_FIELDS: &[(&str, &str)] = &[
    ("STATE", "%T"),
    ("NAME", "%j"),
    ("JOBID", "%i"),
    ("TRES_PER_NODE", "%b"),
    ("MIN_CPUS", "%c"),
    ("MIN_MEMORY", "%m"),
    ("RESERVATION", "%v"),
    ("NODELIST(REASON)", "%R"),
];

/// Immutable description of what to query and how to color it
#[derive(Debug, Clone)]
pub struct QueueConfig {
    fields: Vec<Field>,
    color_rules: Vec<ColorRule>,
}

impl QueueConfig {
    /// Build and validate a config.
    ///
    /// Field names must be non-empty and unique, codes must be squeue format
    /// codes (starting with `%`), and every color rule must refer to a
    /// configured field.
    pub fn new(fields: Vec<Field>, color_rules: Vec<ColorRule>) -> Result<Self, QueryError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(QueryError::InvalidConfig("field name cannot be empty".to_string()));
            }
            if !field.code.starts_with('%') || field.code.len() < 2 {
                return Err(QueryError::InvalidConfig(format!(
                    "invalid format code '{}' for field {}",
                    field.code, field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(QueryError::InvalidConfig(format!("duplicate field {}", field.name)));
            }
        }

        let mut ruled = HashSet::new();
        for rule in &color_rules {
            if !seen.contains(rule.field.as_str()) {
                return Err(QueryError::InvalidConfig(format!(
                    "color rule for unknown field {}",
                    rule.field
                )));
            }
            if !ruled.insert(rule.field.as_str()) {
                return Err(QueryError::InvalidConfig(format!(
                    "more than one color rule for field {}",
                    rule.field
                )));
            }
        }

        Ok(Self { fields, color_rules })
    }

    /// Configured fields in query and column order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn color_rule(&self, field: &str) -> Option<&ColorRule> {
        self.color_rules.iter().find(|rule| rule.field == field)
    }
}

impl Default for QueueConfig {
    /// The compiled-in squeue columns, with STATE colored by job state
    fn default() -> Self {
        let fields = DEFAULT_FIELDS
            .iter()
            .map(|(name, code)| Field::new(name, code))
            .collect();
        let state = ColorRule::new(
            "STATE",
            &[("RUNNING", "green"), ("PENDING", "yellow")],
            Some("red"),
        )
        .expect("built-in STATE colors are valid");
        Self::new(fields, vec![state]).expect("built-in queue config is valid")
    }
}
