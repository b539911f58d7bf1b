use std::collections::{BTreeSet, HashMap};

/// Opaque squeue job identifier (output of `%A`)
pub type JobId = String;

/// A column of the queue table, backed by one squeue output format code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name; also the header squeue prints for `code`
    pub name: String,
    /// squeue `-o` format code, e.g. `%T`
    pub code: String,
}

impl Field {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

/// Query results: field name -> job id -> value
///
/// A field only gets an entry once a value has been recorded for it, so a
/// field whose every job vanished is absent rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    values: HashMap<String, HashMap<JobId, String>>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, job: &str, value: String) {
        self.values
            .entry(field.to_string())
            .or_default()
            .insert(job.to_string(), value);
    }

    pub fn get(&self, field: &str, job: &str) -> Option<&str> {
        self.values
            .get(field)
            .and_then(|jobs| jobs.get(job))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of the fields that hold at least one value, sorted
    pub fn field_names(&self) -> BTreeSet<&str> {
        self.values.keys().map(String::as_str).collect()
    }
}
