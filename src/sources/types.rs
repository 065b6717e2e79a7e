use crate::models::RawRecord;
use serde::{Deserialize, Serialize};

/// A single pushed-down constraint on a document field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Constraint {
    /// Field equals the value
    Eq { field: String, value: String },
    /// Field equals one of the values
    In { field: String, values: Vec<String> },
}

impl Constraint {
    fn matches(&self, record: &RawRecord) -> bool {
        match self {
            Constraint::Eq { field, value } => record.text(field).is_some_and(|v| v == *value),
            Constraint::In { field, values } => record
                .text(field)
                .is_some_and(|v| values.iter().any(|candidate| *candidate == v)),
        }
    }
}

/// Conjunctive list of constraints restricting a collection read
///
/// An empty predicate matches every document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Predicate {
    pub constraints: Vec<Constraint>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality constraint
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a membership constraint
    pub fn one_of<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.push(Constraint::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Both predicates must hold
    pub fn and(mut self, other: &Predicate) -> Self {
        self.constraints.extend(other.constraints.iter().cloned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Evaluate locally, for stores that cannot push the predicate down
    pub fn matches(&self, record: &RawRecord) -> bool {
        self.constraints.iter().all(|c| c.matches(record))
    }
}
