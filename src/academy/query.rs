//! Collection queries evaluated by the data access facade.
//!
//! A [`Query`] is a set of ANDed field filters, an optional single sort key, and an optional
//! result cap. Values compare the way the hosted database compares them: numbers numerically,
//! strings lexicographically (so ISO-8601 dates compare chronologically), booleans only by
//! equality. A document without the filtered field never matches.

use crate::store::Document;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Gte,
    Lt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: Op,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        let Some(actual) = doc.field(&self.field) else {
            return false;
        };
        match self.op {
            Op::Eq => actual == &self.value || compare_values(actual, &self.value) == Some(Ordering::Equal),
            Op::Gte => matches!(
                compare_values(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Op::Lt => compare_values(actual, &self.value) == Some(Ordering::Less),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::new(field, op, value));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Applies filters, then ordering, then the cap.
    pub fn apply(&self, docs: Vec<Document>) -> Vec<Document> {
        let mut matched: Vec<Document> = docs
            .into_iter()
            .filter(|doc| self.filters.iter().all(|f| f.matches(doc)))
            .collect();

        if let Some(sort) = &self.sort {
            // Stable sort: ties keep store order. Missing values sink in both directions.
            matched.sort_by(|a, b| {
                match (a.field(&sort.field), b.field(&sort.field)) {
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(_), None) => Ordering::Less,
                    (Some(x), Some(y)) => {
                        let ord = total_order(x, y);
                        match sort.direction {
                            Direction::Asc => ord,
                            Direction::Desc => ord.reverse(),
                        }
                    }
                }
            });
        }

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

/// Compares two values of the same kind; `None` when they are not comparable.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) if x == y => Some(Ordering::Equal),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Ordering used for sorting, where values of different kinds still need a place.
fn total_order(a: &Value, b: &Value) -> Ordering {
    compare_values(a, b).unwrap_or_else(|| type_rank(a).cmp(&type_rank(b)).then_with(|| match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }))
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
