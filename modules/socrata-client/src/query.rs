//! SoQL query construction.
//!
//! Only the subset of SoQL the clients in this workspace need: `$where`
//! predicates, `$limit`, and `$order`. Rendering produces raw parameter
//! values; URL encoding is the HTTP client's job.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

/// A bounded SoQL query. Where clauses are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoqlQuery {
    where_clauses: Vec<String>,
    limit: Option<u32>,
    order: Option<(String, SortOrder)>,
}

impl SoqlQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_clause(mut self, clause: impl Into<String>) -> Self {
        self.where_clauses.push(clause.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order = Some((field.into(), order));
        self
    }

    /// The rendered `$where` value, or `None` when no clause was added.
    pub fn where_value(&self) -> Option<String> {
        match self.where_clauses.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            many => Some(
                many.iter()
                    .map(|c| format!("({c})"))
                    .collect::<Vec<_>>()
                    .join(" AND "),
            ),
        }
    }

    /// Query-string pairs in the order Socrata documents them.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(clause) = self.where_value() {
            params.push(("$where", clause));
        }
        if let Some(limit) = self.limit {
            params.push(("$limit", limit.to_string()));
        }
        if let Some((field, order)) = &self.order {
            params.push(("$order", format!("{field} {order}")));
        }
        params
    }
}

/// Quote a SoQL string literal. Embedded single quotes are doubled.
pub fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn starts_with(field: &str, prefix: &str) -> String {
    format!("starts_with({field}, {})", literal(prefix))
}

pub fn is_not_null(field: &str) -> String {
    format!("{field} IS NOT NULL")
}

/// OR-combine clauses. A single clause is returned as-is.
pub fn any_of<I, S>(clauses: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let clauses: Vec<String> = clauses.into_iter().map(Into::into).collect();
    match clauses.len() {
        0 => "false".to_string(),
        1 => clauses.into_iter().next().unwrap_or_default(),
        _ => format!("({})", clauses.join(" OR ")),
    }
}
