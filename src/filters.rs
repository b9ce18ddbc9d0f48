//! History filters for the car page.
//!
//! Every query parameter is independently optional and forgiving: a value
//! that does not pass its gate is silently ignored rather than rejected, so
//! a mangled URL still renders the unfiltered history.

use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};

use crate::models::Category;

/// Raw query parameters as they arrive; kept around so the filter form can
/// echo exactly what the user typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub m_from: Option<String>,
    #[serde(default)]
    pub m_to: Option<String>,
    #[serde(default)]
    pub d_from: Option<String>,
    #[serde(default)]
    pub d_to: Option<String>,
}

/// The validated, effective filter set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub text: Option<String>,
    pub category: Option<Category>,
    pub mileage_from: Option<i64>,
    pub mileage_to: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl JobFilter {
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            text: clean(&params.q).map(str::to_owned),
            category: clean(&params.category).and_then(Category::parse),
            mileage_from: clean(&params.m_from).and_then(parse_non_negative),
            mileage_to: clean(&params.m_to).and_then(parse_non_negative),
            date_from: clean(&params.d_from)
                .filter(|s| is_plain_date(s))
                .map(str::to_owned),
            date_to: clean(&params.d_to)
                .filter(|s| is_plain_date(s))
                .map(str::to_owned),
        }
    }
}

fn clean(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_non_negative(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().filter(|v| *v >= 0)
}

/// Strict YYYY-MM-DD shape: 10 characters, hyphens at positions 4 and 7,
/// digits everywhere else. Anything looser is ignored.
pub fn is_plain_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

/// Appends the active predicates to a WHERE clause that already scopes by
/// car and owner. Used for both the job list and the aggregate query so the
/// two always see the same rows.
pub fn push_predicates(builder: &mut QueryBuilder<'_, Sqlite>, filter: &JobFilter) {
    if let Some(category) = filter.category {
        builder.push(" AND category = ").push_bind(category.as_str());
    }
    if let Some(text) = &filter.text {
        builder
            .push(" AND description LIKE ")
            .push_bind(format!("%{text}%"));
    }
    if let Some(m) = filter.mileage_from {
        builder.push(" AND mileage >= ").push_bind(m);
    }
    if let Some(m) = filter.mileage_to {
        builder.push(" AND mileage <= ").push_bind(m);
    }
    if let Some(d) = &filter.date_from {
        builder
            .push(" AND datetime(created_at) >= datetime(")
            .push_bind(d.clone())
            .push(")");
    }
    if let Some(d) = &filter.date_to {
        // Inclusive of the whole day: exclusive bound at the next midnight.
        builder
            .push(" AND datetime(created_at) < datetime(")
            .push_bind(d.clone())
            .push(", '+1 day')");
    }
}
