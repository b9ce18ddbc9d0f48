//! Reminder due-status computation.
//!
//! A reminder tracks a distance interval, a time interval, or both, plus the
//! checkpoint (mileage, date) of the last completed service. The status is a
//! traffic light over the remaining headroom on each configured axis: an
//! overdue axis forces red no matter how the other one looks.

use chrono::{Duration, NaiveDate};

/// Distance headroom below which a reminder turns yellow.
pub const NEAR_DUE_KM: i64 = 500;
/// Days of headroom below which a reminder turns yellow.
pub const NEAR_DUE_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DueStatus {
    Green,
    Yellow,
    Red,
}

impl DueStatus {
    pub fn dot(&self) -> &'static str {
        match self {
            DueStatus::Green => "🟢",
            DueStatus::Yellow => "🟡",
            DueStatus::Red => "🔴",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueInfo {
    pub next_due_mileage: Option<i64>,
    pub next_due_date: Option<NaiveDate>,
    pub status: DueStatus,
    pub hints: Vec<String>,
}

/// Pure function of the reminder's intervals and checkpoint against the
/// car's current odometer reading and today's date. Intervals that are
/// absent or non-positive contribute nothing.
pub fn evaluate(
    interval_km: Option<i64>,
    interval_days: Option<i64>,
    last_mileage: i64,
    last_date: NaiveDate,
    current_mileage: i64,
    today: NaiveDate,
) -> DueInfo {
    let mut status = DueStatus::Green;
    let mut hints = Vec::new();
    let mut next_due_mileage = None;
    let mut next_due_date = None;

    if let Some(km) = interval_km.filter(|v| *v > 0) {
        let next = last_mileage + km;
        let left = next - current_mileage;
        hints.push(format!("next at {next} km ({left} km left)"));
        status = status.max(if left <= 0 {
            DueStatus::Red
        } else if left <= NEAR_DUE_KM {
            DueStatus::Yellow
        } else {
            DueStatus::Green
        });
        next_due_mileage = Some(next);
    }

    if let Some(days) = interval_days.filter(|v| *v > 0) {
        let next = last_date + Duration::days(days);
        let left = (next - today).num_days();
        hints.push(format!("next on {next} ({left} days left)"));
        status = status.max(if left <= 0 {
            DueStatus::Red
        } else if left <= NEAR_DUE_DAYS {
            DueStatus::Yellow
        } else {
            DueStatus::Green
        });
        next_due_date = Some(next);
    }

    DueInfo {
        next_due_mileage,
        next_due_date,
        status,
        hints,
    }
}
