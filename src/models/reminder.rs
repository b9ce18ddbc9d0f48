use chrono::NaiveDate;
use serde::Serialize;

use crate::status::{self, DueInfo};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub car_id: i64,
    pub title: String,
    pub interval_km: Option<i64>,
    pub interval_days: Option<i64>,
    pub last_mileage: i64,
    pub last_date: NaiveDate,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl Reminder {
    pub fn due_info(&self, current_mileage: i64, today: NaiveDate) -> DueInfo {
        status::evaluate(
            self.interval_km,
            self.interval_days,
            self.last_mileage,
            self.last_date,
            current_mileage,
            today,
        )
    }
}
